use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SiteCmsError;

// --- Identity ---

/// Stable identifier for an item or sub-item, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn default_active() -> bool {
    true
}

// --- Items ---

/// Common shape of every entry in an ordered collection.
///
/// `order` is the explicit sort key. It is independent of the entry's
/// position in the underlying list and need not be contiguous.
pub trait Orderable {
    fn id(&self) -> &ItemId;
    fn set_id(&mut self, id: ItemId);
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
    fn is_active(&self) -> bool;
}

/// Render order: stable sort ascending by `order`, then drop inactive entries.
pub fn visible<I: Orderable>(items: &[I]) -> Vec<&I> {
    let mut sorted: Vec<&I> = items.iter().collect();
    sorted.sort_by_key(|item| item.order());
    sorted.retain(|item| item.is_active());
    sorted
}

/// Owned variant of [`visible`] for building render-ready documents.
pub fn visible_cloned<I: Orderable + Clone>(items: &[I]) -> Vec<I> {
    visible(items).into_iter().cloned().collect()
}

// --- Documents ---

/// The admin-editable areas of the site. Each kind has exactly one stored
/// document, keyed by [`DocumentKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Navbar,
    Services,
    LogoMarquee,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Navbar,
        DocumentKind::Services,
        DocumentKind::LogoMarquee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Navbar => "navbar",
            DocumentKind::Services => "services",
            DocumentKind::LogoMarquee => "logo-marquee",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = SiteCmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "navbar" => Ok(DocumentKind::Navbar),
            "services" => Ok(DocumentKind::Services),
            "logo-marquee" | "logoMarquee" => Ok(DocumentKind::LogoMarquee),
            other => Err(SiteCmsError::UnknownKind(other.to_string())),
        }
    }
}

/// A persisted configuration document.
pub trait ConfigDocument:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: DocumentKind;

    /// Built-in document used when the store has nothing usable.
    fn defaults() -> Self;

    /// Render-ready copy: every collection sorted by `order` with inactive
    /// entries removed.
    fn visible_view(&self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Entry {
        id: ItemId,
        order: i64,
        active: bool,
    }

    impl Orderable for Entry {
        fn id(&self) -> &ItemId {
            &self.id
        }
        fn set_id(&mut self, id: ItemId) {
            self.id = id;
        }
        fn order(&self) -> i64 {
            self.order
        }
        fn set_order(&mut self, order: i64) {
            self.order = order;
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn entry(id: &str, order: i64, active: bool) -> Entry {
        Entry {
            id: ItemId::from(id),
            order,
            active,
        }
    }

    #[test]
    fn visible_sorts_before_filtering() {
        let items = vec![
            entry("c", 30, true),
            entry("a", 10, false),
            entry("b", 20, true),
        ];
        let ids: Vec<&str> = visible(&items).into_iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn visible_keeps_list_order_for_equal_keys() {
        let items = vec![entry("x", 1, true), entry("y", 1, true)];
        let ids: Vec<&str> = visible(&items).into_iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn kind_parses_its_own_key() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.as_str().parse::<DocumentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(matches!(
            "footer".parse::<DocumentKind>(),
            Err(SiteCmsError::UnknownKind(k)) if k == "footer"
        ));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }
}
