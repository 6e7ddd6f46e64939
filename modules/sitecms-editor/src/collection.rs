//! Pure CRUD over one ordered collection inside a document.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use sitecms_common::{ItemId, Orderable};

use crate::error::EditorError;

/// Address of an item: its current position, or its stable id.
///
/// Ids survive reorders; positions must be recomputed after any move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Id(ItemId),
}

impl Target {
    /// Current position of the addressed item, if it exists.
    pub fn resolve<I: Orderable>(&self, items: &[I]) -> Option<usize> {
        match self {
            Target::Index(i) => (*i < items.len()).then_some(*i),
            Target::Id(id) => items.iter().position(|item| item.id() == id),
        }
    }
}

impl From<usize> for Target {
    fn from(i: usize) -> Self {
        Target::Index(i)
    }
}

impl From<ItemId> for Target {
    fn from(id: ItemId) -> Self {
        Target::Id(id)
    }
}

impl From<&ItemId> for Target {
    fn from(id: &ItemId) -> Self {
        Target::Id(id.clone())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Index(i) => write!(f, "#{i}"),
            Target::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Parses a bare number as a position, anything else as an id.
impl FromStr for Target {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(i) => Target::Index(i),
            Err(_) => Target::Id(ItemId::from(s)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(EditorError::Parse(format!(
                "direction must be up or down, got {other}"
            ))),
        }
    }
}

/// A named lens onto one `Vec<I>` field of a document `D`.
///
/// Every operation takes the document by reference and returns an updated
/// copy. Operations whose target does not resolve return an equal copy.
pub struct Collection<D, I> {
    name: &'static str,
    get: fn(&D) -> &Vec<I>,
    get_mut: fn(&mut D) -> &mut Vec<I>,
}

impl<D, I> Clone for Collection<D, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, I> Copy for Collection<D, I> {}

impl<D, I> fmt::Debug for Collection<D, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection").field("name", &self.name).finish()
    }
}

impl<D: Clone, I: Orderable + Clone> Collection<D, I> {
    pub fn new(
        name: &'static str,
        get: fn(&D) -> &Vec<I>,
        get_mut: fn(&mut D) -> &mut Vec<I>,
    ) -> Self {
        Self { name, get, get_mut }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Items in list order.
    pub fn items<'a>(&self, doc: &'a D) -> &'a [I] {
        (self.get)(doc)
    }

    pub fn get<'a>(&self, doc: &'a D, target: impl Into<Target>) -> Option<&'a I> {
        let items = self.items(doc);
        target.into().resolve(items).map(|i| &items[i])
    }

    pub fn position(&self, doc: &D, target: impl Into<Target>) -> Option<usize> {
        target.into().resolve(self.items(doc))
    }

    /// Items as they render: sorted by `order`, inactive ones dropped.
    pub fn visible<'a>(&self, doc: &'a D) -> Vec<&'a I> {
        sitecms_common::visible(self.items(doc))
    }

    /// Append `template` with `order = len + 1`. A template whose id is
    /// already taken gets a fresh one.
    pub fn add(&self, doc: &D, template: I) -> D {
        let mut next = doc.clone();
        append(self.name, (self.get_mut)(&mut next), template);
        next
    }

    /// Apply `patch` to the addressed item only.
    pub fn update(&self, doc: &D, target: impl Into<Target>, patch: impl FnOnce(&mut I)) -> D {
        let target = target.into();
        let mut next = doc.clone();
        let items = (self.get_mut)(&mut next);
        match target.resolve(items) {
            Some(i) => patch(&mut items[i]),
            None => debug!(collection = self.name, target = %target, "update target not found"),
        }
        next
    }

    /// Drop the addressed item. Surviving items keep their `order`.
    pub fn remove(&self, doc: &D, target: impl Into<Target>) -> D {
        let target = target.into();
        let mut next = doc.clone();
        let items = (self.get_mut)(&mut next);
        match target.resolve(items) {
            Some(i) => {
                items.remove(i);
            }
            None => debug!(collection = self.name, target = %target, "remove target not found"),
        }
        next
    }

    /// Swap the addressed item with its positional neighbour. `order` fields
    /// are left alone. Moving the first item up or the last item down is a
    /// no-op.
    pub fn move_item(&self, doc: &D, target: impl Into<Target>, direction: Direction) -> D {
        let mut next = doc.clone();
        let items = (self.get_mut)(&mut next);
        let Some(i) = target.into().resolve(items) else {
            return next;
        };
        let neighbour = match direction {
            Direction::Up => i.checked_sub(1),
            Direction::Down => Some(i + 1).filter(|j| *j < items.len()),
        };
        if let Some(j) = neighbour {
            items.swap(i, j);
        }
        next
    }

    /// Move the addressed item to position `to` (clamped to the last
    /// position), then renumber every `order` to its 1-based position.
    pub fn reorder(&self, doc: &D, from: impl Into<Target>, to: usize) -> D {
        let mut next = doc.clone();
        let items = (self.get_mut)(&mut next);
        let Some(from) = from.into().resolve(items) else {
            return next;
        };
        let item = items.remove(from);
        let to = to.min(items.len());
        items.insert(to, item);
        renumber(items);
        next
    }
}

pub(crate) fn append<I: Orderable>(collection: &'static str, items: &mut Vec<I>, mut template: I) {
    if items.iter().any(|existing| existing.id() == template.id()) {
        template.set_id(ItemId::generate());
    }
    template.set_order(items.len() as i64 + 1);
    debug!(collection, id = %template.id(), order = template.order(), "item added");
    items.push(template);
}

fn renumber<I: Orderable>(items: &mut [I]) {
    for (item, order) in items.iter_mut().zip(1..) {
        item.set_order(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas;
    use sitecms_common::{ConfigDocument, NavItem, NavbarConfig, Service, ServicesConfig};

    fn nav(names: &[&str]) -> NavbarConfig {
        let mut doc = NavbarConfig::defaults();
        doc.items = names
            .iter()
            .zip(1..)
            .map(|(name, order)| NavItem {
                order,
                ..NavItem::new(*name, format!("/{}", name.to_lowercase()))
            })
            .collect();
        doc
    }

    fn names(doc: &NavbarConfig) -> Vec<&str> {
        doc.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn add_appends_with_next_order() {
        let doc = nav(&["A", "B", "C"]);
        let next = areas::nav_items().add(&doc, NavItem::new("D", "/d"));
        assert_eq!(next.items.len(), 4);
        assert_eq!(next.items[3].order, 4);
        assert_eq!(doc.items.len(), 3, "input must not be mutated");
    }

    #[test]
    fn add_replaces_a_duplicate_id() {
        let doc = nav(&["A"]);
        let mut dup = NavItem::new("A2", "/a2");
        dup.id = doc.items[0].id.clone();
        let next = areas::nav_items().add(&doc, dup);
        assert_ne!(next.items[0].id, next.items[1].id);
    }

    #[test]
    fn remove_is_precise() {
        let doc = nav(&["A", "B", "C", "D"]);
        let next = areas::nav_items().remove(&doc, 1);
        assert_eq!(names(&next), vec!["A", "C", "D"]);
        assert_eq!(next.items[1].order, 3, "survivors keep their order");
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let doc = nav(&["A", "B"]);
        assert_eq!(areas::nav_items().remove(&doc, 5), doc);
    }

    #[test]
    fn update_touches_only_the_target() {
        let doc = nav(&["A", "B"]);
        let next = areas::nav_items().update(&doc, 1, |item| item.is_active = false);
        assert!(next.items[0].is_active);
        assert!(!next.items[1].is_active);
    }

    #[test]
    fn update_by_id_follows_the_item_across_moves() {
        let doc = nav(&["A", "B", "C"]);
        let c_id = doc.items[2].id.clone();
        let items = areas::nav_items();
        let moved = items.move_item(&doc, 2, Direction::Up);
        let next = items.update(&moved, &c_id, |item| item.name = "C!".into());
        assert_eq!(names(&next), vec!["A", "C!", "B"]);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let doc = nav(&["A"]);
        let next = areas::nav_items().update(&doc, ItemId::from("missing"), |item| {
            item.name = "changed".into()
        });
        assert_eq!(next, doc);
    }

    #[test]
    fn move_boundaries_are_noops() {
        let doc = nav(&["A", "B", "C"]);
        let items = areas::nav_items();
        assert_eq!(items.move_item(&doc, 0, Direction::Up), doc);
        assert_eq!(items.move_item(&doc, 2, Direction::Down), doc);
        assert_eq!(items.move_item(&doc, 9, Direction::Down), doc);
    }

    #[test]
    fn move_swaps_positions_but_not_order() {
        let doc = nav(&["A", "B", "C"]);
        let next = areas::nav_items().move_item(&doc, 0, Direction::Down);
        assert_eq!(names(&next), vec!["B", "A", "C"]);
        assert_eq!(next.items[0].order, 2);
        assert_eq!(next.items[1].order, 1);
    }

    #[test]
    fn reorder_renumbers_contiguously() {
        let mut doc = ServicesConfig::defaults();
        doc.services.push(Service {
            order: 40,
            ..Service::new("Support", "life-buoy")
        });
        let next = areas::services().reorder(&doc, 3, 0);
        assert_eq!(next.services[0].title, "Support");
        let orders: Vec<i64> = next.services.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reorder_clamps_destination() {
        let doc = ServicesConfig::defaults();
        let next = areas::services().reorder(&doc, 0, 100);
        assert_eq!(next.services.last().unwrap().title, doc.services[0].title);
        assert_eq!(next.services.last().unwrap().order, 3);
    }

    #[test]
    fn target_parses_numbers_as_positions() {
        assert_eq!("2".parse::<Target>().unwrap(), Target::Index(2));
        assert_eq!(
            "nav-home".parse::<Target>().unwrap(),
            Target::Id(ItemId::from("nav-home"))
        );
    }
}
