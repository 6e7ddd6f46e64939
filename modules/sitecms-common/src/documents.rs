//! Untyped helpers for code that only knows a document by its kind, such as
//! the HTTP service which stores raw JSON.

use serde_json::{json, Value};

use crate::error::SiteCmsError;
use crate::marquee::LogoMarqueeConfig;
use crate::navbar::NavbarConfig;
use crate::services::ServicesConfig;
use crate::types::{ConfigDocument, DocumentKind, ItemId};

fn typed<D: ConfigDocument>(body: &Value) -> Result<D, SiteCmsError> {
    serde_json::from_value(body.clone())
        .map_err(|e| SiteCmsError::Validation(format!("invalid {} document: {e}", D::KIND)))
}

fn to_json<D: ConfigDocument>(doc: &D) -> Result<Value, SiteCmsError> {
    Ok(serde_json::to_value(doc)?)
}

/// Give every object in `list` without an id a fresh one, descending into
/// the `nested` list of each. Returns whether anything changed.
fn fill_ids(list: Option<&mut Value>, nested: Option<&str>) -> bool {
    let Some(Value::Array(items)) = list else {
        return false;
    };
    let mut changed = false;
    for item in items.iter_mut() {
        let Value::Object(fields) = item else {
            continue;
        };
        if fields.get("id").map_or(true, Value::is_null) {
            fields.insert("id".into(), json!(ItemId::generate()));
            changed = true;
        }
        if let Some(key) = nested {
            changed |= fill_ids(fields.get_mut(key), None);
        }
    }
    changed
}

impl DocumentKind {
    /// Assign ids to stored items that were written without one, so they
    /// stay stable across reads once persisted.
    pub fn fill_missing_ids(&self, body: &mut Value) -> bool {
        match self {
            DocumentKind::Navbar => fill_ids(body.get_mut("items"), Some("subMenu")),
            DocumentKind::Services => fill_ids(body.get_mut("services"), Some("bulletPoints")),
            DocumentKind::LogoMarquee => fill_ids(body.get_mut("logos"), None),
        }
    }

    /// Built-in defaults for this kind, as JSON.
    pub fn default_document(&self) -> Result<Value, SiteCmsError> {
        match self {
            DocumentKind::Navbar => to_json(&NavbarConfig::defaults()),
            DocumentKind::Services => to_json(&ServicesConfig::defaults()),
            DocumentKind::LogoMarquee => to_json(&LogoMarqueeConfig::defaults()),
        }
    }

    /// Check that `body` is a complete document of this kind and return it in
    /// canonical form (ids assigned, unknown fields dropped).
    pub fn validate(&self, body: &Value) -> Result<Value, SiteCmsError> {
        match self {
            DocumentKind::Navbar => to_json(&typed::<NavbarConfig>(body)?),
            DocumentKind::Services => to_json(&typed::<ServicesConfig>(body)?),
            DocumentKind::LogoMarquee => to_json(&typed::<LogoMarqueeConfig>(body)?),
        }
    }

    /// Render-ready projection of a stored document.
    pub fn public_view(&self, body: &Value) -> Result<Value, SiteCmsError> {
        match self {
            DocumentKind::Navbar => to_json(&typed::<NavbarConfig>(body)?.visible_view()),
            DocumentKind::Services => to_json(&typed::<ServicesConfig>(body)?.visible_view()),
            DocumentKind::LogoMarquee => {
                to_json(&typed::<LogoMarqueeConfig>(body)?.visible_view())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_validate_for_every_kind() {
        for kind in DocumentKind::ALL {
            let doc = kind.default_document().unwrap();
            assert!(kind.validate(&doc).is_ok(), "{kind} defaults should validate");
        }
    }

    #[test]
    fn validate_rejects_incomplete_document() {
        let err = DocumentKind::LogoMarquee
            .validate(&json!({ "logos": [] }))
            .unwrap_err();
        assert!(matches!(err, SiteCmsError::Validation(_)));
    }

    #[test]
    fn validate_drops_unknown_fields() {
        let mut doc = DocumentKind::Services.default_document().unwrap();
        doc["legacyLayout"] = json!("grid");
        let canonical = DocumentKind::Services.validate(&doc).unwrap();
        assert!(canonical.get("legacyLayout").is_none());
    }

    #[test]
    fn missing_ids_are_filled_at_both_levels() {
        let mut doc = json!({
            "items": [
                { "id": "home", "name": "Home", "href": "/" },
                { "name": "Solutions", "href": "/solutions", "subMenu": [
                    { "name": "Telecom", "href": "/telecom" },
                    { "id": null, "name": "SI", "href": "/si" }
                ]}
            ]
        });

        assert!(DocumentKind::Navbar.fill_missing_ids(&mut doc));

        assert_eq!(doc["items"][0]["id"], "home");
        assert!(doc["items"][1]["id"].is_string());
        let subs = doc["items"][1]["subMenu"].as_array().unwrap();
        assert!(subs.iter().all(|s| s["id"].is_string()));
        assert_ne!(subs[0]["id"], subs[1]["id"]);
    }

    #[test]
    fn complete_documents_are_left_alone() {
        for kind in DocumentKind::ALL {
            let mut doc = kind.default_document().unwrap();
            let before = doc.clone();
            assert!(!kind.fill_missing_ids(&mut doc));
            assert_eq!(doc, before);
        }
    }

    #[test]
    fn public_view_hides_inactive_nav_items() {
        let mut doc = DocumentKind::Navbar.default_document().unwrap();
        doc["items"][0]["isActive"] = json!(false);
        let view = DocumentKind::Navbar.public_view(&doc).unwrap();
        let names: Vec<&str> = view["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert!(!names.contains(&"Home"));
    }
}
