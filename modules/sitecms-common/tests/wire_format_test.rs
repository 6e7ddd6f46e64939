use serde_json::json;

use sitecms_common::{ConfigDocument, DocumentKind, MarqueeDirection, NavbarConfig, ServicesConfig};

#[test]
fn stored_documents_use_camel_case() {
    let doc = serde_json::to_value(ServicesConfig::defaults()).unwrap();
    assert!(doc.get("autoplayIntervalMs").is_some());
    assert!(doc["services"][0].get("bulletPoints").is_some());
    assert!(doc["services"][0].get("isActive").is_some());
}

#[test]
fn items_without_ids_get_one() {
    let doc: NavbarConfig = serde_json::from_value(json!({
        "items": [
            { "name": "Home", "href": "/", "order": 1 },
            { "name": "Blog", "href": "/blog", "order": 2 }
        ],
        "sticky": true,
        "showThemeToggle": false,
        "ctaLabel": "Contact us",
        "ctaHref": "/contact"
    }))
    .unwrap();

    assert!(!doc.items[0].id.as_str().is_empty());
    assert_ne!(doc.items[0].id, doc.items[1].id);
    assert!(doc.items.iter().all(|i| i.is_active));
}

#[test]
fn absent_sub_menu_stays_absent() {
    let doc = NavbarConfig::defaults();
    let json = serde_json::to_value(&doc).unwrap();
    assert!(json["items"][0].get("subMenu").is_none());
    assert!(json["items"][1]["subMenu"].is_array());
}

#[test]
fn marquee_direction_is_lowercase() {
    let raw = DocumentKind::LogoMarquee.default_document().unwrap();
    assert_eq!(raw["direction"], "left");
    assert_eq!("Right".parse::<MarqueeDirection>().unwrap(), MarqueeDirection::Right);
}

#[test]
fn kinds_round_trip_through_their_names() {
    for kind in DocumentKind::ALL {
        assert_eq!(kind.as_str().parse::<DocumentKind>().unwrap(), kind);
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
    }
}
