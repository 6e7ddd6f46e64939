use serde::{Deserialize, Serialize};

use crate::types::{default_active, visible_cloned, ConfigDocument, DocumentKind, ItemId, Orderable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarConfig {
    pub items: Vec<NavItem>,
    pub sticky: bool,
    pub show_theme_toggle: bool,
    pub cta_label: String,
    pub cta_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_menu: Option<Vec<SubMenuItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMenuItem {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NavItem {
    /// New active entry with a fresh id. `order` is assigned on insertion.
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            href: href.into(),
            order: 0,
            is_active: true,
            sub_menu: None,
        }
    }

    fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    fn with_sub_menu(mut self, sub_menu: Vec<SubMenuItem>) -> Self {
        self.sub_menu = Some(sub_menu);
        self
    }
}

impl SubMenuItem {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            href: href.into(),
            description: None,
            order: 0,
            is_active: true,
        }
    }

    fn described(mut self, order: i64, description: &str) -> Self {
        self.order = order;
        self.description = Some(description.to_string());
        self
    }
}

impl Orderable for NavItem {
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
        self.is_active
    }
}

impl Orderable for SubMenuItem {
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
        self.is_active
    }
}

impl ConfigDocument for NavbarConfig {
    const KIND: DocumentKind = DocumentKind::Navbar;

    fn defaults() -> Self {
        Self {
            items: vec![
                NavItem::new("Home", "/").with_order(1),
                NavItem::new("Solutions", "/solutions")
                    .with_order(2)
                    .with_sub_menu(vec![
                        SubMenuItem::new("Telecom", "/telecom")
                            .described(1, "Network and OSS/BSS engineering"),
                        SubMenuItem::new("System Integration", "/system-integration")
                            .described(2, "Connecting platforms end to end"),
                    ]),
                NavItem::new("Blog", "/blog").with_order(3),
                NavItem::new("About", "/about").with_order(4),
            ],
            sticky: true,
            show_theme_toggle: true,
            cta_label: "Contact us".to_string(),
            cta_href: "/contact".to_string(),
        }
    }

    fn visible_view(&self) -> Self {
        let items = visible_cloned(&self.items)
            .into_iter()
            .map(|mut item| {
                item.sub_menu = item.sub_menu.as_deref().map(visible_cloned);
                item
            })
            .collect();
        Self {
            items,
            ..self.clone()
        }
    }
}
