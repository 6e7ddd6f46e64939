use serde::{Deserialize, Serialize};

use crate::types::{default_active, visible_cloned, ConfigDocument, DocumentKind, ItemId, Orderable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesConfig {
    pub services: Vec<Service>,
    pub title: String,
    pub subtitle: String,
    pub autoplay: bool,
    pub autoplay_interval_ms: u64,
}

/// A service card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Icon name understood by the site's icon set.
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<BulletPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletPoint {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Service {
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            title: title.into(),
            description: String::new(),
            icon: icon.into(),
            image: None,
            href: None,
            order: 0,
            is_active: true,
            bullet_points: None,
        }
    }

    fn card(order: i64, title: &str, icon: &str, description: &str, bullets: &[&str]) -> Self {
        let bullet_points = bullets
            .iter()
            .zip(1..)
            .map(|(text, order)| BulletPoint {
                order,
                ..BulletPoint::new(*text)
            })
            .collect();
        Self {
            description: description.to_string(),
            order,
            bullet_points: Some(bullet_points),
            ..Self::new(title, icon)
        }
    }
}

impl BulletPoint {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            text: text.into(),
            order: 0,
            is_active: true,
        }
    }
}

impl Orderable for Service {
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

impl Orderable for BulletPoint {
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

impl ConfigDocument for ServicesConfig {
    const KIND: DocumentKind = DocumentKind::Services;

    fn defaults() -> Self {
        Self {
            services: vec![
                Service::card(
                    1,
                    "Telecom Engineering",
                    "radio-tower",
                    "Design, rollout and operation of carrier networks.",
                    &["RAN and core planning", "OSS/BSS integration"],
                ),
                Service::card(
                    2,
                    "System Integration",
                    "plug",
                    "Connecting legacy and cloud platforms.",
                    &["API gateways", "Data migration"],
                ),
                Service::card(
                    3,
                    "Software Development",
                    "code",
                    "Web and backend products built to last.",
                    &["Web applications", "Managed hosting"],
                ),
            ],
            title: "Our Services".to_string(),
            subtitle: "What we build for our clients".to_string(),
            autoplay: true,
            autoplay_interval_ms: 5000,
        }
    }

    fn visible_view(&self) -> Self {
        let services = visible_cloned(&self.services)
            .into_iter()
            .map(|mut service| {
                service.bullet_points = service.bullet_points.as_deref().map(visible_cloned);
                service
            })
            .collect();
        Self {
            services,
            ..self.clone()
        }
    }
}
