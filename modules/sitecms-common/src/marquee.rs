use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiteCmsError;
use crate::types::{default_active, visible_cloned, ConfigDocument, DocumentKind, ItemId, Orderable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoMarqueeConfig {
    pub logos: Vec<Logo>,
    /// Hides the whole marquee without touching its logos.
    pub is_active: bool,
    pub title: String,
    /// Scroll speed in seconds per full loop.
    pub speed: u32,
    pub direction: MarqueeDirection,
    pub pause_on_hover: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarqueeDirection {
    Left,
    Right,
}

impl fmt::Display for MarqueeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarqueeDirection::Left => write!(f, "left"),
            MarqueeDirection::Right => write!(f, "right"),
        }
    }
}

impl FromStr for MarqueeDirection {
    type Err = SiteCmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(MarqueeDirection::Left),
            "right" => Ok(MarqueeDirection::Right),
            other => Err(SiteCmsError::Validation(format!(
                "marquee direction must be left or right, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Logo {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            image: image.into(),
            href: None,
            order: 0,
            is_active: true,
        }
    }
}

impl Orderable for Logo {
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

impl ConfigDocument for LogoMarqueeConfig {
    const KIND: DocumentKind = DocumentKind::LogoMarquee;

    fn defaults() -> Self {
        let logos = [
            ("Partner One", "/logos/partner-1.svg"),
            ("Partner Two", "/logos/partner-2.svg"),
            ("Partner Three", "/logos/partner-3.svg"),
        ]
        .into_iter()
        .zip(1..)
        .map(|((name, image), order)| Logo {
            order,
            ..Logo::new(name, image)
        })
        .collect();

        Self {
            logos,
            is_active: true,
            title: "Trusted by".to_string(),
            speed: 30,
            direction: MarqueeDirection::Left,
            pause_on_hover: true,
        }
    }

    fn visible_view(&self) -> Self {
        // An inactive marquee renders nothing at all.
        let logos = if self.is_active {
            visible_cloned(&self.logos)
        } else {
            Vec::new()
        };
        Self {
            logos,
            ..self.clone()
        }
    }
}
