pub mod config;
pub mod documents;
pub mod error;
pub mod marquee;
pub mod navbar;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::SiteCmsError;
pub use marquee::{Logo, LogoMarqueeConfig, MarqueeDirection};
pub use navbar::{NavItem, NavbarConfig, SubMenuItem};
pub use services::{BulletPoint, Service, ServicesConfig};
pub use types::*;
