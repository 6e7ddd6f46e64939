//! Collections of the three admin areas.

use sitecms_common::{
    BulletPoint, Logo, LogoMarqueeConfig, NavItem, NavbarConfig, Service, ServicesConfig,
    SubMenuItem,
};

use crate::collection::Collection;
use crate::nested::NestedCollection;

pub fn nav_items() -> Collection<NavbarConfig, NavItem> {
    Collection::new("items", |d| &d.items, |d| &mut d.items)
}

pub fn nav_sub_menu() -> NestedCollection<NavbarConfig, NavItem, SubMenuItem> {
    NestedCollection::new(
        "subMenu",
        nav_items(),
        |p| p.sub_menu.as_ref(),
        |p| &mut p.sub_menu,
    )
}

pub fn services() -> Collection<ServicesConfig, Service> {
    Collection::new("services", |d| &d.services, |d| &mut d.services)
}

pub fn service_bullets() -> NestedCollection<ServicesConfig, Service, BulletPoint> {
    NestedCollection::new(
        "bulletPoints",
        services(),
        |p| p.bullet_points.as_ref(),
        |p| &mut p.bullet_points,
    )
}

pub fn logos() -> Collection<LogoMarqueeConfig, Logo> {
    Collection::new("logos", |d| &d.logos, |d| &mut d.logos)
}
