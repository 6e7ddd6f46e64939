use anyhow::Result;
use clap::Subcommand;

use sitecms_common::{NavItem, NavbarConfig, SubMenuItem};
use sitecms_editor::{areas, Direction, Target};

use super::{require, require_child};

#[derive(Subcommand, Debug)]
pub enum NavCommand {
    /// Append a menu item
    Add { name: String, href: String },

    /// Change fields of a menu item (position or id)
    Update {
        target: Target,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        href: Option<String>,

        /// Show or hide the item
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a menu item and its sub-menu
    Remove { target: Target },

    /// Swap a menu item with its neighbour
    Move { target: Target, direction: Direction },

    /// Append a sub-menu entry under a menu item
    SubAdd {
        parent: Target,
        name: String,
        href: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a sub-menu entry
    SubRemove { parent: Target, child: Target },
}

impl NavCommand {
    pub fn apply(self, doc: &NavbarConfig) -> Result<NavbarConfig> {
        let items = areas::nav_items();
        let subs = areas::nav_sub_menu();

        Ok(match self {
            NavCommand::Add { name, href } => items.add(doc, NavItem::new(name, href)),
            NavCommand::Update {
                target,
                name,
                href,
                active,
            } => {
                require(&items, doc, &target)?;
                items.update(doc, target, |item| {
                    if let Some(name) = name {
                        item.name = name;
                    }
                    if let Some(href) = href {
                        item.href = href;
                    }
                    if let Some(active) = active {
                        item.is_active = active;
                    }
                })
            }
            NavCommand::Remove { target } => {
                require(&items, doc, &target)?;
                items.remove(doc, target)
            }
            NavCommand::Move { target, direction } => {
                require(&items, doc, &target)?;
                items.move_item(doc, target, direction)
            }
            NavCommand::SubAdd {
                parent,
                name,
                href,
                description,
            } => {
                require(&items, doc, &parent)?;
                let entry = SubMenuItem {
                    description,
                    ..SubMenuItem::new(name, href)
                };
                subs.add(doc, parent, entry)
            }
            NavCommand::SubRemove { parent, child } => {
                require_child(&subs, doc, &parent, &child)?;
                subs.remove(doc, parent, child)
            }
        })
    }
}
