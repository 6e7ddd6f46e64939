use anyhow::Result;
use clap::Subcommand;

use sitecms_common::{BulletPoint, Service, ServicesConfig};
use sitecms_editor::{areas, Target};

use super::{require, require_child};

#[derive(Subcommand, Debug)]
pub enum ServicesCommand {
    /// Append a service card
    Add {
        title: String,

        /// Icon name from the site's icon set
        #[arg(long, default_value = "sparkles")]
        icon: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a service card
    Remove { target: Target },

    /// Move a card to a new position and renumber the rest
    Reorder { from: Target, to: usize },

    /// Append a bullet point to a card
    BulletAdd { service: Target, text: String },

    /// Delete a bullet point from a card
    BulletRemove { service: Target, bullet: Target },
}

impl ServicesCommand {
    pub fn apply(self, doc: &ServicesConfig) -> Result<ServicesConfig> {
        let services = areas::services();
        let bullets = areas::service_bullets();

        Ok(match self {
            ServicesCommand::Add {
                title,
                icon,
                description,
            } => {
                let card = Service {
                    description: description.unwrap_or_default(),
                    ..Service::new(title, icon)
                };
                services.add(doc, card)
            }
            ServicesCommand::Remove { target } => {
                require(&services, doc, &target)?;
                services.remove(doc, target)
            }
            ServicesCommand::Reorder { from, to } => {
                require(&services, doc, &from)?;
                services.reorder(doc, from, to)
            }
            ServicesCommand::BulletAdd { service, text } => {
                require(&services, doc, &service)?;
                bullets.add(doc, service, BulletPoint::new(text))
            }
            ServicesCommand::BulletRemove { service, bullet } => {
                require_child(&bullets, doc, &service, &bullet)?;
                bullets.remove(doc, service, bullet)
            }
        })
    }
}
