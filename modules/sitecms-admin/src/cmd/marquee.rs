use anyhow::Result;
use clap::Subcommand;

use sitecms_common::{Logo, LogoMarqueeConfig, MarqueeDirection};
use sitecms_editor::{areas, Direction, Target};

use super::require;

#[derive(Subcommand, Debug)]
pub enum MarqueeCommand {
    /// Append a partner logo
    Add {
        name: String,

        /// Image path or URL
        image: String,

        /// Link opened when the logo is clicked
        #[arg(long)]
        href: Option<String>,
    },

    /// Delete a logo
    Remove { target: Target },

    /// Swap a logo with its neighbour
    Move { target: Target, direction: Direction },

    /// Scroll speed in seconds per loop
    SetSpeed { speed: u32 },

    /// Scroll direction (left or right)
    SetDirection { direction: MarqueeDirection },

    /// Show or hide the whole marquee
    Toggle,
}

impl MarqueeCommand {
    pub fn apply(self, doc: &LogoMarqueeConfig) -> Result<LogoMarqueeConfig> {
        let logos = areas::logos();

        Ok(match self {
            MarqueeCommand::Add { name, image, href } => {
                logos.add(doc, Logo { href, ..Logo::new(name, image) })
            }
            MarqueeCommand::Remove { target } => {
                require(&logos, doc, &target)?;
                logos.remove(doc, target)
            }
            MarqueeCommand::Move { target, direction } => {
                require(&logos, doc, &target)?;
                logos.move_item(doc, target, direction)
            }
            MarqueeCommand::SetSpeed { speed } => LogoMarqueeConfig {
                speed,
                ..doc.clone()
            },
            MarqueeCommand::SetDirection { direction } => LogoMarqueeConfig {
                direction,
                ..doc.clone()
            },
            MarqueeCommand::Toggle => LogoMarqueeConfig {
                is_active: !doc.is_active,
                ..doc.clone()
            },
        })
    }
}
