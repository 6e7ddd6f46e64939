//! Admin client for the site's navbar, services section and logo marquee.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sitecms_common::{Config, DocumentKind, LogoMarqueeConfig, NavbarConfig, ServicesConfig};

mod cmd;
mod session;

use session::Remote;

#[derive(Parser)]
#[command(name = "sitecms")]
#[command(about = "Edit the site's configuration documents")]
#[command(version)]
struct Cli {
    /// Document store URL (overrides DOCSTORE_URL)
    #[arg(long, global = true)]
    docstore_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a document as the editor sees it
    Show { kind: DocumentKind },

    /// Delete a stored document and go back to built-in defaults
    Reset { kind: DocumentKind },

    /// Navbar items and sub-menus
    #[command(subcommand)]
    Nav(cmd::nav::NavCommand),

    /// Service cards and their bullet points
    #[command(subcommand)]
    Services(cmd::services::ServicesCommand),

    /// Partner logo marquee
    #[command(subcommand)]
    Marquee(cmd::marquee::MarqueeCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    // Before the subscriber, so RUST_LOG from .env applies.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sitecms=info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(url) = cli.docstore_url {
        config.docstore_url = url.trim_end_matches('/').to_string();
    }
    let remote = Remote::from_config(&config)?;

    match cli.command {
        Commands::Show { kind } => match kind {
            DocumentKind::Navbar => print(&remote.show::<NavbarConfig>().await?),
            DocumentKind::Services => print(&remote.show::<ServicesConfig>().await?),
            DocumentKind::LogoMarquee => print(&remote.show::<LogoMarqueeConfig>().await?),
        },
        Commands::Reset { kind } => match kind {
            DocumentKind::Navbar => print(&remote.reset::<NavbarConfig>().await?),
            DocumentKind::Services => print(&remote.reset::<ServicesConfig>().await?),
            DocumentKind::LogoMarquee => print(&remote.reset::<LogoMarqueeConfig>().await?),
        },
        Commands::Nav(edit) => print(&remote.edit(|doc: &NavbarConfig| edit.apply(doc)).await?),
        Commands::Services(edit) => {
            print(&remote.edit(|doc: &ServicesConfig| edit.apply(doc)).await?)
        }
        Commands::Marquee(edit) => {
            print(&remote.edit(|doc: &LogoMarqueeConfig| edit.apply(doc)).await?)
        }
    }
}

fn print<T: Serialize>(doc: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(doc)?);
    Ok(())
}
