//! CLI entry point for pagesmith

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(version)]
#[command(about = "A static site generator for personal blogs and websites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the output directory
    #[command(alias = "b")]
    Build,

    /// Delete the output directory
    Clean,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// List posts and categories
    List,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pagesmith=debug,info"
    } else {
        "pagesmith=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let site = pagesmith::Site::new(&base_dir)?;
            tracing::info!("Building site...");
            site.build()?;
            println!("Build completed successfully!");
        }

        Commands::Clean => {
            let site = pagesmith::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::New { title } => {
            let site = pagesmith::Site::new(&base_dir)?;
            site.new_post(&title)?;
        }

        Commands::List => {
            let site = pagesmith::Site::new(&base_dir)?;
            pagesmith::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("pagesmith version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
