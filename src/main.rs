//! CLI entry point for foglio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "foglio")]
#[command(version)]
#[command(about = "A small personal blog engine for markdown posts", long_about = None)]
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
    /// List site content
    List {
        /// Type of content to list (post, id, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show corpus statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the year/month archive
    Archive,

    /// Show posts related to the given post
    Related {
        /// Post id
        id: String,
    },

    /// Render one post's body to HTML
    Render {
        /// Post id
        id: String,
    },

    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "foglio=debug,info"
    } else {
        "foglio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let blog = foglio::Blog::open(&base_dir)?;

    match cli.command {
        Commands::List { r#type } => {
            foglio::commands::list(&blog, &r#type)?;
        }

        Commands::Stats { json } => {
            foglio::commands::stats(&blog, json)?;
        }

        Commands::Archive => {
            foglio::commands::archive(&blog)?;
        }

        Commands::Related { id } => {
            foglio::commands::related(&blog, &id)?;
        }

        Commands::Render { id } => {
            foglio::commands::render(&blog, &id)?;
        }

        Commands::Server { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            foglio::server::start(&blog, &ip, port).await?;
        }
    }

    Ok(())
}
