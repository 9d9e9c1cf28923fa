//! CLI entry point for markblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "markblog")]
#[command(version)]
#[command(about = "A markdown-backed blog: categories, posts and a JSON API", long_about = None)]
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
    /// Serve the blog API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List blog content
    List {
        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Include unpublished posts
        #[arg(short, long)]
        all: bool,
    },

    /// Show dashboard statistics
    Stats,

    /// Print the table of contents of a post
    Toc {
        /// Category of the post
        category: String,

        /// `<slug>` or `<subcategory> <slug>`
        #[arg(required = true, num_args = 1..=2)]
        path: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "markblog=debug,info"
    } else {
        "markblog=info"
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
    let blog = markblog::Blog::new(&base_dir)?;

    match cli.command {
        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            markblog::server::start(blog, &ip, port).await?;
        }

        Commands::List { r#type, all } => {
            markblog::commands::list::run(&blog, &r#type, all)?;
        }

        Commands::Stats => {
            markblog::commands::show::stats(&blog)?;
        }

        Commands::Toc { category, path } => {
            markblog::commands::show::toc(&blog, &category, &path)?;
        }
    }

    Ok(())
}
