//! CLI entry point for inkpost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost::content::SortOrder;

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(version)]
#[command(about = "Markdown blog content reader", long_about = None)]
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
    /// List blog content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, slug, tag, featured)
        #[arg(default_value = "post")]
        r#type: String,

        /// Sort oldest first instead of newest first
        #[arg(short, long)]
        asc: bool,
    },

    /// Show a single post by slug
    Show {
        /// Slug of the post (the source file's stem)
        slug: String,

        /// Print the raw markdown body instead of rendered HTML
        #[arg(short, long)]
        raw: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpost=debug,info"
    } else {
        "inkpost=info"
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

    match cli.command {
        Commands::List { r#type, asc } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::list::run(&blog, &r#type, SortOrder::from_ascending(asc))?;
        }

        Commands::Show { slug, raw } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::show::run(&blog, &slug, raw)?;
        }

        Commands::Version => {
            println!("inkpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
