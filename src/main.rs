//! CLI entry point for halko-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halko_blog::commands::show::ShowFormat;
use halko_blog::theme::ColorMode;

#[derive(Parser)]
#[command(name = "halko-blog")]
#[command(version)]
#[command(about = "A small Markdown blog", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Slug of the post
        slug: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Text)]
        format: ShowFormat,
    },

    /// Print the theme tokens as CSS
    Tokens {
        /// Colour mode (light or dark)
        #[arg(short, long, default_value = "light")]
        mode: ColorMode,
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

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "halko_blog=debug,tower_http=debug,info"
    } else {
        "halko_blog=info"
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
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            halko_blog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let blog = halko_blog::Blog::new(&base_dir)?;
            let path = halko_blog::commands::new::create_post(&blog, &title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List { json } => {
            let blog = halko_blog::Blog::new(&base_dir)?;
            halko_blog::commands::list::run(&blog, json).await?;
        }

        Commands::Show { slug, format } => {
            let blog = halko_blog::Blog::new(&base_dir)?;
            halko_blog::commands::show::run(&blog, &slug, format).await?;
        }

        Commands::Tokens { mode } => {
            halko_blog::commands::tokens::run(mode);
        }

        Commands::Server { port, ip } => {
            let blog = halko_blog::Blog::new(&base_dir)?;
            tracing::info!("Serving posts from {:?}", blog.content_dir);
            halko_blog::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("halko-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
