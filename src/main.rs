//! CLI entry point for blog-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_rs::admin::PostDraft;

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "A small blog engine: live server, static generator and post tooling", long_about = None)]
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
    /// Initialize a new blog with sample posts
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts, filtered and paginated like the home page
    List {
        /// Case-insensitive search over title, excerpt and content
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only posts with any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show a single post
    Show {
        /// Post id
        id: u64,
    },

    /// Render a markdown file to HTML ("-" reads stdin)
    Render {
        #[arg(default_value = "-")]
        input: String,
    },

    /// Print the JSON record for a new post
    New {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        excerpt: String,

        /// Markdown content
        #[arg(long, default_value = "")]
        content: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Clean the public folder
    Clean,

    /// Write the poem list script
    Poems {
        /// Directory holding the poem files
        #[arg(long, default_value = "poems")]
        dir: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "poem_list.js")]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
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
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blog_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::Generate => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_rs::server::start(&blog, &ip, port).await?;
        }

        Commands::List { query, tags, page } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::list::run(&blog, &query, &tags, page).await?;
        }

        Commands::Show { id } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::show::run(&blog, id).await?;
        }

        Commands::Render { input } => {
            blog_rs::commands::render::run(&input)?;
        }

        Commands::New {
            title,
            excerpt,
            content,
            tags,
        } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            let draft = PostDraft {
                title,
                excerpt,
                content,
                tags,
            };
            blog_rs::commands::new::run(&blog, draft).await?;
        }

        Commands::Clean => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Poems { dir, output } => {
            let dir = base_dir.join(dir);
            let output = base_dir.join(output);
            blog_rs::commands::poems::run(&dir, &output)?;
        }

        Commands::Version => {
            println!("blog-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
