//! CLI entry point for gazette

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(author = "Adam Ksiazek")]
#[command(version)]
#[command(about = "A fast static blog generator with author bylines", long_about = None)]
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
    /// Initialize a new Gazette site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post, draft, or author record
    New {
        /// Layout to use (post, draft, author)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new content
        title: String,

        /// Path for the new file (without extension)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, author, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "gazette=debug,info"
    } else {
        "gazette=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing Gazette site in {:?}", target_dir);
            gazette::commands::init::init_site(&target_dir)?;
            println!("Initialized empty Gazette site in {:?}", target_dir);
        }

        Commands::New {
            layout,
            title,
            path,
        } => {
            let gazette = gazette::Gazette::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", layout, title);
            gazette::commands::new::create_content(&gazette, &title, &layout, path.as_deref())?;
        }

        Commands::Generate { watch } => {
            let gazette = gazette::Gazette::new(&base_dir)?;
            tracing::info!("Generating static files...");

            gazette::commands::generate::run(&gazette)?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                gazette::commands::generate::watch(&gazette).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let gazette = gazette::Gazette::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            gazette.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            gazette::server::start(&gazette, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let gazette = gazette::Gazette::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            gazette.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let gazette = gazette::Gazette::new(&base_dir)?;
            gazette::commands::list::run(&gazette, &r#type)?;
        }

        Commands::Version => {
            println!("gazette version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
