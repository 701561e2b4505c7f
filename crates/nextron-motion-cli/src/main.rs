use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nextron_motion_core::MotionConfig;

mod commands;

#[derive(Parser)]
#[command(name = "nextron-motion")]
#[command(author, version, about = "Inspect and simulate the Nextron motion design system")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token tables and every named variant
    Catalog {
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Print when each child of a stagger container starts
    Timeline {
        /// Number of children
        #[arg(short = 'n', long, default_value_t = 3)]
        children: usize,
        /// Stagger tier: tight, compact, normal, comfortable, relaxed, loose
        #[arg(short, long, default_value = "normal")]
        stagger: String,
        /// Base delay before the first child, in seconds
        #[arg(short, long, default_value_t = 0.1)]
        delay: f64,
        /// Entrance variant used for every child
        #[arg(short, long, default_value = "fade_up")]
        child: String,
    },
    /// Validate the token tables, the variant library and the config file
    Validate,
    /// Scroll through a page of sample sections and log reveal events
    Simulate {
        /// Start with reduced motion on
        #[arg(long)]
        reduced: bool,
        /// Flip the reduced-motion preference after this many seconds
        #[arg(long)]
        toggle_at: Option<f64>,
        /// Scroll speed in pixels per second
        #[arg(long, default_value_t = 1200.0)]
        speed: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = MotionConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { format } => commands::catalog::run(format),
        Commands::Timeline {
            children,
            stagger,
            delay,
            child,
        } => commands::timeline::run(children, &stagger, delay, &child),
        Commands::Validate => commands::validate::run(&config),
        Commands::Simulate {
            reduced,
            toggle_at,
            speed,
        } => commands::simulate::run(&config, reduced, toggle_at, speed).await,
    }
}
