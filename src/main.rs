use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_dashboard::api::{build_router, state::AppState};
use league_dashboard::calculate::{
    rank_for_entity, rankable_stats, scatter_series, teams, Selector,
};
use league_dashboard::config::AppConfig;
use league_dashboard::pitch::PitchGeometryBuilder;
use league_dashboard::storage::{read_matches, read_players};

#[derive(Parser)]
#[command(name = "league-dashboard")]
#[command(about = "Football league statistics dashboard backend")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Directory of front-end assets to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Print the pitch geometry as JSON
    Pitch,

    /// List rankable stats and teams
    Stats,

    /// Rank one player on every stat
    Compare {
        #[arg(long)]
        team: String,

        #[arg(long)]
        player: String,
    },

    /// Print a stat-vs-stat scatter series as JSON
    Scatter {
        #[arg(long)]
        x: Option<String>,

        #[arg(long)]
        y: Option<String>,
    },

    /// List the season's matches
    Matches,
}

/// Load the config file (or defaults) and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Commands::Serve {
        host,
        port,
        static_dir,
    } = &cli.command
    {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
        if static_dir.is_some() {
            config.server.static_dir = static_dir.clone();
        }
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting league-dashboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { .. } => {
            let addr = format!("{}:{}", config.server.host, config.server.port);
            if let Some(dir) = &config.server.static_dir {
                tracing::info!("Serving static files from {:?}", dir);
            }
            let app = build_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Pitch => {
            let geometry = PitchGeometryBuilder::new(config.pitch).build_validated()?;
            println!("{}", serde_json::to_string_pretty(&geometry)?);
        }
        Commands::Stats => {
            let population = read_players(&config.storage())?;
            println!("\n=== Player Stats ===");
            println!("Players: {}", population.len());
            println!("\nRankable stats:");
            for stat in rankable_stats(&population) {
                println!("  - {}", stat);
            }
            println!("\nTeams:");
            for team in teams(&population) {
                println!("  - {}", team);
            }
        }
        Commands::Compare { team, player } => {
            let population = read_players(&config.storage())?;
            let selector = Selector::new(team, player);
            let series =
                rank_for_entity(&population, &selector, &config.ranking.directions())?.series();

            println!("\n=== {} ===", series.title);
            println!("{:<32} {:>12} {:>6}  {}", "Stat", "Value", "Rank", "Class");
            for bar in &series.bars {
                println!(
                    "{:<32} {:>12.2} {:>6}  {}",
                    bar.stat, bar.value, bar.rank, bar.classification
                );
            }
        }
        Commands::Scatter { x, y } => {
            let population = read_players(&config.storage())?;
            let series = scatter_series(&population, x.as_deref(), y.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        Commands::Matches => {
            let matches = read_matches(&config.storage())?;
            println!("\n=== Matches ({}) ===", matches.len());
            for m in &matches {
                println!("{:>8}  {}", m.id, m.label());
            }
        }
    }

    Ok(())
}
