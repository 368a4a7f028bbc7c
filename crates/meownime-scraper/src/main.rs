//! Meownime scraper terminal application.

mod menu;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meownime_scraper::AnimeScraper;
use shared::{Config, ExportPaths};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "meownime", author, version, about = "Browse and search anime from meownime", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (default)
    Menu,
    /// Show ongoing, completed and movie sections of the home page
    Home,
    /// Show the complete anime list
    List {
        /// Only titles starting with this letter
        #[arg(short, long)]
        letter: Option<char>,
    },
    /// Search titles in the complete list
    Search {
        query: String,
    },
    /// Show synopsis, metadata and download links of an anime page
    Details {
        url: String,
    },
    /// Show aggregate counts
    Stats,
    /// Print the home, list and statistics views as JSON
    Dump {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let mut log_config = shared::LogConfig::from_config(&config, "meownime");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!("Meownime scraper starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    let scraper = AnimeScraper::new(config.scraper.clone()).context("Failed to create scraper")?;
    let export_paths = ExportPaths::new(config.export_dir());

    match args.command.unwrap_or(Command::Menu) {
        Command::Menu => menu::run(&scraper, &export_paths).await?,
        Command::Home => {
            let home = scraper.home().await;
            menu::display_home(&home);
        }
        Command::List { letter } => {
            let letter = letter.map(|c| c.to_string());
            let list = scraper.anime_list(letter.as_deref()).await;
            menu::display_anime_list(&list, "Complete Anime List");
        }
        Command::Search { query } => {
            let results = scraper.search(&query).await;
            menu::display_anime_list(&results, &format!("Search Results for '{}'", query));
        }
        Command::Details { url } => {
            let details = scraper.anime_details(&url).await;
            menu::display_anime_details(details.as_ref());
        }
        Command::Stats => {
            let stats = scraper.statistics().await;
            menu::display_statistics(&stats);
        }
        Command::Dump { output } => {
            let dump = serde_json::json!({
                "home": scraper.home().await,
                "list": scraper.anime_list(None).await,
                "statistics": scraper.statistics().await,
            });
            let content = serde_json::to_string_pretty(&dump).context("Failed to serialize results")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Results written");
                }
                None => println!("{}", content),
            }
        }
    }

    info!("Meownime scraper finished");
    Ok(())
}
