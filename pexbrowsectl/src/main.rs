//! `pexbrowsectl`: browse, inspect and select Pexels assets from a terminal.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pexbrowse_config::{ConfigLoad, ConfigLoader};
use pexbrowse_model::{
    ColorFilter, Locale, Orientation, PhotoSize, SizeFilter, VideoQuality,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pexbrowsectl",
    version,
    about = "Browse and select Pexels stock media"
)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Env file merged into the environment before loading
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    /// Pexels API key; overrides PEXELS_API_KEY and the settings file
    #[arg(long, global = true)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search (or page through the curated/popular feed) and list results
    Browse(BrowseArgs),
    /// Look a single asset up by id
    Show {
        id: u64,
        /// Treat the id as a video id
        #[arg(long)]
        video: bool,
        /// Print the raw asset as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select an asset and print the record handed to the asset store
    Select {
        id: u64,
        #[arg(long)]
        video: bool,
        /// Photo size variant (original, large2x, large, medium, small, ...)
        #[arg(long)]
        size: Option<PhotoSize>,
        /// Video quality (sd, hd, uhd)
        #[arg(long)]
        quality: Option<VideoQuality>,
        /// Leave the author credit out of the description
        #[arg(long)]
        no_credits: bool,
    },
}

#[derive(Args)]
struct BrowseArgs {
    /// Free-text search; omit for the curated photo / popular video feed
    query: Option<String>,
    #[arg(long)]
    video: bool,
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// landscape, portrait or square
    #[arg(long)]
    orientation: Option<Orientation>,
    /// Named colour or #rrggbb (photos only)
    #[arg(long)]
    color: Option<ColorFilter>,
    /// large, medium or small
    #[arg(long)]
    size: Option<SizeFilter>,
    /// Search locale, e.g. en-US
    #[arg(long)]
    locale: Option<Locale>,
    /// Print the result page as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(cli: &Cli) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    if let Some(key) = &cli.api_key {
        loader = loader.with_api_key(key);
    }
    loader.load().context("failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ConfigLoad { settings, metadata } = load_config(&cli)?;
    debug!(?metadata, "settings resolved");

    match cli.command {
        Command::Browse(args) => commands::browse(&settings, args).await,
        Command::Show { id, video, json } => {
            commands::show(&settings, id, video, json).await
        }
        Command::Select {
            id,
            video,
            size,
            quality,
            no_credits,
        } => {
            commands::select(&settings, id, video, size, quality, no_credits)
                .await
        }
    }
}
