use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use pexbrowse_config::{LibrarySettings, Settings};
use pexbrowse_core::{
    Gateway, LibraryEngine, LibraryHandle, LibraryMode, LibraryOptions,
    LibrarySnapshot, PexelsAssetMapper, PexelsProvider,
};
use pexbrowse_model::{
    Asset, AssetId, FilterSetting, MediaType, PhotoSize, RenditionKey,
    VideoQuality,
};
use tracing::warn;

use crate::BrowseArgs;

fn gateway(settings: &Settings) -> Result<Gateway> {
    let provider = PexelsProvider::new(&settings.provider)
        .context("failed to build the Pexels client")?;
    Ok(Gateway::from_provider(provider))
}

fn spawn_library(
    settings: &Settings,
    library: &LibrarySettings,
    options: LibraryOptions,
) -> Result<LibraryHandle> {
    Ok(LibraryEngine::spawn(
        gateway(settings)?,
        Arc::new(PexelsAssetMapper),
        library,
        options,
    ))
}

fn media_type(video: bool) -> MediaType {
    if video { MediaType::Video } else { MediaType::Photo }
}

pub async fn browse(settings: &Settings, args: BrowseArgs) -> Result<()> {
    let handle = spawn_library(
        settings,
        &settings.library,
        LibraryOptions {
            initial_search: args.query.unwrap_or_default(),
            ..LibraryOptions::default()
        },
    )?;

    if args.video {
        handle.set_media_type(MediaType::Video)?;
    }

    let filters = [
        args.orientation.map(|o| FilterSetting::Orientation(Some(o))),
        args.color.map(|c| FilterSetting::Color(Some(c))),
        args.size.map(|s| FilterSetting::Size(Some(s))),
        args.locale.map(|l| FilterSetting::Locale(Some(l))),
    ];
    let mut requested = Vec::new();
    for setting in filters.into_iter().flatten() {
        requested.push(setting.dimension());
        handle.set_filter(setting)?;
    }
    if args.page > 1 {
        handle.set_page(args.page)?;
    }

    let snapshot = handle.settled().await?;
    if let Some(error) = &snapshot.error {
        bail!("{error}");
    }
    for dimension in requested {
        if !snapshot.filters.is_enabled(dimension) {
            warn!(filter = %dimension, "filter ignored for this query");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(snapshot.items.as_slice())?);
    } else {
        print_page(&snapshot);
    }
    Ok(())
}

fn print_page(snapshot: &LibrarySnapshot) {
    if snapshot.items.is_empty() {
        println!("No {} found.", snapshot.media_type.plural());
    }
    for asset in snapshot.items.iter() {
        println!("{}", summary_line(asset));
    }
    println!(
        "Page {} of {} | Total: {} items",
        snapshot.page,
        snapshot.total_pages().max(1),
        snapshot.total_results
    );
}

fn summary_line(asset: &Asset) -> String {
    let label = match asset {
        Asset::Photo(photo) if !photo.alt.trim().is_empty() => photo.alt.clone(),
        Asset::Photo(_) => String::new(),
        Asset::Video(video) => format!("{}s", video.duration),
    };
    format!(
        "{:>10}  {:<5}  {:>5}x{:<5}  {}  {}",
        asset.id(),
        asset.media_type().as_str(),
        asset.width(),
        asset.height(),
        asset.author(),
        label
    )
}

pub async fn show(
    settings: &Settings,
    id: u64,
    video: bool,
    json: bool,
) -> Result<()> {
    let asset = lookup(settings, id, video).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&asset)?);
        return Ok(());
    }

    println!("{}", summary_line(&asset));
    println!("Page:   {}", asset.page_url());
    match &asset {
        Asset::Photo(photo) => {
            for size in PhotoSize::ALL {
                println!("{:<10} {}", size.as_str(), photo.source_url(size));
            }
        }
        Asset::Video(video) => {
            for file in &video.video_files {
                let quality =
                    file.quality.map(|q| q.as_str()).unwrap_or("unknown");
                println!(
                    "{:<10} {}x{} {}",
                    quality,
                    file.width.unwrap_or(0),
                    file.height.unwrap_or(0),
                    file.link
                );
            }
        }
    }
    Ok(())
}

async fn lookup(settings: &Settings, id: u64, video: bool) -> Result<Asset> {
    let media_type = media_type(video);
    gateway(settings)?
        .asset_by_id(AssetId(id), media_type)
        .await
        .into_result()
        .with_context(|| format!("failed to look up {media_type} {id}"))?
        .ok_or_else(|| anyhow!("{media_type} {id} does not exist"))
}

pub async fn select(
    settings: &Settings,
    id: u64,
    video: bool,
    size: Option<PhotoSize>,
    quality: Option<VideoQuality>,
    no_credits: bool,
) -> Result<()> {
    let asset = lookup(settings, id, video).await?;

    let library = LibrarySettings {
        add_author_credits: !no_credits,
        ..settings.library.clone()
    };
    let handle = spawn_library(
        settings,
        &library,
        LibraryOptions {
            mode: LibraryMode::Parameter,
            skip_initial_fetch: true,
            ..LibraryOptions::default()
        },
    )?;

    let rendition = if video {
        quality.map(RenditionKey::Quality)
    } else {
        size.map(RenditionKey::Size)
    };
    let record = handle.select(asset, rendition).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
