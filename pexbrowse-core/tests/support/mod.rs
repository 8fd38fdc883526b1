//! Scripted provider and engine bootstrap shared by the engine tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pexbrowse_config::LibrarySettings;
use pexbrowse_core::providers::{
    AssetPage, CuratedPhotoOptions, MediaProvider, PhotoSearchOptions,
    PopularVideoOptions, ProviderError, VideoSearchOptions,
};
use pexbrowse_core::{
    Gateway, LibraryEngine, LibraryHandle, LibraryOptions, PexelsAssetMapper,
};
use pexbrowse_model::{
    Asset, AssetId, MediaType, Photo, PhotoSources, Video, VideoFile,
    VideoPicture, VideoQuality, VideoUser,
};

/// One upstream request as the provider saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Curated(CuratedPhotoOptions),
    SearchPhotos(String, PhotoSearchOptions),
    Popular(PopularVideoOptions),
    SearchVideos(String, VideoSearchOptions),
    Photo(AssetId),
    Video(AssetId),
}

/// Canned page for one `(media type, query)` pair.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    ids: Vec<u64>,
    total: u64,
    delay: Duration,
}

impl Reply {
    pub fn items(ids: impl IntoIterator<Item = u64>, total: u64) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            total,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    pages: HashMap<(MediaType, String), Reply>,
    failures: HashMap<(MediaType, String), u32>,
    photos: HashMap<AssetId, Photo>,
    videos: HashMap<AssetId, Video>,
}

/// In-memory [`MediaProvider`] that records every call.
///
/// Unscripted queries answer with an empty page; by-id lookups of
/// unregistered assets answer [`ProviderError::NotFound`].
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, media_type: MediaType, query: &str, reply: Reply) -> Self {
        self.script
            .lock()
            .unwrap()
            .pages
            .insert((media_type, query.to_string()), reply);
        self
    }

    /// Fail the next `times` requests for `query` with an HTTP 500.
    pub fn fail(self, media_type: MediaType, query: &str, times: u32) -> Self {
        self.script
            .lock()
            .unwrap()
            .failures
            .insert((media_type, query.to_string()), times);
        self
    }

    pub fn with_photo(self, id: u64) -> Self {
        self.script
            .lock()
            .unwrap()
            .photos
            .insert(AssetId(id), photo(id));
        self
    }

    pub fn with_video(self, id: u64) -> Self {
        self.script
            .lock()
            .unwrap()
            .videos
            .insert(AssetId(id), video(id));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn page_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Photo(_) | Call::Video(_)))
            .collect()
    }

    async fn answer(
        &self,
        call: Call,
        media_type: MediaType,
        query: &str,
    ) -> Result<AssetPage, ProviderError> {
        let key = (media_type, query.to_string());
        let (reply, fail) = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(call);
            let fail = match script.failures.get_mut(&key) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            };
            (script.pages.get(&key).cloned().unwrap_or_default(), fail)
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        if fail {
            return Err(ProviderError::Api {
                status: 500,
                message: "upstream exploded".into(),
            });
        }

        let items = reply
            .ids
            .iter()
            .map(|&id| match media_type {
                MediaType::Photo => Asset::Photo(photo(id)),
                MediaType::Video => Asset::Video(video(id)),
            })
            .collect();
        Ok(AssetPage {
            items,
            total_results: reply.total,
        })
    }
}

#[async_trait]
impl MediaProvider for ScriptedProvider {
    async fn search_photos(
        &self,
        query: &str,
        options: &PhotoSearchOptions,
    ) -> Result<AssetPage, ProviderError> {
        let call = Call::SearchPhotos(query.to_string(), options.clone());
        self.answer(call, MediaType::Photo, query).await
    }

    async fn curated_photos(
        &self,
        options: &CuratedPhotoOptions,
    ) -> Result<AssetPage, ProviderError> {
        self.answer(Call::Curated(options.clone()), MediaType::Photo, "")
            .await
    }

    async fn photo(&self, id: AssetId) -> Result<Photo, ProviderError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Photo(id));
        script.photos.get(&id).cloned().ok_or(ProviderError::NotFound)
    }

    async fn search_videos(
        &self,
        query: &str,
        options: &VideoSearchOptions,
    ) -> Result<AssetPage, ProviderError> {
        let call = Call::SearchVideos(query.to_string(), options.clone());
        self.answer(call, MediaType::Video, query).await
    }

    async fn popular_videos(
        &self,
        options: &PopularVideoOptions,
    ) -> Result<AssetPage, ProviderError> {
        self.answer(Call::Popular(options.clone()), MediaType::Video, "")
            .await
    }

    async fn video(&self, id: AssetId) -> Result<Video, ProviderError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Video(id));
        script.videos.get(&id).cloned().ok_or(ProviderError::NotFound)
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}

pub fn photo(id: u64) -> Photo {
    let src = |variant: &str| {
        format!("https://images.pexels.com/photos/{id}/{variant}.jpeg")
    };
    Photo {
        id: AssetId(id),
        width: 4000,
        height: 3000,
        url: format!("https://www.pexels.com/photo/{id}/"),
        photographer: "Ana Costa".into(),
        photographer_url: "https://www.pexels.com/@ana".into(),
        photographer_id: Some(9),
        avg_color: Some("#978E82".into()),
        src: PhotoSources {
            original: src("original"),
            large2x: src("large2x"),
            large: src("large"),
            medium: src("medium"),
            small: src("small"),
            portrait: src("portrait"),
            landscape: src("landscape"),
            tiny: src("tiny"),
        },
        alt: format!("Mountain lake {id}"),
    }
}

pub fn video(id: u64) -> Video {
    Video {
        id: AssetId(id),
        width: 1920,
        height: 1080,
        url: format!("https://www.pexels.com/video/{id}/"),
        image: format!("https://images.pexels.com/videos/{id}/thumb.jpeg"),
        duration: 14,
        user: VideoUser {
            id: 3,
            name: "Kai".into(),
            url: "https://www.pexels.com/@kai".into(),
        },
        video_files: vec![
            VideoFile {
                id: id * 10,
                quality: Some(VideoQuality::Sd),
                file_type: "video/mp4".into(),
                width: Some(640),
                height: Some(360),
                fps: Some(25.0),
                link: format!("https://videos.pexels.com/{id}/sd.mp4"),
            },
            VideoFile {
                id: id * 10 + 1,
                quality: Some(VideoQuality::Hd),
                file_type: "video/mp4".into(),
                width: Some(1920),
                height: Some(1080),
                fps: Some(25.0),
                link: format!("https://videos.pexels.com/{id}/hd.mp4"),
            },
        ],
        video_pictures: vec![VideoPicture {
            id: 1,
            picture: format!("https://images.pexels.com/videos/{id}/0.jpeg"),
            nr: 0,
        }],
    }
}

pub fn start(provider: &ScriptedProvider, options: LibraryOptions) -> LibraryHandle {
    start_with(
        Gateway::new(Arc::new(provider.clone())),
        options,
    )
}

pub fn start_with(gateway: Gateway, options: LibraryOptions) -> LibraryHandle {
    start_with_settings(gateway, &LibrarySettings::default(), options)
}

pub fn start_with_settings(
    gateway: Gateway,
    settings: &LibrarySettings,
    options: LibraryOptions,
) -> LibraryHandle {
    LibraryEngine::spawn(gateway, Arc::new(PexelsAssetMapper), settings, options)
}
