//! Pexels provider over `reqwest`.
//!
//! [Pexels API documentation](https://www.pexels.com/api/documentation/)

use async_trait::async_trait;
use pexbrowse_config::{ApiKey, ProviderSettings};
use pexbrowse_model::{
    Asset, AssetId, Photo, PhotoSources, Video, VideoFile, VideoPicture,
    VideoQuality, VideoUser,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::traits::{
    AssetPage, CuratedPhotoOptions, MediaProvider, Paging, PhotoSearchOptions,
    PopularVideoOptions, ProviderError, VideoSearchOptions,
};

const SEARCH_PHOTOS: &str = "v1/search";
const CURATED_PHOTOS: &str = "v1/curated";
const PHOTO_BY_ID: &str = "v1/photos/";
const SEARCH_VIDEOS: &str = "videos/search";
const POPULAR_VIDEOS: &str = "videos/popular";
const VIDEO_BY_ID: &str = "videos/videos/";

/// Longest upstream error body kept in [`ProviderError::Api`].
const MAX_ERROR_BODY: usize = 512;

type QueryParams = Vec<(&'static str, String)>;

/// Pexels photo and video endpoints.
///
/// Built once from [`ProviderSettings`] at startup. A provider without a key
/// can be constructed; every call then fails with
/// [`ProviderError::NotConfigured`] before touching the network.
#[derive(Debug, Clone)]
pub struct PexelsProvider {
    api_key: Option<ApiKey>,
    base_url: Url,
    client: Client,
}

impl PexelsProvider {
    /// Client for the configured endpoint. A missing key is allowed here and
    /// reported on first use.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            client,
        })
    }

    /// Provider against an alternative host, e.g. a local HTTP double.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Self::new(&ProviderSettings {
            api_key: ApiKey::new(api_key),
            base_url,
            ..ProviderSettings::default()
        })
    }

    /// Whether an API key is set.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ProviderError> {
        let api_key =
            self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let url = self.base_url.join(path)?;

        debug!(endpoint = path, ?params, "pexels request");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, api_key.expose())
            .query(params)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ProviderError::InvalidApiKey);
            }
            StatusCode::NOT_FOUND => return Err(ProviderError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(ProviderError::RateLimited);
            }
            status if !status.is_success() => {
                let mut message = response.text().await.unwrap_or_default();
                if message.len() > MAX_ERROR_BODY {
                    let cut = (0..=MAX_ERROR_BODY)
                        .rev()
                        .find(|idx| message.is_char_boundary(*idx))
                        .unwrap_or(0);
                    message.truncate(cut);
                }
                return Err(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn paging_params(paging: Paging) -> QueryParams {
    let paging = paging.clamped();
    vec![
        ("page", paging.page.to_string()),
        ("per_page", paging.per_page.to_string()),
    ]
}

/// Push `key=value` only when the value is set.
fn push_opt<T: ToString>(params: &mut QueryParams, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

#[async_trait]
impl MediaProvider for PexelsProvider {
    async fn search_photos(
        &self,
        query: &str,
        options: &PhotoSearchOptions,
    ) -> Result<AssetPage, ProviderError> {
        let mut params = vec![("query", query.to_string())];
        params.extend(paging_params(options.paging));
        push_opt(&mut params, "orientation", options.orientation);
        push_opt(&mut params, "color", options.color.as_ref());
        push_opt(&mut params, "size", options.size);
        push_opt(&mut params, "locale", options.locale);

        let page: PexelsPhotoPage = self.get_json(SEARCH_PHOTOS, &params).await?;
        info!(query, total = page.total_results, "pexels photo search");
        Ok(page.into())
    }

    async fn curated_photos(
        &self,
        options: &CuratedPhotoOptions,
    ) -> Result<AssetPage, ProviderError> {
        let mut params = paging_params(options.paging);
        push_opt(&mut params, "orientation", options.orientation);
        push_opt(&mut params, "color", options.color.as_ref());

        let page: PexelsPhotoPage =
            self.get_json(CURATED_PHOTOS, &params).await?;
        Ok(page.into())
    }

    async fn photo(&self, id: AssetId) -> Result<Photo, ProviderError> {
        let path = format!("{PHOTO_BY_ID}{id}");
        let photo: PexelsPhoto = self.get_json(&path, &[]).await?;
        Ok(photo.into())
    }

    async fn search_videos(
        &self,
        query: &str,
        options: &VideoSearchOptions,
    ) -> Result<AssetPage, ProviderError> {
        let mut params = vec![("query", query.to_string())];
        params.extend(paging_params(options.paging));
        push_opt(&mut params, "orientation", options.orientation);
        push_opt(&mut params, "size", options.size);
        push_opt(&mut params, "locale", options.locale);
        push_opt(&mut params, "min_duration", options.min_duration);
        push_opt(&mut params, "max_duration", options.max_duration);

        let page: PexelsVideoPage = self.get_json(SEARCH_VIDEOS, &params).await?;
        info!(query, total = page.total_results, "pexels video search");
        Ok(page.into())
    }

    async fn popular_videos(
        &self,
        options: &PopularVideoOptions,
    ) -> Result<AssetPage, ProviderError> {
        let mut params = paging_params(options.paging);
        push_opt(&mut params, "min_width", options.min_width);
        push_opt(&mut params, "min_height", options.min_height);
        push_opt(&mut params, "min_duration", options.min_duration);
        push_opt(&mut params, "max_duration", options.max_duration);

        let page: PexelsVideoPage =
            self.get_json(POPULAR_VIDEOS, &params).await?;
        Ok(page.into())
    }

    async fn video(&self, id: AssetId) -> Result<Video, ProviderError> {
        let path = format!("{VIDEO_BY_ID}{id}");
        let video: PexelsVideo = self.get_json(&path, &[]).await?;
        Ok(video.into())
    }

    fn name(&self) -> &'static str {
        "Pexels"
    }
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoPage {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoPage {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    url: String,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    photographer_url: String,
    photographer_id: Option<u64>,
    avg_color: Option<String>,
    #[serde(default)]
    src: PexelsPhotoSrc,
    alt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PexelsPhotoSrc {
    original: String,
    large2x: String,
    large: String,
    medium: String,
    small: String,
    portrait: String,
    landscape: String,
    tiny: String,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    url: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    duration: u32,
    #[serde(default)]
    user: PexelsVideoUser,
    // Always present on videos; its absence means the payload is not a video.
    video_files: Vec<PexelsVideoFile>,
    #[serde(default)]
    video_pictures: Vec<PexelsVideoPicture>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PexelsVideoUser {
    id: u64,
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoFile {
    id: u64,
    quality: Option<String>,
    #[serde(default)]
    file_type: String,
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<f32>,
    link: String,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoPicture {
    id: u64,
    picture: String,
    #[serde(default)]
    nr: u32,
}

impl From<PexelsPhotoPage> for AssetPage {
    fn from(page: PexelsPhotoPage) -> Self {
        AssetPage {
            items: page
                .photos
                .into_iter()
                .map(|photo| Asset::Photo(photo.into()))
                .collect(),
            total_results: page.total_results,
        }
    }
}

impl From<PexelsVideoPage> for AssetPage {
    fn from(page: PexelsVideoPage) -> Self {
        AssetPage {
            items: page
                .videos
                .into_iter()
                .map(|video| Asset::Video(video.into()))
                .collect(),
            total_results: page.total_results,
        }
    }
}

impl From<PexelsPhoto> for Photo {
    fn from(photo: PexelsPhoto) -> Self {
        let src = photo.src;
        Photo {
            id: AssetId(photo.id),
            width: photo.width,
            height: photo.height,
            url: photo.url,
            photographer: photo.photographer,
            photographer_url: photo.photographer_url,
            photographer_id: photo.photographer_id,
            avg_color: photo.avg_color,
            src: PhotoSources {
                original: src.original,
                large2x: src.large2x,
                large: src.large,
                medium: src.medium,
                small: src.small,
                portrait: src.portrait,
                landscape: src.landscape,
                tiny: src.tiny,
            },
            alt: photo.alt.unwrap_or_default(),
        }
    }
}

impl From<PexelsVideo> for Video {
    fn from(video: PexelsVideo) -> Self {
        Video {
            id: AssetId(video.id),
            width: video.width,
            height: video.height,
            url: video.url,
            image: video.image,
            duration: video.duration,
            user: VideoUser {
                id: video.user.id,
                name: video.user.name,
                url: video.user.url,
            },
            video_files: video
                .video_files
                .into_iter()
                .map(|file| VideoFile {
                    id: file.id,
                    quality: file
                        .quality
                        .as_deref()
                        .and_then(|raw| raw.parse::<VideoQuality>().ok()),
                    file_type: file.file_type,
                    width: file.width,
                    height: file.height,
                    fps: file.fps,
                    link: file.link,
                })
                .collect(),
            video_pictures: video
                .video_pictures
                .into_iter()
                .map(|picture| VideoPicture {
                    id: picture.id,
                    picture: picture.picture,
                    nr: picture.nr,
                })
                .collect(),
        }
    }
}
