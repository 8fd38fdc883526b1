//! Provider and gateway behaviour against a local HTTP double.

use pexbrowse_core::gateway::Gateway;
use pexbrowse_core::library::{FetchPlan, QueryState};
use pexbrowse_core::providers::{
    CuratedPhotoOptions, MediaProvider, Paging, PexelsProvider,
    PhotoSearchOptions, PopularVideoOptions, ProviderError, VideoSearchOptions,
};
use pexbrowse_model::{
    Asset, AssetId, ColorFilter, MediaType, NamedColor, Orientation,
    SizeFilter, VideoQuality,
};
use serde_json::{Value, json};
use wiremock::matchers::{
    header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn photo_json(id: u64) -> Value {
    json!({
        "id": id,
        "width": 4000,
        "height": 3000,
        "url": format!("https://www.pexels.com/photo/{id}/"),
        "photographer": "Ana",
        "photographer_url": "https://www.pexels.com/@ana",
        "photographer_id": 9,
        "avg_color": "#978E82",
        "src": {
            "original": format!("https://images.pexels.com/photos/{id}/original.jpeg"),
            "large2x": format!("https://images.pexels.com/photos/{id}/large2x.jpeg"),
            "large": format!("https://images.pexels.com/photos/{id}/large.jpeg"),
            "medium": format!("https://images.pexels.com/photos/{id}/medium.jpeg"),
            "small": format!("https://images.pexels.com/photos/{id}/small.jpeg"),
            "portrait": format!("https://images.pexels.com/photos/{id}/portrait.jpeg"),
            "landscape": format!("https://images.pexels.com/photos/{id}/landscape.jpeg"),
            "tiny": format!("https://images.pexels.com/photos/{id}/tiny.jpeg")
        },
        "liked": false,
        "alt": format!("Mountain view {id}")
    })
}

fn video_json(id: u64) -> Value {
    json!({
        "id": id,
        "width": 1920,
        "height": 1080,
        "url": format!("https://www.pexels.com/video/{id}/"),
        "image": format!("https://images.pexels.com/videos/{id}/thumb.jpeg"),
        "duration": 12,
        "user": { "id": 1, "name": "Kai", "url": "https://www.pexels.com/@kai" },
        "video_files": [
            { "id": 1, "quality": "sd", "file_type": "video/mp4", "width": 640, "height": 360, "fps": 25.0, "link": "https://player.vimeo.com/sd.mp4" },
            { "id": 2, "quality": "hd", "file_type": "video/mp4", "width": 1920, "height": 1080, "fps": 25.0, "link": "https://player.vimeo.com/hd.mp4" }
        ],
        "video_pictures": [ { "id": 1, "picture": "https://images.pexels.com/videos/pic-0.jpeg", "nr": 0 } ]
    })
}

fn photo_page(ids: std::ops::RangeInclusive<u64>, total: u64) -> Value {
    json!({
        "page": 1,
        "per_page": 15,
        "photos": ids.map(photo_json).collect::<Vec<_>>(),
        "total_results": total
    })
}

fn provider(server: &MockServer) -> PexelsProvider {
    PexelsProvider::with_base_url(KEY, &server.uri()).expect("provider")
}

#[tokio::test]
async fn photo_search_sends_only_set_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("Authorization", KEY))
        .and(query_param("query", "mountains"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "15"))
        .and(query_param_is_missing("orientation"))
        .and(query_param_is_missing("color"))
        .and(query_param_is_missing("size"))
        .and(query_param_is_missing("locale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_page(1..=12, 42)))
        .expect(1)
        .mount(&server)
        .await;

    let page = provider(&server)
        .search_photos("mountains", &PhotoSearchOptions::default())
        .await
        .expect("search");

    assert_eq!(page.items.len(), 12);
    assert_eq!(page.total_results, 42);
    let first = page.items[0].as_photo().expect("photo");
    assert_eq!(first.id, AssetId(1));
    assert_eq!(first.alt, "Mountain view 1");
    assert_eq!(first.avg_color.as_deref(), Some("#978E82"));
}

#[tokio::test]
async fn photo_search_forwards_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("query", "sea"))
        .and(query_param("page", "3"))
        .and(query_param("per_page", "80"))
        .and(query_param("orientation", "portrait"))
        .and(query_param("color", "red"))
        .and(query_param("size", "large"))
        .and(query_param("locale", "pt-BR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_page(1..=1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let options = PhotoSearchOptions {
        paging: Paging::new(3, 200),
        orientation: Some(Orientation::Portrait),
        color: Some(ColorFilter::Named(NamedColor::Red)),
        size: Some(SizeFilter::Large),
        locale: "pt-BR".parse().ok(),
    };
    let page = provider(&server)
        .search_photos("sea", &options)
        .await
        .expect("search");
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn curated_and_popular_feeds_use_their_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/curated"))
        .and(query_param_is_missing("query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_page(1..=2, 8000)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos/popular"))
        .and(query_param("min_duration", "5"))
        .and(query_param_is_missing("min_width"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "per_page": 15,
            "videos": [video_json(5), video_json(6)],
            "total_results": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server);
    let curated = provider
        .curated_photos(&CuratedPhotoOptions::default())
        .await
        .expect("curated");
    assert_eq!(curated.total_results, 8000);
    assert!(curated.items.iter().all(|a| a.media_type() == MediaType::Photo));

    let popular = provider
        .popular_videos(&PopularVideoOptions {
            min_duration: Some(5),
            ..PopularVideoOptions::default()
        })
        .await
        .expect("popular");
    assert_eq!(popular.items.len(), 2);
    let video = popular.items[0].as_video().expect("video");
    assert_eq!(video.user.name, "Kai");
    assert_eq!(
        video.best_file().and_then(|f| f.quality),
        Some(VideoQuality::Hd)
    );
}

#[tokio::test]
async fn video_search_never_sends_color() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .and(query_param("query", "waves"))
        .and(query_param("orientation", "landscape"))
        .and(query_param_is_missing("color"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "videos": [video_json(77)],
            "total_results": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = provider(&server)
        .search_videos(
            "waves",
            &VideoSearchOptions {
                orientation: Some(Orientation::Landscape),
                ..VideoSearchOptions::default()
            },
        )
        .await
        .expect("video search");
    assert!(matches!(&page.items[0], Asset::Video(v) if v.id == AssetId(77)));
}

#[tokio::test]
async fn http_statuses_map_to_provider_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/photos/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/photos/2"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/photos/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/photos/4"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/photos/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let provider = provider(&server);
    assert!(matches!(provider.photo(AssetId(1)).await, Err(ProviderError::InvalidApiKey)));
    assert!(matches!(provider.photo(AssetId(2)).await, Err(ProviderError::RateLimited)));
    assert!(matches!(provider.photo(AssetId(3)).await, Err(ProviderError::NotFound)));
    match provider.photo(AssetId(4)).await {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert!(matches!(provider.photo(AssetId(5)).await, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn gateway_normalizes_failures_to_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/curated"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"photos\": 12}"))
        .mount(&server)
        .await;

    let gateway = Gateway::from_provider(provider(&server));

    let failed = gateway
        .search_photos("cats", &PhotoSearchOptions::default())
        .await;
    assert!(failed.value.is_empty());
    assert_eq!(failed.value.total_results, 0);
    assert!(matches!(failed.failure, Some(ProviderError::Api { status: 500, .. })));

    let malformed = gateway.curated_photos(&CuratedPhotoOptions::default()).await;
    assert!(malformed.value.is_empty());
    assert!(matches!(malformed.failure, Some(ProviderError::Parse(_))));
}

#[tokio::test]
async fn gateway_lookup_maps_not_found_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/videos/999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_json(999)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/photos/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = Gateway::from_provider(provider(&server));

    let found = gateway.asset_by_id(AssetId(999), MediaType::Video).await;
    assert!(found.failure.is_none());
    assert_eq!(found.value.map(|asset| asset.id()), Some(AssetId(999)));

    let missing = gateway.asset_by_id(AssetId(404), MediaType::Photo).await;
    assert!(missing.failure.is_none());
    assert!(missing.value.is_none());
}

#[tokio::test]
async fn executing_a_plan_hits_the_routed_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("query", "mountains"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_page(1..=12, 42)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = Gateway::from_provider(provider(&server));
    let plan = FetchPlan::for_state(&QueryState::new(MediaType::Photo, "mountains"), 15);
    let fetched = gateway.execute(&plan).await;

    assert!(!fetched.is_failure());
    assert_eq!(fetched.value.items.len(), 12);
    assert_eq!(fetched.value.total_results, 42);
}

#[tokio::test]
async fn missing_api_key_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_page(1..=1, 1)))
        .expect(0)
        .mount(&server)
        .await;

    let provider = PexelsProvider::with_base_url("", &server.uri()).expect("provider");
    assert!(!provider.is_configured());

    let gateway = Gateway::from_provider(provider);
    let fetched = gateway.curated_photos(&CuratedPhotoOptions::default()).await;

    assert!(fetched.value.is_empty());
    assert!(matches!(fetched.failure, Some(ProviderError::NotConfigured)));
}
