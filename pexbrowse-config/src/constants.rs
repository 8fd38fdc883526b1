use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.pexels.com/";
pub const DEFAULT_ASSETS_PER_PAGE: u32 = 15;
/// Upper bound the provider accepts for `per_page`.
pub const MAX_ASSETS_PER_PAGE: u32 = 80;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_KEY: &str = "PEXELS_API_KEY";
pub const ENV_API_BASE_URL: &str = "PEXBROWSE_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "PEXBROWSE_REQUEST_TIMEOUT";
pub const ENV_ASSETS_PER_PAGE: &str = "PEXBROWSE_ASSETS_PER_PAGE";
pub const ENV_AUTHOR_CREDITS: &str = "PEXBROWSE_AUTHOR_CREDITS";
pub const ENV_DEBOUNCE: &str = "PEXBROWSE_DEBOUNCE";

/// Every variable the loader reads, in lookup order.
pub const ENV_KEYS: [&str; 6] = [
    ENV_API_KEY,
    ENV_API_BASE_URL,
    ENV_REQUEST_TIMEOUT,
    ENV_ASSETS_PER_PAGE,
    ENV_AUTHOR_CREDITS,
    ENV_DEBOUNCE,
];
