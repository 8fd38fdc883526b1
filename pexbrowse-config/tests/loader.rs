use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use pexbrowse_config::{ConfigLoadError, ConfigLoader, EnvConfig, Settings};
use tempfile::tempdir;

fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn defaults_apply_without_any_layers() {
    let load = ConfigLoader::new()
        .load_with_env(EnvConfig::default())
        .expect("load");

    assert_eq!(load.settings, Settings::default());
    assert!(!load.settings.provider.is_configured());
    assert_eq!(load.settings.library.assets_per_page, 15);
    assert!(load.settings.library.add_author_credits);
    assert_eq!(load.settings.library.debounce, Duration::from_millis(300));
    assert_eq!(
        load.settings.provider.base_url.as_str(),
        "https://api.pexels.com/"
    );
    assert!(load.metadata.config_path.is_none());
    assert!(load.metadata.env_overrides.is_empty());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pexbrowse.toml");
    fs::write(
        &path,
        r#"
[provider]
api_key = "file-key"
request_timeout = "5s"

[library]
assets_per_page = 24
add_author_credits = false
debounce = "150ms"
"#,
    )
    .expect("write config");

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(EnvConfig::default())
        .expect("load");

    let settings = load.settings;
    assert_eq!(
        settings.provider.api_key.as_ref().map(|k| k.expose()),
        Some("file-key")
    );
    assert_eq!(settings.provider.request_timeout, Duration::from_secs(5));
    assert_eq!(settings.library.assets_per_page, 24);
    assert!(!settings.library.add_author_credits);
    assert_eq!(settings.library.debounce, Duration::from_millis(150));
    assert_eq!(load.metadata.config_path.as_deref(), Some(path.as_path()));
}

#[test]
fn environment_overrides_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pexbrowse.toml");
    fs::write(&path, "[library]\nassets_per_page = 24\n").expect("write");

    let env = env_from(&[
        ("PEXELS_API_KEY", "env-key"),
        ("PEXBROWSE_ASSETS_PER_PAGE", "40"),
        ("PEXBROWSE_AUTHOR_CREDITS", "off"),
        ("PEXBROWSE_DEBOUNCE", "500"),
        ("PEXBROWSE_API_BASE_URL", "http://127.0.0.1:8080"),
    ]);

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env)
        .expect("load");

    let settings = load.settings;
    assert_eq!(
        settings.provider.api_key.as_ref().map(|k| k.expose()),
        Some("env-key")
    );
    assert_eq!(settings.library.assets_per_page, 40);
    assert!(!settings.library.add_author_credits);
    assert_eq!(settings.library.debounce, Duration::from_millis(500));
    assert_eq!(settings.provider.base_url.as_str(), "http://127.0.0.1:8080/");
    assert!(load.metadata.env_overrides.contains(&"PEXELS_API_KEY"));
    assert_eq!(load.metadata.env_overrides.len(), 5);
}

#[test]
fn explicit_api_key_wins() {
    let env = env_from(&[("PEXELS_API_KEY", "env-key")]);
    let load = ConfigLoader::new()
        .with_api_key("flag-key")
        .load_with_env(env)
        .expect("load");

    assert_eq!(
        load.settings.provider.api_key.as_ref().map(|k| k.expose()),
        Some("flag-key")
    );
}

#[test]
fn blank_env_values_are_ignored() {
    let env = env_from(&[("PEXELS_API_KEY", "   "), ("PEXBROWSE_DEBOUNCE", "")]);
    let load = ConfigLoader::new().load_with_env(env).expect("load");

    assert!(load.settings.provider.api_key.is_none());
    assert_eq!(load.settings.library.debounce, Duration::from_millis(300));
}

#[test]
fn invalid_values_are_reported() {
    let out_of_range = ConfigLoader::new()
        .load_with_env(env_from(&[("PEXBROWSE_ASSETS_PER_PAGE", "81")]));
    assert!(matches!(
        out_of_range,
        Err(ConfigLoadError::AssetsPerPageOutOfRange { value: 81, max: 80 })
    ));

    let not_a_number = ConfigLoader::new()
        .load_with_env(env_from(&[("PEXBROWSE_ASSETS_PER_PAGE", "many")]));
    assert!(matches!(
        not_a_number,
        Err(ConfigLoadError::InvalidNumber { .. })
    ));

    let bad_duration = ConfigLoader::new()
        .load_with_env(env_from(&[("PEXBROWSE_DEBOUNCE", "quickly")]));
    assert!(matches!(
        bad_duration,
        Err(ConfigLoadError::InvalidDuration { key: "PEXBROWSE_DEBOUNCE", .. })
    ));

    let bad_bool = ConfigLoader::new()
        .load_with_env(env_from(&[("PEXBROWSE_AUTHOR_CREDITS", "sometimes")]));
    assert!(matches!(bad_bool, Err(ConfigLoadError::InvalidBool { .. })));
}

#[test]
fn unknown_file_keys_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pexbrowse.toml");
    fs::write(&path, "[library]\nitems_per_page = 10\n").expect("write");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(EnvConfig::default());

    assert!(matches!(result, Err(ConfigLoadError::ParseFile { .. })));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let result = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load_with_env(EnvConfig::default());

    assert!(matches!(result, Err(ConfigLoadError::ReadFile { .. })));
}

#[test]
fn env_file_is_merged_into_process_env() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".env");
    fs::write(&path, "PEXBROWSE_REQUEST_TIMEOUT=7s\n").expect("write");

    let load = ConfigLoader::new()
        .with_env_file(&path)
        .load()
        .expect("load");

    assert!(load.metadata.env_file_loaded);
    assert_eq!(
        load.settings.provider.request_timeout,
        Duration::from_secs(7)
    );
}
