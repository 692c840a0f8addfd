// src/config.rs
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Number of entries returned by the popularity ranking when the
    /// caller does not pass a limit (default: 5)
    #[serde(default = "default_top_tags_limit")]
    pub default_top_tags_limit: usize,

    /// Page size used when slicing tag question listings and no size is
    /// given in the request (default: 10)
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Whether tag question resolution slices results by page/page_size
    /// (default: false — the full joined set is returned)
    #[serde(default)]
    pub paginate_tag_questions: bool,
}

fn default_top_tags_limit() -> usize {
    5
}

fn default_page_size() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_top_tags_limit: default_top_tags_limit(),
            default_page_size: default_page_size(),
            paginate_tag_questions: false,
        }
    }
}

// Load settings from defaults and environment variables
#[instrument(level = "debug")]
pub fn load_settings() -> Settings {
    trace!("Loading settings");

    let mut settings = Settings::default();

    if let Ok(value) = env::var("QTAGS_TOP_TAGS_LIMIT") {
        match value.parse::<usize>() {
            Ok(limit) => settings.default_top_tags_limit = limit,
            Err(_) => debug!("Ignoring malformed QTAGS_TOP_TAGS_LIMIT: {}", value),
        }
    }

    if let Ok(value) = env::var("QTAGS_PAGE_SIZE") {
        match value.parse::<usize>() {
            Ok(size) if size > 0 => settings.default_page_size = size,
            _ => debug!("Ignoring malformed QTAGS_PAGE_SIZE: {}", value),
        }
    }

    if let Ok(value) = env::var("QTAGS_PAGINATE_TAG_QUESTIONS") {
        match value.parse::<bool>() {
            Ok(flag) => settings.paginate_tag_questions = flag,
            Err(_) => debug!("Ignoring malformed QTAGS_PAGINATE_TAG_QUESTIONS: {}", value),
        }
    }

    debug!("Loaded settings: {:?}", settings);
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;

    #[test]
    fn given_no_overrides_when_default_then_uses_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.default_top_tags_limit, 5);
        assert_eq!(settings.default_page_size, 10);
        assert!(!settings.paginate_tag_questions);
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips() {
        let settings = Settings {
            default_top_tags_limit: 7,
            default_page_size: 25,
            paginate_tag_questions: true,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.default_top_tags_limit, 7);
        assert_eq!(parsed.default_page_size, 25);
        assert!(parsed.paginate_tag_questions);
    }

    #[test]
    fn given_partial_json_when_deserialized_then_missing_fields_default() {
        let parsed: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.default_top_tags_limit, 5);
        assert_eq!(parsed.default_page_size, 10);
    }

    #[test]
    #[serial]
    fn given_clean_env_when_load_settings_then_returns_defaults() {
        let _guard = EnvGuard::new();

        let settings = load_settings();

        assert_eq!(settings.default_top_tags_limit, 5);
        assert_eq!(settings.default_page_size, 10);
        assert!(!settings.paginate_tag_questions);
    }

    #[test]
    #[serial]
    fn given_valid_env_overrides_when_load_settings_then_applies_them() {
        let _guard = EnvGuard::new();
        env::set_var("QTAGS_TOP_TAGS_LIMIT", "9");
        env::set_var("QTAGS_PAGE_SIZE", "3");
        env::set_var("QTAGS_PAGINATE_TAG_QUESTIONS", "true");

        let settings = load_settings();

        assert_eq!(settings.default_top_tags_limit, 9);
        assert_eq!(settings.default_page_size, 3);
        assert!(settings.paginate_tag_questions);
    }

    #[test]
    #[serial]
    fn given_malformed_env_overrides_when_load_settings_then_falls_back_to_defaults() {
        let _guard = EnvGuard::new();
        env::set_var("QTAGS_TOP_TAGS_LIMIT", "lots");
        env::set_var("QTAGS_PAGE_SIZE", "many");
        env::set_var("QTAGS_PAGINATE_TAG_QUESTIONS", "yep");

        let settings = load_settings();

        assert_eq!(settings.default_top_tags_limit, 5);
        assert_eq!(settings.default_page_size, 10);
        assert!(!settings.paginate_tag_questions);
    }

    #[test]
    #[serial]
    fn given_zero_page_size_override_when_load_settings_then_keeps_default() {
        let _guard = EnvGuard::new();
        env::set_var("QTAGS_PAGE_SIZE", "0");

        let settings = load_settings();

        assert_eq!(settings.default_page_size, 10);
    }
}
