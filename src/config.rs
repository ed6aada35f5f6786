use std::env;

use chrono::Duration;
use tracing::warn;

use crate::domain::query::page::DEFAULT_PAGE_SIZE;

pub const APP_NAME: &str = "CSV Viewer";
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_NOTICE_SECS: i64 = 4;

const PAGE_SIZE_VAR: &str = "CSV_VIEWER_PAGE_SIZE";
const SHARE_URL_VAR: &str = "CSV_VIEWER_SHARE_URL";
const NOTICE_SECS_VAR: &str = "CSV_VIEWER_NOTICE_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub window_title: String,
    pub page_size: usize,
    pub share_base_url: String,
    pub notice_ttl: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: APP_NAME.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            notice_ttl: Duration::seconds(DEFAULT_NOTICE_SECS),
        }
    }
}

impl ViewerConfig {
    /// Defaults, overridden by `CSV_VIEWER_*` environment variables when they parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => warn!(value = %raw, "ignoring invalid {PAGE_SIZE_VAR}"),
            }
        }
        if let Some(url) = lookup(SHARE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.share_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(NOTICE_SECS_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => config.notice_ttl = Duration::seconds(secs),
                _ => warn!(value = %raw, "ignoring invalid {NOTICE_SECS_VAR}"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            (PAGE_SIZE_VAR, "25"),
            (SHARE_URL_VAR, "https://viewer.example/app"),
            (NOTICE_SECS_VAR, "9"),
        ]
        .into();

        let config = ViewerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.page_size, 25);
        assert_eq!(config.share_base_url, "https://viewer.example/app");
        assert_eq!(config.notice_ttl, Duration::seconds(9));
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = ViewerConfig::from_lookup(|key| match key {
            PAGE_SIZE_VAR => Some("0".to_string()),
            NOTICE_SECS_VAR => Some("soon".to_string()),
            _ => None,
        });

        assert_eq!(config, ViewerConfig::default());
    }
}
