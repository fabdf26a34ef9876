use std::time::Duration;

use crate::error::ReaderError;

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = concat!("subreddit_reader/", env!("CARGO_PKG_VERSION"));

/// Runtime settings for the reader. Defaults talk to reddit.com and show ten stories per page.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    /// Listing sort for the stories endpoint (`top`).
    pub sort: String,
    /// Time window for the stories endpoint (`month`).
    pub time_window: String,
    pub page_size: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sort: "top".to_string(),
            time_window: "month".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `REDDIT_READER_*` environment variables.
    pub fn from_env() -> Result<Self, ReaderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReaderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("REDDIT_READER_BASE_URL") {
            let trimmed = base_url.trim().trim_end_matches('/');
            if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                return Err(ReaderError::Config(format!(
                    "REDDIT_READER_BASE_URL must be an http(s) URL, got '{}'",
                    base_url
                )));
            }
            config.base_url = trimmed.to_string();
        }

        if let Some(page_size) = lookup("REDDIT_READER_PAGE_SIZE") {
            config.page_size = match page_size.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ReaderError::Config(format!(
                        "REDDIT_READER_PAGE_SIZE must be a positive integer, got '{}'",
                        page_size
                    )))
                }
            };
        }

        if let Some(timeout) = lookup("REDDIT_READER_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                ReaderError::Config(format!(
                    "REDDIT_READER_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    timeout
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(user_agent) = lookup("REDDIT_READER_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.user_agent = user_agent.trim().to_string();
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_reddit_top_of_month() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "https://www.reddit.com");
        assert_eq!(config.sort, "top");
        assert_eq!(config.time_window, "month");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("REDDIT_READER_BASE_URL", "http://localhost:8080/"),
            ("REDDIT_READER_PAGE_SIZE", "25"),
            ("REDDIT_READER_TIMEOUT_SECS", "5"),
            ("REDDIT_READER_USER_AGENT", "tester/1.0"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "tester/1.0");
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = AppConfig::from_lookup(lookup_from(&[("REDDIT_READER_PAGE_SIZE", "0")])).unwrap_err();
        assert!(err.to_string().contains("REDDIT_READER_PAGE_SIZE"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = AppConfig::from_lookup(lookup_from(&[("REDDIT_READER_BASE_URL", "ftp://x")]));
        assert!(matches!(result, Err(ReaderError::Config(_))));
    }

    #[test]
    fn blank_user_agent_keeps_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("REDDIT_READER_USER_AGENT", "  ")])).unwrap();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
