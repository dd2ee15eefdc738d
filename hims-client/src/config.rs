//! Client configuration

use crate::{ClientError, ClientResult};
use std::time::Duration;

/// Default debounce applied to search / filter inputs
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for the administration API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Delay between the last filter change and the list reload
    pub search_debounce: Duration,

    /// Branch used for branch-scoped endpoints when none is given
    pub branch_id: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            branch_id: None,
        }
    }

    /// Read `HIMS_API_URL`, `HIMS_API_TOKEN`, `HIMS_TIMEOUT_SECS`,
    /// `HIMS_SEARCH_DEBOUNCE_MS` and `HIMS_BRANCH_ID`
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(url) = get("HIMS_API_URL") {
            config.base_url = url;
        }
        config.token = get("HIMS_API_TOKEN");
        config.branch_id = get("HIMS_BRANCH_ID");
        if let Some(secs) = get("HIMS_TIMEOUT_SECS") {
            config.timeout = parse_number("HIMS_TIMEOUT_SECS", &secs)?;
        }
        if let Some(ms) = get("HIMS_SEARCH_DEBOUNCE_MS") {
            config.search_debounce =
                Duration::from_millis(parse_number("HIMS_SEARCH_DEBOUNCE_MS", &ms)?);
        }
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn with_branch_id(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    /// Configured branch, or a config error naming the missing setting
    pub fn require_branch(&self) -> ClientResult<&str> {
        self.branch_id
            .as_deref()
            .ok_or_else(|| ClientError::Config("HIMS_BRANCH_ID is not set".into()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

fn parse_number(key: &str, value: &str) -> ClientResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{key} must be a whole number, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert!(config.token.is_none());
        assert!(config.require_branch().is_err());
    }

    #[test]
    fn test_env_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HIMS_API_URL", "https://hims.example.org"),
            ("HIMS_API_TOKEN", "secret"),
            ("HIMS_TIMEOUT_SECS", "5"),
            ("HIMS_SEARCH_DEBOUNCE_MS", "250"),
            ("HIMS_BRANCH_ID", "b-1"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://hims.example.org");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.search_debounce, Duration::from_millis(250));
        assert_eq!(config.require_branch().unwrap(), "b-1");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config =
            ClientConfig::from_lookup(lookup(&[("HIMS_API_TOKEN", "  "), ("HIMS_BRANCH_ID", "")]))
                .unwrap();
        assert!(config.token.is_none());
        assert!(config.branch_id.is_none());
    }

    #[test]
    fn test_bad_number() {
        let err = ClientConfig::from_lookup(lookup(&[("HIMS_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://api")
            .with_token("t")
            .with_timeout(10)
            .with_search_debounce(Duration::from_millis(100))
            .with_branch_id("b-9");
        assert_eq!(config.token.as_deref(), Some("t"));
        assert_eq!(config.timeout, 10);
        assert_eq!(config.search_debounce, Duration::from_millis(100));
        assert_eq!(config.branch_id.as_deref(), Some("b-9"));
    }
}
