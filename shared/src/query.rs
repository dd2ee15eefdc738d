//! Query string parameters
//!
//! Filters are plain serializable structs. Flattening drops `null` and
//! empty strings, and drops the `"all"` sentinel under the status / type
//! picker keys, so the backend only sees filters that actually narrow the
//! result. Free text (`q`, `reason`, ...) is always sent as typed.

use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

/// Picker value meaning "no filter"
pub const ALL_SENTINEL: &str = "all";

/// Keys filled from pickers, where [`ALL_SENTINEL`] means "no filter"
pub const PICKER_KEYS: &[&str] = &["status", "state", "caseType", "resourceType", "policyType"];

/// Ordered `key=value` pairs for a request URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a filter struct; nested values are JSON encoded
    pub fn from_filter<T: Serialize>(filter: &T) -> Self {
        let mut params = Self::new();
        if let Ok(Value::Object(map)) = serde_json::to_value(filter) {
            for (key, value) in map {
                params.push_value(key, value);
            }
        }
        params
    }

    /// Add a pair unless the value is blank, or the `"all"` sentinel under
    /// a picker key
    pub fn push(mut self, key: impl Into<String>, value: impl Display) -> Self {
        let key = key.into();
        let value = value.to_string();
        if keep(&key, &value) {
            self.pairs.push((key, value));
        }
        self
    }

    pub fn push_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Merge another set of params, later keys replacing earlier ones
    pub fn merge(mut self, other: QueryParams) -> Self {
        for (key, value) in other.pairs {
            self.pairs.retain(|(k, _)| *k != key);
            self.pairs.push((key, value));
        }
        self
    }

    fn push_value(&mut self, key: String, value: Value) {
        let text = match value {
            Value::Null => return,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        };
        if keep(&key, &text) {
            self.pairs.push((key, text));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encoded `key=value&...` string, without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append the params to a request path
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", path, sep, self.to_query_string())
    }
}

/// Percent-encode an id for use as a single path segment
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn keep(key: &str, value: &str) -> bool {
    !value.is_empty() && !(value == ALL_SENTINEL && PICKER_KEYS.contains(&key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::CaseStatus;
    use crate::models::{CaseFilter, CaseType};

    #[test]
    fn test_case_filter_flattening() {
        let filter = CaseFilter {
            q: Some("IC-00".into()),
            status: Some(CaseStatus::PreauthPending),
            payer_id: None,
            case_type: Some(CaseType::Cashless),
        };
        let params = QueryParams::from_filter(&filter);
        assert_eq!(params.get("q"), Some("IC-00"));
        assert_eq!(params.get("status"), Some("PREAUTH_PENDING"));
        assert_eq!(params.get("caseType"), Some("CASHLESS"));
        assert_eq!(params.get("payerId"), None);
        assert_eq!(params.pairs().len(), 3);
    }

    #[test]
    fn test_blank_and_all_are_skipped() {
        let params = QueryParams::new()
            .push("q", "")
            .push("status", "all")
            .push("branchId", "b-1")
            .push_opt("unitId", None::<String>)
            .push_opt("hard", Some(false));
        assert_eq!(
            params.pairs(),
            &[
                ("branchId".to_string(), "b-1".to_string()),
                ("hard".to_string(), "false".to_string())
            ]
        );
    }

    #[test]
    fn test_all_is_text_outside_pickers() {
        let params = QueryParams::new()
            .push("caseType", "all")
            .push("q", "all")
            .push("reason", "all");
        assert_eq!(params.to_query_string(), "q=all&reason=all");

        let from_filter = QueryParams::from_filter(&serde_json::json!({
            "state": "all",
            "q": "all"
        }));
        assert_eq!(from_filter.get("state"), None);
        assert_eq!(from_filter.get("q"), Some("all"));
    }

    #[test]
    fn test_merge_replaces_keys() {
        let base = QueryParams::new().push("branchId", "b-1").push("q", "icu");
        let merged = base.merge(QueryParams::new().push("branchId", "b-2"));
        assert_eq!(merged.get("branchId"), Some("b-2"));
        assert_eq!(merged.get("q"), Some("icu"));
        assert_eq!(merged.pairs().len(), 2);
    }

    #[test]
    fn test_append_to_path() {
        let params = QueryParams::new()
            .push("q", "ICU bed")
            .push("reason", "Merged into ICU-2");
        assert_eq!(
            params.append_to("/api/infrastructure/resources"),
            "/api/infrastructure/resources?q=ICU%20bed&reason=Merged%20into%20ICU-2"
        );
        assert_eq!(QueryParams::new().append_to("/api/x"), "/api/x");
        assert_eq!(
            QueryParams::new().push("hard", false).append_to("/api/x?branchId=b-1"),
            "/api/x?branchId=b-1&hard=false"
        );
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("res-1"), "res-1");
        assert_eq!(segment("ICD 10/A"), "ICD%2010%2FA");
    }

    #[test]
    fn test_non_object_filter_is_empty() {
        assert!(QueryParams::from_filter(&"plain").is_empty());
    }
}
