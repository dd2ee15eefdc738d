//! Operator notifications
//!
//! Mutations report their outcome as a [`Notice`] (a toast in a graphical
//! front end, a line on the console here).

use parking_lot::Mutex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(NoticeLevel::Info, title, Some(description.into()))
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(NoticeLevel::Success, title, Some(description.into()))
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(NoticeLevel::Error, title, Some(description.into()))
    }

    fn build(level: NoticeLevel, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.filter(|d| !d.is_empty()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(d) => write!(f, "{}: {}", self.title, d),
            None => f.write_str(&self.title),
        }
    }
}

/// Sink for operator notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Error => tracing::warn!(title = %notice.title, description, "notice"),
            _ => tracing::info!(title = %notice.title, description, "notice"),
        }
    }
}

/// Keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording() {
        let n = RecordingNotifier::new();
        n.notify(Notice::success("Status updated", "Moved to POLICY VERIFIED"));
        n.notify(Notice::error("Transition failed", "Resource is OCCUPIED"));
        assert_eq!(n.notices().len(), 2);
        let last = n.last().unwrap();
        assert!(last.is_error());
        assert_eq!(last.to_string(), "Transition failed: Resource is OCCUPIED");
        assert_eq!(n.drain().len(), 2);
        assert!(n.notices().is_empty());
    }

    #[test]
    fn test_empty_description_dropped() {
        let notice = Notice::info("Loaded", "");
        assert_eq!(notice.description, None);
        assert_eq!(notice.to_string(), "Loaded");
    }
}
