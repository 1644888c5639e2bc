//! Port for user-visible, non-fatal notices.
//!
//! The persistence policy is optimistic-always: local state changes stand
//! even when the remote write fails, and the failure surfaces to the user as
//! a notice ("Saved locally but failed to persist to database.") rather than
//! an error or a rollback.

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Port for surfacing notices to whatever front end is attached.
pub trait StatusNotifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// No-op implementation for tests and headless runs.
pub struct NoNotices;

impl StatusNotifier for NoNotices {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}
