//! Error boundaries with a retry affordance.
//!
//! A boundary catches a failure, renders a fallback instead of its subtree,
//! and stays tripped until `reset` rearms it. The app mounts two: one local
//! to the list (retry re-issues the collection query) and one global.

#[derive(Debug)]
pub struct ErrorBoundary {
    retry_label: &'static str,
    caught: Option<String>,
}

impl ErrorBoundary {
    /// List-local boundary; retry resets it and re-issues the query.
    pub fn for_list() -> Self {
        Self::with_retry_label("Try again")
    }

    /// Top-level catch-all.
    pub fn global() -> Self {
        Self::with_retry_label("Reload app")
    }

    pub fn with_retry_label(retry_label: &'static str) -> Self {
        Self {
            retry_label,
            caught: None,
        }
    }

    pub fn catch(&mut self, message: impl Into<String>) {
        self.caught = Some(message.into());
    }

    pub fn is_tripped(&self) -> bool {
        self.caught.is_some()
    }

    pub fn retry_label(&self) -> &'static str {
        self.retry_label
    }

    /// The fallback to render instead of the wrapped content, if tripped.
    pub fn fallback(&self) -> Option<String> {
        self.caught
            .as_ref()
            .map(|message| format!("Something went wrong:\n{message}\n[{}]", self.retry_label))
    }

    /// Rearm the boundary so the wrapped content renders again.
    pub fn reset(&mut self) {
        self.caught = None;
    }
}
