//! Compose-form state machine.
//!
//! Owns the draft text for a new item. `submit` trims and validates, and the
//! host runs the create round-trip between `submit` and one of
//! `submit_succeeded` / `submit_failed`. While that round-trip is
//! outstanding the form is busy: further submits yield nothing and the
//! submit label reads "Adding...". The draft is cleared only on success;
//! a failure leaves it intact for the user to resubmit.

use crate::types::NewTodo;

#[derive(Debug, Default)]
pub struct TodoForm {
    draft: String,
    submitting: bool,
}

impl TodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Trim the draft and hand it over for creation. Whitespace-only drafts
    /// and submits while busy yield `None` and change nothing.
    pub fn submit(&mut self) -> Option<NewTodo> {
        if self.submitting {
            return None;
        }
        let title = self.draft.trim();
        if title.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(NewTodo {
            title: title.to_string(),
        })
    }

    /// The create round-trip succeeded: clear the draft.
    pub fn submit_succeeded(&mut self) {
        self.draft.clear();
        self.submitting = false;
    }

    /// The create round-trip failed: keep the draft untouched.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    /// True while a create request is outstanding; the submit control is
    /// disabled for the duration.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Adding..."
        } else {
            "Add"
        }
    }
}
