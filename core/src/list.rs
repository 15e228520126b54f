//! List and item view models.
//!
//! `ListView` is derived from the coordinator's state for the collection
//! key: a loading placeholder before any data, the error message for the
//! boundary to catch, the literal "No todos" for an empty collection, and
//! otherwise one row per record. Rows build their own toggle/delete
//! requests through the client; neither is applied optimistically — the
//! host invalidates the collection key on success and the list re-fetches.

use std::fmt::Write as _;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::query::QueryState;
use crate::types::{Todo, UpdateTodo};

/// Cache key under which the full collection is stored and invalidated.
pub const TODOS_KEY: &str = "todos";

/// One rendered row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub todo: Todo,
}

impl ItemRow {
    /// The delete control only appears once the item is done.
    pub fn can_delete(&self) -> bool {
        self.todo.done
    }

    /// Update request flipping the completion flag. Sends only `done`.
    pub fn toggle_request(&self, client: &TodoClient) -> Result<HttpRequest, ApiError> {
        let input = UpdateTodo {
            title: None,
            done: Some(!self.todo.done),
        };
        client.build_update_todo(&self.todo.id, &input)
    }

    /// Delete request, or `None` while the item is not yet done.
    pub fn delete_request(&self, client: &TodoClient) -> Option<HttpRequest> {
        if !self.can_delete() {
            return None;
        }
        Some(client.build_delete_todo(&self.todo.id))
    }

    pub fn render(&self) -> String {
        let check = if self.todo.done { "[x]" } else { "[ ]" };
        if self.can_delete() {
            format!("{check} {} (delete available)", self.todo.title)
        } else {
            format!("{check} {}", self.todo.title)
        }
    }
}

/// What the list renders for the collection key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Failed(String),
    Empty,
    Items(Vec<ItemRow>),
}

impl ListView {
    pub fn from_state(state: QueryState<'_, Vec<Todo>>) -> Self {
        match state {
            QueryState::Pending => ListView::Loading,
            QueryState::Error(message) => ListView::Failed(message.to_string()),
            QueryState::Success(todos) if todos.is_empty() => ListView::Empty,
            QueryState::Success(todos) => ListView::Items(
                todos
                    .iter()
                    .map(|todo| ItemRow { todo: todo.clone() })
                    .collect(),
            ),
        }
    }

    /// Render everything except the `Failed` case, which belongs to the
    /// error boundary.
    pub fn render(&self) -> String {
        match self {
            ListView::Loading => "Loading todos...".to_string(),
            ListView::Failed(message) => message.clone(),
            ListView::Empty => "No todos".to_string(),
            ListView::Items(rows) => {
                let mut out = String::new();
                for (i, row) in rows.iter().enumerate() {
                    let _ = writeln!(out, "{} {}", i + 1, row.render());
                }
                out
            }
        }
    }
}
