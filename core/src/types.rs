//! Domain DTOs for the todo API.
//!
//! # Design
//! Identifiers are plain strings system-wide: the mock server mints UUID v4
//! text and the MongoDB-backed deployment returns hex object ids, and both
//! fit the same field once flattened. The `WireTodo` shape covers the Mongo
//! variant, where the identifier arrives nested under `_id.$oid`; it never
//! leaves this module un-flattened. These types are defined independently
//! from the mock-server crate; integration tests catch schema drift.

use serde::{Deserialize, Serialize};

/// A single todo item as the rest of the app sees it.
///
/// The identifier is unique and immutable once assigned by the remote store;
/// the client never mutates a `Todo` locally without a round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub done: bool,
}

/// A draft todo: composed in the form, no identifier yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
}

/// Canonical partial-update payload. Only the fields present in the JSON are
/// applied; omitted fields remain unchanged on the server. The toggle
/// interaction sends `done` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Wire shape returned by the MongoDB-backed deployment: the identifier is
/// nested inside an object keyed by the internal object-id field.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTodo {
    #[serde(rename = "_id")]
    pub id: WireObjectId,
    pub title: String,
    pub done: bool,
}

/// The nested `{"$oid": "..."}` identifier object.
#[derive(Debug, Clone, Deserialize)]
pub struct WireObjectId {
    #[serde(rename = "$oid")]
    pub oid: String,
}

impl From<WireTodo> for Todo {
    fn from(wire: WireTodo) -> Self {
        Todo {
            id: wire.id.oid,
            title: wire.title,
            done: wire.done,
        }
    }
}

/// A record as it appears on the wire: either already flat or in the nested
/// Mongo shape. Parsing goes through this so callers only ever see `Todo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TodoRecord {
    Flat(Todo),
    Wire(WireTodo),
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        match record {
            TodoRecord::Flat(todo) => todo,
            TodoRecord::Wire(wire) => wire.into(),
        }
    }
}
