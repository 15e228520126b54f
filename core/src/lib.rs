//! Deterministic core for the terminal todo client.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//! On top of the client sit the pieces the UI needs: a keyed query cache
//! with a staleness window, the compose-form state machine, the list view
//! model, and error boundaries.
//!
//! # Design
//! - `TodoClient` is stateless — it holds only `base_url`. Each CRUD
//!   operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `QueryCache` follows the same split: `plan` directs fetches and
//!   deduplicates overlapping ones, the caller performs them, `resolve`
//!   feeds results back. The caller also supplies `Instant`s, so nothing in
//!   this crate reads a clock.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod boundary;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod query;
pub mod types;

pub use boundary::ErrorBoundary;
pub use client::TodoClient;
pub use error::ApiError;
pub use form::TodoForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ItemRow, ListView, TODOS_KEY};
pub use query::{QueryCache, QueryPlan, QueryState};
pub use types::{NewTodo, Todo, UpdateTodo, WireTodo};
