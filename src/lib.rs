//! # VDRONE CMS
//!
//! Content backend for the VDRONE drone-photography site. It stores the site
//! copy, the service and portfolio listings, the video and photo galleries, and
//! visitor contact messages, and serves them over a small JSON HTTP API.
//!
//! # Architecture: Typed Collections Over a Document Store
//!
//! ```text
//! routes     HTTP  →  ContentService     (status codes, JSON bodies)
//! service    ContentService  →  Repository<T>   (defaults, degraded mode)
//! repository Repository<T>   →  Store           (typed <-> Document)
//! store      Store  →  memory | file backend    (append-only collections)
//! ```
//!
//! Every entity kind is declared once in [`schema`]: its collection name, its
//! field table, and its defaults. Payload validation, repositories, and seeding
//! all read that registry, so adding a kind never means writing another CRUD
//! layer.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Entity kinds, field tables, payload validation, typed entities |
//! | [`document`] | Schemaless documents, ids, equality filters |
//! | [`store`] | `DocumentStore` trait, memory and JSON-file backends, degraded handle |
//! | [`repository`] | Generic typed repository over one collection |
//! | [`seed`] | Idempotent seeding of empty public collections |
//! | [`service`] | Content operations used by the HTTP layer |
//! | [`routes`] | Axum router and handlers |
//! | [`server`] | Startup wiring and the listener |
//! | [`config`] | Layered config: environment, `vdrone.toml`, defaults |
//! | [`telemetry`] | Tracing subscriber setup |
//! | [`output`] | CLI output formatting for `seed` and `status` |
//!
//! # Design Decisions
//!
//! ## Degraded Mode Instead of Startup Failure
//!
//! A missing or unreachable store does not stop the process. Reads serve the
//! built-in site content and empty lists, `/test` reports `db: false`, and only
//! the admin create endpoints answer 500. The public site keeps rendering
//! while the database is being sorted out.
//!
//! ## Append-Only Content History
//!
//! Updating the site content inserts a new document rather than editing one in
//! place. The last inserted document is the current content, and every older
//! version stays in the collection.

pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod server;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use error::{Result, ServerError};
pub use server::CmsServer;
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_helpers;
