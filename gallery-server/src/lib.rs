//! Gallery server
//!
//! Lists stored thumbnails, presigns a time-bounded retrieval URL for each,
//! and serves the rendered gallery markup over HTTP.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Gallery assembly: list, order, presign, render
pub mod assembler;

/// Gallery markup rendering
pub mod render;

/// HTTP routes
pub mod routes;

/// HTTP server startup
pub mod server;

/// Application state
pub mod state;

/// Shared service types
pub mod types;
