//! Object-storage capability for the photo pipeline
//!
//! Both pipeline stages consume storage through the [`ObjectStore`] trait so
//! bucket names and the storage handle are injected explicitly instead of
//! being resolved from ambient state. [`S3ObjectStore`] is the production
//! implementation; [`MemoryObjectStore`] backs tests and local development.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Error types for storage operations
pub mod error;
/// In-memory object store
pub mod memory;
/// S3-backed object store
pub mod s3;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;
pub use store::{ObjectAcl, ObjectStore, ObjectSummary, PresignedUrl};
