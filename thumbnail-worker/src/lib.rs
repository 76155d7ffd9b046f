//! Thumbnail worker service
//!
//! Consumes storage change notifications from SQS and publishes a
//! bounded-dimension derivative of each newly uploaded image, retiring the
//! source object once the derivative is durable.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod health;
pub mod transform;
pub mod types;
pub mod worker;
