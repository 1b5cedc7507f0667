//! Client for the external document-generation service.
//!
//! [`api::GeneratorApi`] wraps the service's HTTP endpoints (multipart
//! document submission, job-status polling). [`job`] holds the
//! client-side job-status state machine, and [`manager`] the registry
//! of tracked jobs shared with the HTTP layer.

pub mod api;
pub mod job;
pub mod manager;

pub use manager::{GenerationManager, GeneratorError};
