pub mod error;
pub mod generation;
pub mod types;
pub mod workflow;
