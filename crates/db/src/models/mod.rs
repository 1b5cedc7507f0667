//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the API operations that touch the table

pub mod prompt;
pub mod workflow_config;
pub mod workflow_group;
