//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Operations that must be
//! all-or-nothing (activate, config update) open their own transaction.

pub mod prompt_repo;
pub mod workflow_config_repo;
pub mod workflow_group_repo;

pub use prompt_repo::PromptRepo;
pub use workflow_config_repo::WorkflowConfigRepo;
pub use workflow_group_repo::WorkflowGroupRepo;
