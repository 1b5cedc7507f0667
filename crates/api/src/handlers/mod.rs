pub mod generation;
pub mod workflow_groups;
