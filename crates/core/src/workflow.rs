//! Workflow group domain constants and input validation.
//!
//! A workflow group owns one configuration and a set of named prompts.
//! Base/system instructions are stored as a prompt under the reserved
//! name [`BASE_INSTRUCTIONS_PROMPT`] so they travel through the same
//! upsert path as step prompts.

use crate::error::CoreError;

/// Name assigned to a group created without an explicit name.
pub const DEFAULT_GROUP_NAME: &str = "Nieuwe workflow";

/// Reserved prompt name holding a group's base/system instructions.
pub const BASE_INSTRUCTIONS_PROMPT: &str = "_base_instructions";

/// Maximum accepted length for group and prompt names.
pub const MAX_NAME_LEN: usize = 255;

/// Validate a group display name supplied by the caller.
pub fn validate_group_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Group name must not be empty".into(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Group name exceeds {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a prompt name used as a key in a config update.
///
/// The reserved base-instructions name is accepted here: writing it
/// through the prompts map is equivalent to supplying the dedicated
/// base-instructions field.
pub fn validate_prompt_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Prompt name must not be empty".into(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Prompt name exceeds {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
