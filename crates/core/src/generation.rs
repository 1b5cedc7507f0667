//! Constants and validation for document submission.

use crate::error::CoreError;

/// Media types accepted for source documents.
pub const SUPPORTED_SOURCE_MEDIA_TYPES: &[&str] =
    &["application/pdf", "application/xml", "text/xml"];

/// Whether a media type names a supported source document format.
///
/// Comparison is case-insensitive and ignores parameters
/// (`application/xml; charset=utf-8` is accepted).
pub fn is_supported_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    SUPPORTED_SOURCE_MEDIA_TYPES.contains(&essence.as_str())
}

/// Validate the template reference accompanying a submission.
pub fn validate_template_ref(template_ref: &str) -> Result<(), CoreError> {
    if template_ref.trim().is_empty() {
        return Err(CoreError::Validation(
            "template_name_or_id is required".into(),
        ));
    }
    Ok(())
}
