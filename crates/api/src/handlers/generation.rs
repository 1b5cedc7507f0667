//! Handlers for document generation: multipart submission and job
//! status polling.
//!
//! The generation service owns the job lifecycle; these handlers
//! validate the submission, hand it to the [`GenerationManager`], and
//! expose the manager's cached snapshots. Submission is not idempotent:
//! posting the same document twice creates two jobs.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use docgen_core::error::CoreError;
use docgen_core::generation::{is_supported_media_type, validate_template_ref};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Parsed multipart submission: the source document and its template
/// reference.
struct SubmissionParts {
    file_name: String,
    media_type: String,
    bytes: Vec<u8>,
    template_ref: String,
}

/// Pull the `file` and `template_name_or_id` parts out of the multipart
/// body, rejecting anything malformed before the service is contacted.
async fn read_submission(mut multipart: Multipart) -> AppResult<SubmissionParts> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut template_ref: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("document")
                    .to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file part: {e}")))?;
                file = Some((file_name, media_type, bytes.to_vec()));
            }
            Some("template_name_or_id") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read template part: {e}"))
                })?;
                template_ref = Some(text);
            }
            // Unknown parts are ignored rather than rejected.
            _ => {}
        }
    }

    let (file_name, media_type, bytes) = file.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "A source document file is required".into(),
        ))
    })?;

    if bytes.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Source document is empty".into(),
        )));
    }

    if !is_supported_media_type(&media_type) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unsupported document type: {media_type} (expected PDF or XML)"
        ))));
    }

    let template_ref = template_ref.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "template_name_or_id is required".into(),
        ))
    })?;
    validate_template_ref(&template_ref)?;

    Ok(SubmissionParts {
        file_name,
        media_type,
        bytes,
        template_ref,
    })
}

// ---------------------------------------------------------------------------
// POST /generate
// ---------------------------------------------------------------------------

/// Submit a source document plus template reference for asynchronous
/// generation. Returns the initial job snapshot (status `queued`).
///
/// If the generation service rejects the submission or is unreachable,
/// no local job state is created and the error is returned as-is.
pub async fn submit_document(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let parts = read_submission(multipart).await?;

    tracing::info!(
        subject = %auth.subject,
        file = %parts.file_name,
        template = %parts.template_ref,
        "Submitting document for generation"
    );

    let snapshot = state
        .generation
        .submit(
            &parts.file_name,
            &parts.media_type,
            parts.bytes,
            &parts.template_ref,
        )
        .await?;

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: snapshot })))
}

// ---------------------------------------------------------------------------
// GET /generate/{job_id}/status
// ---------------------------------------------------------------------------

/// Poll a job's status.
///
/// Each successful poll replaces the cached snapshot wholesale; a failed
/// poll leaves it untouched and surfaces the transport error instead of
/// marking the job failed (`GenerationManager::refresh`).
pub async fn job_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.generation.refresh(&job_id).await?;
    Ok(Json(DataResponse { data: snapshot }))
}
