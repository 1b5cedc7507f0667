//! REST client for the generation service HTTP endpoints.
//!
//! Wraps document submission and job-status retrieval using [`reqwest`].
//! Submission is fire-and-forget on the service side: submitting the
//! same document twice creates two jobs.

use crate::job::JobStatusResponse;

/// HTTP client for a single generation service.
pub struct GeneratorApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the generation service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generation service error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl GeneratorApi {
    /// Create a new API client for a generation service.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Submit a source document for generation.
    ///
    /// Sends a multipart `POST /api/v1/generate` with the document bytes
    /// as the `file` part and the template reference as
    /// `template_name_or_id`. Returns the initial job snapshot (the
    /// server assigns the job id and queues the job).
    pub async fn submit_document(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
        template_ref: &str,
    ) -> Result<JobStatusResponse, GeneratorApiError> {
        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(media_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("template_name_or_id", template_ref.to_string());

        let response = self
            .client
            .post(format!("{}/api/v1/generate", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve the current status of a job.
    ///
    /// Sends a `GET /api/v1/generate/{job_id}/status` request. Polling
    /// is idempotent; terminal jobs keep answering with their final
    /// state.
    pub async fn get_job_status(
        &self,
        job_id: &str,
    ) -> Result<JobStatusResponse, GeneratorApiError> {
        let response = self
            .client
            .get(format!("{}/api/v1/generate/{}/status", self.base_url, job_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GeneratorApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeneratorApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeneratorApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeneratorApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
