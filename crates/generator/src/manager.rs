//! Registry of tracked generation jobs.
//!
//! [`GenerationManager`] is created once at application startup and
//! cloned into request handlers behind an `Arc`. It owns the API client
//! and a map of [`JobTracker`]s for jobs submitted through this process.
//! Concurrent refreshes of the same job are last-write-wins on the
//! cached snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::{GeneratorApi, GeneratorApiError};
use crate::job::{JobSnapshot, JobTracker};

/// Errors surfaced by the job registry.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The generation service request failed.
    #[error(transparent)]
    Api(#[from] GeneratorApiError),

    /// No job with this id was submitted through this process.
    #[error("Unknown job id: {0}")]
    UnknownJob(String),
}

/// Shared handle over the generation service and its tracked jobs.
pub struct GenerationManager {
    api: GeneratorApi,
    jobs: RwLock<HashMap<String, JobTracker>>,
}

impl GenerationManager {
    /// Create a manager for a generation service base URL.
    pub fn new(base_url: String) -> Arc<Self> {
        Arc::new(Self {
            api: GeneratorApi::new(base_url),
            jobs: RwLock::new(HashMap::new()),
        })
    }

    /// Submit a document and start tracking the resulting job.
    ///
    /// On any submission error no local job state is created; the error
    /// goes back to the caller and no retry is attempted (resubmitting
    /// would create a new job).
    pub async fn submit(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
        template_ref: &str,
    ) -> Result<JobSnapshot, GeneratorError> {
        let initial = self
            .api
            .submit_document(file_name, media_type, bytes, template_ref)
            .await?;

        let tracker = JobTracker::new(initial);
        let snapshot = tracker.snapshot().clone();

        tracing::info!(job_id = %snapshot.job_id, template = template_ref, "Submitted generation job");

        self.jobs
            .write()
            .await
            .insert(snapshot.job_id.clone(), tracker);

        Ok(snapshot)
    }

    /// Poll the service for a job's current status and update the cache.
    ///
    /// On success the cached snapshot is fully replaced and returned. On
    /// a transport or server error the previous snapshot is retained
    /// unchanged and the error is surfaced; a failed poll is not a
    /// failed job.
    pub async fn refresh(&self, job_id: &str) -> Result<JobSnapshot, GeneratorError> {
        if !self.jobs.read().await.contains_key(job_id) {
            return Err(GeneratorError::UnknownJob(job_id.to_string()));
        }

        // Query upstream without holding the lock.
        let resp = self.api.get_job_status(job_id).await?;

        let mut jobs = self.jobs.write().await;
        let tracker = jobs
            .get_mut(job_id)
            .ok_or_else(|| GeneratorError::UnknownJob(job_id.to_string()))?;
        tracker.apply(resp);
        Ok(tracker.snapshot().clone())
    }

    /// The last-observed snapshot for a job, without polling upstream.
    pub async fn cached(&self, job_id: &str) -> Option<JobSnapshot> {
        self.jobs
            .read()
            .await
            .get(job_id)
            .map(|t| t.snapshot().clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    /// Whether `raw` holds a full HTTP request (headers plus the number
    /// of body bytes its `content-length` announces).
    fn request_is_complete(raw: &[u8]) -> bool {
        let Some(split) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&raw[..split]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= split + 4 + content_length
    }

    /// Serve exactly one HTTP request with the given JSON body, then
    /// release the port. Returns the base URL to submit against.
    async fn serve_one_submission(response_body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                request.extend_from_slice(&chunk[..n]);
                if n == 0 || request_is_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{}",
                response_body.len(),
                response_body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        base_url
    }

    #[tokio::test]
    async fn failed_poll_retains_the_cached_snapshot() {
        let base_url = serve_one_submission(
            r#"{"job_id":"job-1","status":"running","progress":40,"current_step":"Stap 2","logs":["--- Step 1/4 ---","--- Step 2/4 ---"]}"#,
        )
        .await;

        let manager = GenerationManager::new(base_url);
        let submitted = manager
            .submit("exam.pdf", "application/pdf", b"%PDF-1.7".to_vec(), "Examentemplate")
            .await
            .unwrap();
        assert_eq!(submitted.progress, 40);

        // The one-shot server is gone, so the poll dies on transport.
        let err = manager.refresh("job-1").await.unwrap_err();
        assert_matches!(err, GeneratorError::Api(GeneratorApiError::Request(_)));

        // The pre-refresh snapshot survives the failed poll untouched.
        let cached = manager.cached("job-1").await.unwrap();
        assert_eq!(cached.status, submitted.status);
        assert_eq!(cached.progress, submitted.progress);
        assert_eq!(cached.current_step, submitted.current_step);
        assert_eq!(cached.logs, submitted.logs);
    }

    #[tokio::test]
    async fn refresh_of_untracked_job_is_unknown() {
        let manager = GenerationManager::new("http://localhost:1".into());
        let err = manager.refresh("nope").await.unwrap_err();
        assert_matches!(err, GeneratorError::UnknownJob(id) if id == "nope");
    }

    #[tokio::test]
    async fn cached_returns_none_for_untracked_job() {
        let manager = GenerationManager::new("http://localhost:1".into());
        assert!(manager.cached("nope").await.is_none());
    }
}
