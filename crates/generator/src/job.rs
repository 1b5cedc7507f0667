//! Client-side job-status state machine.
//!
//! A [`JobTracker`] caches the last snapshot observed from the server.
//! The server is the single source of truth, so a successful status
//! query **replaces** the whole snapshot rather than merging into it;
//! the only guard is that a terminal snapshot is never regressed by a
//! stale non-terminal response.

use serde::{Deserialize, Serialize};

/// Log lines kept in a snapshot for display. Older lines are dropped.
pub const MAX_DISPLAY_LOG_LINES: usize = 200;

/// Lifecycle state of a generation job as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobState {
    /// Terminal states never transition again; polling past them is
    /// informational only.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// Wire shape of a job-status response from the generation service.
///
/// Also returned by the submission endpoint as the initial snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: JobState,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub logs: Vec<String>,
    /// Present once the job completed (or failed with error details).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Locally cached view of a job, derived from the last successful
/// server response.
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub job_id: String,
    pub status: JobState,
    /// Progress percentage, clamped to 0-100.
    pub progress: i32,
    pub current_step: Option<String>,
    /// Most recent log lines, capped at [`MAX_DISPLAY_LOG_LINES`].
    pub logs: Vec<String>,
    pub result: Option<serde_json::Value>,
}

impl JobSnapshot {
    fn from_response(resp: JobStatusResponse) -> Self {
        let JobStatusResponse {
            job_id,
            status,
            progress,
            current_step,
            mut logs,
            result,
        } = resp;

        if logs.len() > MAX_DISPLAY_LOG_LINES {
            logs.drain(..logs.len() - MAX_DISPLAY_LOG_LINES);
        }

        Self {
            job_id,
            status,
            progress: progress.clamp(0, 100),
            current_step,
            logs,
            result,
        }
    }
}

/// Tracks one submitted job across status polls.
#[derive(Debug)]
pub struct JobTracker {
    snapshot: JobSnapshot,
}

impl JobTracker {
    /// Start tracking a job from the submission response.
    pub fn new(initial: JobStatusResponse) -> Self {
        Self {
            snapshot: JobSnapshot::from_response(initial),
        }
    }

    /// The last-observed snapshot.
    pub fn snapshot(&self) -> &JobSnapshot {
        &self.snapshot
    }

    /// Replace the cached snapshot with a fresh server response.
    ///
    /// A stale non-terminal response never overwrites an already
    /// terminal snapshot; everything else is a full replace, no
    /// blending of old and new log lists.
    pub fn apply(&mut self, resp: JobStatusResponse) {
        if self.snapshot.status.is_terminal() && !resp.status.is_terminal() {
            tracing::warn!(
                job_id = %self.snapshot.job_id,
                stale_status = ?resp.status,
                "Ignoring non-terminal status for a terminal job"
            );
            return;
        }
        self.snapshot = JobSnapshot::from_response(resp);
    }
}
