//! Translation job status polling

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{Sleeper, TranslationApi};
use crate::types::{clamp_percent, JobStatus, TranslationJob};

/// Job state as the wizard presents it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    #[default]
    Idle,
    Translating,
    Success,
    Error,
    Cancelled,
}

impl TranslationStatus {
    pub fn from_remote(status: JobStatus) -> Self {
        match status {
            JobStatus::Completed => TranslationStatus::Success,
            JobStatus::Failed => TranslationStatus::Error,
            JobStatus::Cancelled => TranslationStatus::Cancelled,
            _ => TranslationStatus::Translating,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TranslationStatus::Success | TranslationStatus::Error | TranslationStatus::Cancelled
        )
    }
}

/// One observation of a job, already mapped to local terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollUpdate {
    pub status: TranslationStatus,
    pub progress: u8,
    pub error_message: Option<String>,
    pub target_document: Option<String>,
}

impl From<&TranslationJob> for PollUpdate {
    fn from(job: &TranslationJob) -> Self {
        let status = TranslationStatus::from_remote(job.status);
        Self {
            status,
            progress: if status == TranslationStatus::Success {
                100
            } else {
                clamp_percent(job.progress)
            },
            error_message: job.error_message.clone(),
            target_document: job.target_document.clone(),
        }
    }
}

/// Check a job now and then once per `interval` until it reaches a terminal
/// state, reporting every observation to `on_update`.
///
/// A failed check is logged and retried on the next tick; it never ends the
/// loop. Stop early by dropping (cancelling) the future.
pub async fn poll_job<A, S, F>(
    api: &A,
    sleeper: &S,
    job_id: &str,
    interval: Duration,
    mut on_update: F,
) -> PollUpdate
where
    A: TranslationApi + ?Sized,
    S: Sleeper + ?Sized,
    F: FnMut(&PollUpdate),
{
    let mut first = true;
    loop {
        if !first {
            sleeper.sleep(interval).await;
        }
        first = false;

        match api.translation_status(job_id).await {
            Ok(job) => {
                let update = PollUpdate::from(&job);
                on_update(&update);
                if update.status.is_terminal() {
                    tracing::debug!(job_id, status = ?update.status, "Job reached terminal state");
                    return update;
                }
            }
            Err(e) => {
                tracing::warn!(job_id, error = %e, "Job status check failed, retrying next tick");
            }
        }
    }
}
