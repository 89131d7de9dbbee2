use crate::client::JobsApi;
use chatlens_types::Job;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

/// Polling cadence and termination policy
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Fixed re-fetch interval; no backoff
    pub interval: Duration,

    /// Stop issuing requests once the job reports a terminal status
    pub stop_on_terminal: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            stop_on_terminal: true,
        }
    }
}

/// One tick's outcome
#[derive(Debug, Clone)]
pub enum PollEvent {
    /// Fresh job state
    Update(Job),

    /// Terminal status observed; no further requests will be issued
    /// (only emitted when `stop_on_terminal` is set)
    Finished(Job),

    /// Fetch failed; polling continues on schedule
    Error(String),
}

/// Fixed-interval re-fetch of one job's status.
///
/// Not a scheduler: no backoff, no retry, no request dedup. The first fetch
/// fires immediately, then every `interval`. Dropping the poller aborts the
/// background task, which is the only cancellation there is.
pub struct JobPoller {
    handle: JoinHandle<()>,
    rx: Receiver<PollEvent>,
}

impl JobPoller {
    pub fn spawn(api: Arc<dyn JobsApi>, job_id: Uuid, config: PollerConfig) -> Self {
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.interval);

            loop {
                ticker.tick().await;

                match api.get_job(job_id).await {
                    Ok(job) => {
                        if config.stop_on_terminal && job.status.is_terminal() {
                            let _ = tx.send(PollEvent::Finished(job)).await;
                            break;
                        }
                        if tx.send(PollEvent::Update(job)).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(%job_id, "job poll failed: {}", err);
                        if tx.send(PollEvent::Error(err.to_string())).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { handle, rx }
    }

    /// Next event; `None` once the poller has stopped and the channel drained
    pub async fn recv(&mut self) -> Option<PollEvent> {
        self.rx.recv().await
    }

    /// Stop polling immediately
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
