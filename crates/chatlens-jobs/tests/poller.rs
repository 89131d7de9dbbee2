//! Poller behavior against a scripted in-memory API.

use async_trait::async_trait;
use chatlens_jobs::{Error, JobPoller, JobsApi, MonitorStarted, PollEvent, PollerConfig, Result};
use chatlens_types::{Job, JobStatus};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

fn job(status: JobStatus) -> Job {
    let now = Utc::now();
    Job {
        job_id: Uuid::new_v4(),
        job_type: "autopilot_monitor".to_string(),
        status,
        progress: 0.5,
        message: "modeling: 10/20 models".to_string(),
        created_at: now,
        updated_at: now,
        error: None,
    }
}

enum Scripted {
    Status(JobStatus),
    Failure(String),
}

/// Replays a fixed script of responses, then repeats the fallback status
struct ScriptedApi {
    script: Mutex<VecDeque<Scripted>>,
    fallback: JobStatus,
    get_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
}

impl ScriptedApi {
    fn new(script: Vec<Scripted>, fallback: JobStatus) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            get_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl JobsApi for ScriptedApi {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(vec![])
    }

    async fn get_job(&self, _job_id: Uuid) -> Result<Job> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Status(status)) => Ok(job(status)),
            Some(Scripted::Failure(message)) => Err(Error::Api {
                status: 500,
                message,
            }),
            None => Ok(job(self.fallback)),
        }
    }

    async fn active_jobs(&self) -> Result<Vec<Job>> {
        Ok(vec![])
    }

    async fn cancel_job(&self, _job_id: Uuid) -> Result<Job> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        Ok(job(JobStatus::Cancelled))
    }

    async fn start_autopilot_monitor(&self, _project_id: &str) -> Result<MonitorStarted> {
        unimplemented!("not exercised by these tests")
    }
}

#[tokio::test(start_paused = true)]
async fn stops_after_terminal_status_when_configured() {
    let api = Arc::new(ScriptedApi::new(
        vec![
            Scripted::Status(JobStatus::Running),
            Scripted::Status(JobStatus::Completed),
        ],
        JobStatus::Completed,
    ));

    let mut poller = JobPoller::spawn(
        api.clone(),
        Uuid::new_v4(),
        PollerConfig {
            interval: Duration::from_secs(10),
            stop_on_terminal: true,
        },
    );

    assert!(matches!(poller.recv().await, Some(PollEvent::Update(_))));
    match poller.recv().await {
        Some(PollEvent::Finished(job)) => assert_eq!(job.status, JobStatus::Completed),
        other => panic!("expected Finished, got {:?}", other),
    }

    // Channel closes once the loop exits; no further requests are issued
    assert!(poller.recv().await.is_none());
    assert_eq!(api.get_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn keeps_polling_terminal_jobs_when_stop_is_disabled() {
    let api = Arc::new(ScriptedApi::new(vec![], JobStatus::Completed));

    let mut poller = JobPoller::spawn(
        api.clone(),
        Uuid::new_v4(),
        PollerConfig {
            interval: Duration::from_secs(10),
            stop_on_terminal: false,
        },
    );

    for _ in 0..3 {
        match poller.recv().await {
            Some(PollEvent::Update(job)) => assert_eq!(job.status, JobStatus::Completed),
            other => panic!("expected Update, got {:?}", other),
        }
    }
    assert!(api.get_calls.load(Ordering::SeqCst) >= 3);
}

#[tokio::test(start_paused = true)]
async fn fetch_failure_is_captured_and_polling_continues() {
    let api = Arc::new(ScriptedApi::new(
        vec![
            Scripted::Failure("upstream 500".to_string()),
            Scripted::Status(JobStatus::Running),
            Scripted::Status(JobStatus::Failed),
        ],
        JobStatus::Failed,
    ));

    let mut poller = JobPoller::spawn(api.clone(), Uuid::new_v4(), PollerConfig::default());

    match poller.recv().await {
        Some(PollEvent::Error(message)) => assert!(message.contains("upstream 500")),
        other => panic!("expected Error, got {:?}", other),
    }
    assert!(matches!(poller.recv().await, Some(PollEvent::Update(_))));
    match poller.recv().await {
        Some(PollEvent::Finished(job)) => assert_eq!(job.status, JobStatus::Failed),
        other => panic!("expected Finished, got {:?}", other),
    }
}

#[tokio::test]
async fn cancel_refetches_the_settled_job() {
    let api = ScriptedApi::new(vec![Scripted::Status(JobStatus::Cancelled)], JobStatus::Cancelled);

    let refreshed = api.cancel_and_refresh(Uuid::new_v4()).await.unwrap();

    assert_eq!(refreshed.status, JobStatus::Cancelled);
    assert_eq!(api.cancel_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.get_calls.load(Ordering::SeqCst), 1);
}
