use crate::{Error, Result};
use async_trait::async_trait;
use chatlens_types::Job;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Acknowledgement returned when a monitor job is created
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorStarted {
    pub job_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct CreateAutopilotMonitorRequest<'a> {
    project_id: &'a str,
}

/// The jobs endpoints this client consumes (shape only, not owned here).
///
/// Kept as a trait so the poller and UI layers can run against a mock.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// `GET /api/v1/jobs`
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// `GET /api/v1/jobs/{id}`
    async fn get_job(&self, job_id: Uuid) -> Result<Job>;

    /// `GET /api/v1/jobs/active`
    async fn active_jobs(&self) -> Result<Vec<Job>>;

    /// `POST /api/v1/jobs/{id}/cancel`
    async fn cancel_job(&self, job_id: Uuid) -> Result<Job>;

    /// `POST /api/v1/jobs/autopilot-monitor`
    async fn start_autopilot_monitor(&self, project_id: &str) -> Result<MonitorStarted>;

    /// Cancel, then refetch so the caller sees the server's settled view
    async fn cancel_and_refresh(&self, job_id: Uuid) -> Result<Job> {
        self.cancel_job(job_id).await?;
        self.get_job(job_id).await
    }
}

/// reqwest-backed client against the assistant backend
pub struct HttpJobsClient {
    client: Client,
    base: String,
    api_token: Option<String>,
}

impl HttpJobsClient {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl JobsApi for HttpJobsClient {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let response = self
            .request(self.client.get(self.url("/jobs")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Job> {
        let response = self
            .request(self.client.get(self.url(&format!("/jobs/{}", job_id))))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn active_jobs(&self) -> Result<Vec<Job>> {
        let response = self
            .request(self.client.get(self.url("/jobs/active")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn cancel_job(&self, job_id: Uuid) -> Result<Job> {
        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/jobs/{}/cancel", job_id))),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn start_autopilot_monitor(&self, project_id: &str) -> Result<MonitorStarted> {
        let response = self
            .request(self.client.post(self.url("/jobs/autopilot-monitor")))
            .json(&CreateAutopilotMonitorRequest { project_id })
            .send()
            .await?;
        Self::decode(response).await
    }
}
