use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::config::ApiConfig;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Serialize)]
struct ResearchRequest<'a> {
    technologies: &'a [String],
    businessareas: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchTicket {
    pub input_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Started,
    Complete,
    Error,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Error)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobEvent {
    pub timestamp: String,
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobReport {
    pub input_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub events: Vec<JobEvent>,
}

impl JobReport {
    /// Result as display text: strings verbatim, JSON pretty-printed.
    pub fn result_text(&self) -> String {
        match &self.result {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// Client for the research service's `/api/multiagent` endpoints.
pub struct ResearchClient {
    client: Client,
    base_url: String,
}

impl ResearchClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Start a research job.
    pub async fn submit(
        &self,
        technologies: &[String],
        business_areas: &[String],
    ) -> Result<ResearchTicket> {
        let url = format!("{}/api/multiagent", self.base_url);
        let req = ResearchRequest {
            technologies,
            businessareas: business_areas,
        };

        let resp = self.client.post(&url).json(&req).send().await?;
        let ticket: ResearchTicket = Self::decode(resp).await?;
        tracing::info!(input_id = %ticket.input_id, "research job submitted");
        Ok(ticket)
    }

    pub async fn status(&self, input_id: &str) -> Result<JobReport> {
        let url = format!("{}/api/multiagent/{}", self.base_url, input_id);
        let resp = self.client.get(&url).send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "research API request failed");
            return Err(ApiError::Status { status, body }.into());
        }

        Ok(serde_json::from_str(&body)?)
    }
}
