// src/services/client.rs

//! Job-board API client.
//!
//! Two GraphQL operations are used: one listing call per organization
//! (postings + teams) and one detail call per posting. Both return the
//! same error taxonomy: [`AppError::Fetch`] for transport failures and
//! non-success statuses, [`AppError::Api`] for error payloads.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, JobBoard, PostingDetail};
use crate::services::queries::{
    JOB_BOARD_OPERATION, JOB_BOARD_QUERY, JOB_POSTING_OPERATION, JOB_POSTING_QUERY,
};
use crate::utils::http::create_async_client;

/// Source of listing and detail data for job boards.
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    /// Fetch all teams and postings of an organization in one request.
    ///
    /// An organization without postings yields an empty [`JobBoard`], not an
    /// error.
    async fn fetch_job_board(&self, organization: &str) -> Result<JobBoard>;

    /// Fetch the full detail of one posting.
    async fn fetch_job_posting(&self, organization: &str, posting_id: &str)
    -> Result<PostingDetail>;
}

/// GraphQL request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'a str,
    variables: Value,
    query: &'a str,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobBoardData {
    job_board: Option<JobBoard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobPostingData {
    job_posting: Option<PostingDetail>,
}

/// Client for the public Ashby GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct AshbyClient {
    client: Client,
    api_url: String,
}

impl AshbyClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Ok(Self::with_client(client, &config.api_url))
    }

    /// Wrap an existing HTTP client.
    pub fn with_client(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
        }
    }

    /// Execute one GraphQL operation and return its `data` member.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
        context: &str,
    ) -> Result<Option<T>> {
        let request = GraphQlRequest {
            operation_name: operation,
            variables,
            query,
        };

        let mut url = Url::parse(&self.api_url)?;
        url.query_pairs_mut().append_pair("op", operation);

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::fetch(context, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(context, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(context, e))?;
        decode_envelope(&body, context)
    }
}

/// Decode a GraphQL response body, turning an `errors` member into
/// [`AppError::Api`] whether or not `data` is also present.
fn decode_envelope<T: DeserializeOwned>(body: &str, context: &str) -> Result<Option<T>> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| AppError::api(context, format!("malformed response: {e}")))?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(AppError::api(context, messages.join(", ")));
    }

    Ok(envelope.data)
}

#[async_trait]
impl JobBoardApi for AshbyClient {
    async fn fetch_job_board(&self, organization: &str) -> Result<JobBoard> {
        let context = format!("job board {organization}");
        let data: Option<JobBoardData> = self
            .execute(
                JOB_BOARD_OPERATION,
                JOB_BOARD_QUERY,
                json!({ "organizationHostedJobsPageName": organization }),
                &context,
            )
            .await?;

        Ok(data.and_then(|d| d.job_board).unwrap_or_default())
    }

    async fn fetch_job_posting(
        &self,
        organization: &str,
        posting_id: &str,
    ) -> Result<PostingDetail> {
        let context = format!("job posting {organization}/{posting_id}");
        let data: Option<JobPostingData> = self
            .execute(
                JOB_POSTING_OPERATION,
                JOB_POSTING_QUERY,
                json!({
                    "organizationHostedJobsPageName": organization,
                    "jobPostingId": posting_id,
                }),
                &context,
            )
            .await?;

        data.and_then(|d| d.job_posting)
            .ok_or_else(|| AppError::api(&context, "posting not found"))
    }
}
