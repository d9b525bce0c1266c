//! HTTP transport to the analysis API.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::IntakeConfig;
use crate::error::SubmissionError;
use crate::intake::SubmissionEnvelope;

use super::{AnalysisTransport, SubmitResponse};

/// Real transport: JSON POST to `{base}/assessment/submit`, bearer
/// credential attached when configured.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<SecretString>,
}

impl HttpTransport {
    pub fn new(config: &IntakeConfig) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(config.submit_timeout)
            .build()
            .map_err(|e| SubmissionError::Transport {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn submit(
        &self,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmitResponse, SubmissionError> {
        let mut request = self.client.post(self.api_url("assessment/submit")).json(envelope);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| SubmissionError::Transport {
            reason: e.to_string(),
        })?;

        // An expired or invalid credential abandons the session; the engine
        // itself never inspects the token.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(SubmissionError::Unauthenticated);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmissionError::Transport {
                reason: format!("HTTP {status}: {body}"),
            });
        }

        response
            .json::<SubmitResponse>()
            .await
            .map_err(|e| SubmissionError::InvalidResponse {
                reason: e.to_string(),
            })
    }
}
