//! Submission gateway — hands the completed record to the analysis service.

pub mod http;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SubmissionError;
use crate::intake::{IntakeRecord, SubmissionEnvelope};

pub use http::HttpTransport;
pub use mock::{MockOutcome, MockTransport};

/// Wire response from the analysis service's submit endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// Initial risk hint, e.g. "Low". The wizard itself ignores it.
    #[serde(default)]
    pub risk_score: Option<String>,
    #[serde(default)]
    pub next_action: Option<String>,
}

/// Confirmation that an envelope was received, distinct from the eventual
/// risk analysis result (which the wizard never awaits).
#[derive(Debug, Clone)]
pub struct Acknowledgment {
    /// Opaque correlation token, if the service supplied one.
    pub correlation_id: Option<String>,
    /// Initial risk hint, unused by the wizard.
    pub risk_hint: Option<String>,
    /// Suggested follow-up, unused by the wizard.
    pub next_action: Option<String>,
}

/// Transport seam to the external analysis collaborator.
///
/// One operation: deliver an envelope, eventually resolve with the service's
/// verdict. Implementations must not retry on their own.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit(&self, envelope: &SubmissionEnvelope) -> Result<SubmitResponse, SubmissionError>;
}

/// Serializes the intake record and sends it to the analysis service.
///
/// Stateless between attempts: every call builds a fresh envelope from the
/// record, nothing is cached for retry, and the record is never mutated.
pub struct SubmissionGateway {
    transport: Arc<dyn AnalysisTransport>,
}

impl SubmissionGateway {
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Self {
        Self { transport }
    }

    /// Submit a snapshot of the record. Success means the service accepted
    /// the envelope; the actual analysis happens out of band.
    pub async fn submit(&self, record: &IntakeRecord) -> Result<Acknowledgment, SubmissionError> {
        let envelope = SubmissionEnvelope::from_record(record);
        tracing::debug!(envelope_id = %envelope.envelope_id, "submitting intake envelope");

        let response = self.transport.submit(&envelope).await?;

        if !response.success {
            return Err(SubmissionError::Rejected {
                message: response.message,
            });
        }

        tracing::info!(
            envelope_id = %envelope.envelope_id,
            correlation_id = ?response.correlation_id,
            "submission acknowledged"
        );
        Ok(Acknowledgment {
            correlation_id: response.correlation_id,
            risk_hint: response.risk_score,
            next_action: response.next_action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::record::{Gender, IntakeUpdate};

    fn record() -> IntakeRecord {
        let mut record = IntakeRecord::default();
        record.apply(IntakeUpdate::new().age(30).gender(Gender::Female));
        record
    }

    #[tokio::test]
    async fn successful_submission_yields_acknowledgment() {
        let transport = Arc::new(MockTransport::instant());
        let gateway = SubmissionGateway::new(transport.clone());

        let ack = gateway.submit(&record()).await.unwrap();
        assert_eq!(ack.risk_hint.as_deref(), Some("Low"));
        assert!(ack.correlation_id.is_some());
        assert_eq!(transport.submissions(), 1);
    }

    #[tokio::test]
    async fn rejection_surfaces_service_message() {
        let transport = Arc::new(MockTransport::instant().with_outcome(MockOutcome::Reject));
        let gateway = SubmissionGateway::new(transport);

        let err = gateway.submit(&record()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected { .. }));
    }

    #[tokio::test]
    async fn submission_does_not_mutate_record() {
        let transport = Arc::new(MockTransport::instant());
        let gateway = SubmissionGateway::new(transport);

        let record = record();
        let before = record.clone();
        gateway.submit(&record).await.unwrap();
        assert_eq!(record, before);
    }

    #[tokio::test]
    async fn each_attempt_builds_a_fresh_envelope() {
        let transport = Arc::new(MockTransport::instant());
        let gateway = SubmissionGateway::new(transport.clone());

        let record = record();
        gateway.submit(&record).await.unwrap();
        let first = transport.last_envelope().unwrap().envelope_id;
        gateway.submit(&record).await.unwrap();
        let second = transport.last_envelope().unwrap().envelope_id;
        assert_ne!(first, second);
    }
}
