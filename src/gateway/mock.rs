//! Mock analysis transport for tests and offline development.
//!
//! Mirrors the backend's submit endpoint in-process: a fixed simulated
//! latency and a canned acknowledgment, switchable into failure modes.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SubmissionError;
use crate::intake::SubmissionEnvelope;

use super::{AnalysisTransport, SubmitResponse};

/// Simulated network latency matching the mock backend's response delay.
pub const MOCK_RESPONSE_DELAY: Duration = Duration::from_millis(800);

/// What the mock should do with each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    /// Acknowledge with the canned success payload.
    Succeed,
    /// Respond with `success: false`.
    Reject,
    /// Fail at the transport level (service unreachable).
    Unreachable,
    /// Respond as if the bearer credential were rejected.
    Unauthenticated,
}

/// In-process stand-in for the analysis service.
pub struct MockTransport {
    delay: Duration,
    outcome: MockOutcome,
    submissions: AtomicUsize,
    last_envelope: Mutex<Option<SubmissionEnvelope>>,
}

impl MockTransport {
    /// Mock with the standard simulated latency.
    pub fn new() -> Self {
        Self::with_delay(MOCK_RESPONSE_DELAY)
    }

    /// Mock that responds immediately. Preferred in tests that do not pause
    /// the clock.
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            outcome: MockOutcome::Succeed,
            submissions: AtomicUsize::new(0),
            last_envelope: Mutex::new(None),
        }
    }

    pub fn with_outcome(mut self, outcome: MockOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Number of submissions received so far.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    /// The most recently received envelope, if any.
    pub fn last_envelope(&self) -> Option<SubmissionEnvelope> {
        self.last_envelope.lock().expect("mock lock poisoned").clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisTransport for MockTransport {
    async fn submit(
        &self,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmitResponse, SubmissionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.submissions.fetch_add(1, Ordering::SeqCst);
        *self.last_envelope.lock().expect("mock lock poisoned") = Some(envelope.clone());

        match self.outcome {
            MockOutcome::Succeed => Ok(SubmitResponse {
                success: true,
                message: "Assessment analyzed successfully.".to_string(),
                correlation_id: Some(Uuid::new_v4().to_string()),
                risk_score: Some("Low".to_string()),
                next_action: Some("Schedule follow-up".to_string()),
            }),
            MockOutcome::Reject => Ok(SubmitResponse {
                success: false,
                message: "Assessment payload rejected.".to_string(),
                correlation_id: None,
                risk_score: None,
                next_action: None,
            }),
            MockOutcome::Unreachable => Err(SubmissionError::Transport {
                reason: "analysis service unreachable (mock)".to_string(),
            }),
            MockOutcome::Unauthenticated => Err(SubmissionError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeRecord;

    #[tokio::test]
    async fn records_submissions_and_envelopes() {
        let transport = MockTransport::instant();
        let envelope = SubmissionEnvelope::from_record(&IntakeRecord::default());

        let response = transport.submit(&envelope).await.unwrap();
        assert!(response.success);
        assert_eq!(transport.submissions(), 1);
        assert_eq!(
            transport.last_envelope().unwrap().envelope_id,
            envelope.envelope_id
        );
    }

    #[tokio::test]
    async fn failure_modes() {
        let envelope = SubmissionEnvelope::from_record(&IntakeRecord::default());

        let reject = MockTransport::instant().with_outcome(MockOutcome::Reject);
        assert!(!reject.submit(&envelope).await.unwrap().success);

        let down = MockTransport::instant().with_outcome(MockOutcome::Unreachable);
        assert!(matches!(
            down.submit(&envelope).await.unwrap_err(),
            SubmissionError::Transport { .. }
        ));

        let expired = MockTransport::instant().with_outcome(MockOutcome::Unauthenticated);
        assert!(matches!(
            expired.submit(&envelope).await.unwrap_err(),
            SubmissionError::Unauthenticated
        ));
    }
}
