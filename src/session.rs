//! Intake session — one traversal of the wizard from first step to
//! submission (or abandonment).
//!
//! The session is an explicitly constructed object, created at session start
//! and torn down on reset/abandon; there is no process-wide state. Every
//! mutating operation takes `&mut self`, so a single active caller is the
//! only possible writer. Dropping the session aborts any in-flight analysis
//! run, and a dropped run can never trigger the completion reset.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{Error, Result, SessionError};
use crate::gateway::{Acknowledgment, AnalysisTransport, SubmissionGateway};
use crate::intake::{IntakeRecord, IntakeUpdate};
use crate::progress::{ProgressReporter, ProgressRun, ProgressState};
use crate::wizard::{SessionPhase, WizardController, WizardStep};

/// Coordinates the wizard controller, submission gateway, and progress
/// reporter for one intake session.
pub struct IntakeSession {
    id: Uuid,
    controller: WizardController,
    gateway: SubmissionGateway,
    reporter: ProgressReporter,
    phase: SessionPhase,
    run: Option<ProgressRun>,
}

impl IntakeSession {
    /// Start a session with the standard progress pacing.
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Self {
        Self::with_reporter(transport, ProgressReporter::default())
    }

    /// Start a session with custom progress pacing.
    pub fn with_reporter(transport: Arc<dyn AnalysisTransport>, reporter: ProgressReporter) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "intake session started");
        Self {
            id,
            controller: WizardController::new(),
            gateway: SubmissionGateway::new(transport),
            reporter,
            phase: SessionPhase::default(),
            run: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The currently active step.
    pub fn cursor(&self) -> WizardStep {
        self.controller.cursor()
    }

    /// Read access to the accumulated record.
    pub fn record(&self) -> &IntakeRecord {
        self.controller.record()
    }

    /// Whether any field has been touched since the last reset.
    pub fn is_dirty(&self) -> bool {
        self.controller.is_dirty()
    }

    /// Merge a partial update into the record. Only legal while editing.
    pub fn update(&mut self, update: IntakeUpdate) -> Result<()> {
        self.require_editing("update")?;
        self.controller.update(update);
        Ok(())
    }

    /// Validate the current step and move forward.
    pub fn advance(&mut self) -> Result<WizardStep> {
        self.require_editing("advance")?;
        let step = self.controller.advance()?;
        self.transition(SessionPhase::Editing(step))?;
        Ok(step)
    }

    /// Move backward, ungated.
    pub fn retreat(&mut self) -> Result<WizardStep> {
        self.require_editing("retreat")?;
        let step = self.controller.retreat();
        self.transition(SessionPhase::Editing(step))?;
        Ok(step)
    }

    /// Submit the record and, on acknowledgment, start the staged analysis
    /// run. Legal from the final editing step, or from `Failed` as a manual
    /// retry (a fresh envelope is rebuilt from the intact record).
    ///
    /// On submission failure the session moves to `Failed`, the record is
    /// untouched, and the analysis run does not start.
    pub async fn finish(&mut self) -> Result<Acknowledgment> {
        match self.phase {
            SessionPhase::Editing(step) if step.is_last() => {}
            SessionPhase::Failed => {}
            phase => {
                return Err(SessionError::InvalidPhase {
                    phase: phase.to_string(),
                    operation: "finish",
                }
                .into());
            }
        }

        self.controller.validate_current()?;
        self.transition(SessionPhase::Submitting)?;

        match self.gateway.submit(self.controller.record()).await {
            Ok(ack) => {
                self.transition(SessionPhase::ReportingProgress)?;
                self.run = Some(self.reporter.start());
                tracing::info!(session_id = %self.id, "analysis run started");
                Ok(ack)
            }
            Err(err) => {
                self.transition(SessionPhase::Failed)?;
                tracing::warn!(session_id = %self.id, error = %err, "submission failed");
                Err(err.into())
            }
        }
    }

    /// Subscribe to the active analysis run's progress, if one is running.
    pub fn progress(&self) -> Option<watch::Receiver<ProgressState>> {
        self.run.as_ref().map(|run| run.progress())
    }

    /// Wait for the active analysis run to complete, then reset the wizard
    /// for a new intake. This is the only path that calls reset after a
    /// submission, and it runs at most once per run.
    pub async fn await_completion(&mut self) -> Result<()> {
        let run = self.run.take().ok_or(SessionError::InvalidPhase {
            phase: self.phase.to_string(),
            operation: "await_completion",
        })?;

        if !run.wait().await {
            return Err(SessionError::AnalysisInterrupted.into());
        }

        self.transition(SessionPhase::Done)?;
        self.controller.reset();
        self.transition(SessionPhase::Editing(WizardStep::Anthropometrics))?;
        tracing::info!(session_id = %self.id, "analysis complete, session reset");
        Ok(())
    }

    /// Dismiss a submission failure and return to editing the final step.
    pub fn resume_editing(&mut self) -> Result<()> {
        self.transition(SessionPhase::Editing(WizardStep::Genomic))
            .map_err(Error::from)
    }

    /// Abandon the session: cancel any active run and discard all data.
    /// Never triggers the completion path.
    pub fn abandon(&mut self) {
        if self.run.take().is_some() {
            tracing::info!(session_id = %self.id, "active analysis run cancelled");
        }
        self.controller.reset();
        self.phase = SessionPhase::default();
        tracing::info!(session_id = %self.id, "intake session abandoned");
    }

    fn require_editing(&self, operation: &'static str) -> std::result::Result<(), SessionError> {
        if self.phase.is_editing() {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                phase: self.phase.to_string(),
                operation,
            })
        }
    }

    fn transition(&mut self, to: SessionPhase) -> std::result::Result<(), SessionError> {
        if !self.phase.can_transition_to(to) {
            return Err(SessionError::InvalidTransition {
                from: self.phase.to_string(),
                to: to.to_string(),
            });
        }
        tracing::debug!(session_id = %self.id, from = %self.phase, to = %to, "session transition");
        self.phase = to;
        Ok(())
    }
}
