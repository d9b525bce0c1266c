//! Wizard controller — step sequencing and record custody.
//!
//! Owns the intake record for the lifetime of one session. Forward
//! navigation is gated by the step validator; everything else is ungated.
//! The controller has no terminal state of its own — "finished" is a session
//! event that eventually calls [`WizardController::reset`].

use crate::error::{NavigationError, ValidationError};
use crate::intake::{IntakeRecord, IntakeUpdate};

use super::step::WizardStep;
use super::validator::validate_step;

/// Owns the intake record and the step cursor.
#[derive(Debug, Default)]
pub struct WizardController {
    record: IntakeRecord,
    cursor: WizardStep,
    dirty: bool,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active step.
    pub fn cursor(&self) -> WizardStep {
        self.cursor
    }

    /// Read access to the accumulated record.
    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    /// Whether any field has been touched since the last reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Merge a partial update into the record. Always succeeds; validation
    /// happens only on `advance`.
    pub fn update(&mut self, update: IntakeUpdate) {
        self.record.apply(update);
        self.dirty = true;
    }

    /// Validate the current step and move the cursor forward (clamped at the
    /// final step). On failure the cursor does not move and every failing
    /// field is reported.
    pub fn advance(&mut self) -> Result<WizardStep, ValidationError> {
        validate_step(self.cursor, &self.record)?;
        self.cursor = self.cursor.next();
        tracing::debug!(step = %self.cursor, "advanced to step");
        Ok(self.cursor)
    }

    /// Move the cursor backward (clamped at the first step). Never validates
    /// and never erases data already entered for later steps.
    pub fn retreat(&mut self) -> WizardStep {
        self.cursor = self.cursor.prev();
        tracing::debug!(step = %self.cursor, "retreated to step");
        self.cursor
    }

    /// Set the cursor directly by 1-based index. Rejects anything outside
    /// the valid step range; intended for terminal reset paths, not normal
    /// navigation.
    pub fn jump_to(&mut self, index: u8) -> Result<WizardStep, NavigationError> {
        self.cursor = WizardStep::from_index(index)?;
        Ok(self.cursor)
    }

    /// Validate the final step without moving the cursor. The session calls
    /// this before submission.
    pub fn validate_current(&self) -> Result<(), ValidationError> {
        validate_step(self.cursor, &self.record)
    }

    /// Discard the record and return the cursor to the first step.
    pub fn reset(&mut self) {
        self.record = IntakeRecord::default();
        self.cursor = WizardStep::Anthropometrics;
        self.dirty = false;
        tracing::debug!("wizard reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::record::{ActivityLevel, Attachment, Gender};

    fn step1_update() -> IntakeUpdate {
        IntakeUpdate::new()
            .age(25)
            .gender(Gender::Male)
            .height_cm(175.0)
            .weight_kg(70.0)
            .waist_cm(85.0)
    }

    fn step2_update() -> IntakeUpdate {
        IntakeUpdate::new()
            .activity_level(ActivityLevel::Moderate)
            .sleep_hours(7.5)
            .family_history(false)
    }

    #[test]
    fn advance_blocked_until_step_is_valid() {
        let mut wizard = WizardController::new();
        let err = wizard.advance().unwrap_err();
        assert!(!err.failures.is_empty());
        assert_eq!(wizard.cursor(), WizardStep::Anthropometrics);

        wizard.update(step1_update());
        assert_eq!(wizard.advance().unwrap(), WizardStep::Lifestyle);
    }

    #[test]
    fn update_never_fails_even_with_bad_values() {
        let mut wizard = WizardController::new();
        wizard.update(IntakeUpdate::new().age(7));
        assert_eq!(wizard.record().age, Some(7));
        assert!(wizard.is_dirty());
        // The bad value only bites on advance.
        assert!(wizard.advance().is_err());
    }

    #[test]
    fn retreat_is_ungated_and_preserves_data() {
        let mut wizard = WizardController::new();
        wizard.update(step1_update());
        wizard.advance().unwrap();
        wizard.update(step2_update());
        wizard.advance().unwrap();

        assert_eq!(wizard.retreat(), WizardStep::Lifestyle);
        assert_eq!(wizard.retreat(), WizardStep::Anthropometrics);
        // Clamped at the first step.
        assert_eq!(wizard.retreat(), WizardStep::Anthropometrics);
        // Later-step data survives going backward.
        assert_eq!(wizard.record().sleep_hours, Some(7.5));
    }

    #[test]
    fn retreat_then_advance_round_trips() {
        let mut wizard = WizardController::new();
        wizard.update(step1_update());
        wizard.advance().unwrap();
        let at = wizard.cursor();

        wizard.retreat();
        assert_eq!(wizard.advance().unwrap(), at);
    }

    #[test]
    fn advance_clamps_at_final_step() {
        let mut wizard = WizardController::new();
        wizard.jump_to(5).unwrap();
        // Genomic has no required fields; advancing clamps in place.
        assert_eq!(wizard.advance().unwrap(), WizardStep::Genomic);
    }

    #[test]
    fn jump_to_rejects_out_of_range() {
        let mut wizard = WizardController::new();
        assert!(wizard.jump_to(0).is_err());
        assert!(wizard.jump_to(6).is_err());
        assert_eq!(wizard.cursor(), WizardStep::Anthropometrics);

        assert_eq!(wizard.jump_to(3).unwrap(), WizardStep::PhysicalSigns);
    }

    #[test]
    fn reset_clears_record_and_cursor() {
        let mut wizard = WizardController::new();
        wizard.update(step1_update());
        wizard.advance().unwrap();
        wizard
            .update(IntakeUpdate::new().attach_signs_image(Attachment::new("n.jpg", vec![1])));

        wizard.reset();
        assert_eq!(wizard.cursor(), WizardStep::Anthropometrics);
        assert_eq!(*wizard.record(), IntakeRecord::default());
        assert!(!wizard.is_dirty());
    }

    #[test]
    fn full_walk_to_final_step() {
        let mut wizard = WizardController::new();
        wizard.update(step1_update());
        wizard.advance().unwrap();
        wizard.update(step2_update());
        wizard.advance().unwrap();
        wizard
            .update(IntakeUpdate::new().attach_signs_image(Attachment::new("n.jpg", vec![1])));
        wizard.advance().unwrap();
        // Lab results: skipped entirely.
        wizard.advance().unwrap();
        assert_eq!(wizard.cursor(), WizardStep::Genomic);
        assert!(wizard.validate_current().is_ok());
    }
}
