//! Per-step validation rules.
//!
//! Pure predicates over (step, record) with no side effects. A step's rule
//! set is re-evaluated atomically: the result lists every currently-failing
//! field, not just the first.

use std::ops::RangeInclusive;

use crate::error::{FieldError, ValidationError};
use crate::intake::IntakeRecord;

use super::step::WizardStep;

/// Field names as they appear in validation failures.
pub mod field {
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const HEIGHT_CM: &str = "height_cm";
    pub const WEIGHT_KG: &str = "weight_kg";
    pub const WAIST_CM: &str = "waist_cm";
    pub const HIP_CM: &str = "hip_cm";
    pub const ACTIVITY_LEVEL: &str = "activity_level";
    pub const SLEEP_HOURS: &str = "sleep_hours";
    pub const SIGNS_IMAGE: &str = "signs_image";
}

pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 50.0..=300.0;
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 20.0..=300.0;
pub const WAIST_CM_RANGE: RangeInclusive<f64> = 30.0..=200.0;
pub const HIP_CM_RANGE: RangeInclusive<f64> = 30.0..=200.0;
pub const SLEEP_HOURS_RANGE: RangeInclusive<f64> = 1.0..=24.0;

/// Validate one step of the record. `Ok(())` means the cursor may advance.
pub fn validate_step(step: WizardStep, record: &IntakeRecord) -> Result<(), ValidationError> {
    let failures = match step {
        WizardStep::Anthropometrics => validate_anthropometrics(record),
        WizardStep::Lifestyle => validate_lifestyle(record),
        WizardStep::PhysicalSigns => validate_physical_signs(record),
        // Lab results and genomic data are optional; these steps always pass.
        WizardStep::LabResults | WizardStep::Genomic => Vec::new(),
    };

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            step: step.index(),
            failures,
        })
    }
}

fn validate_anthropometrics(record: &IntakeRecord) -> Vec<FieldError> {
    let mut failures = Vec::new();

    match record.age {
        None => failures.push(FieldError::new(field::AGE, "required")),
        Some(age) if !AGE_RANGE.contains(&age) => failures.push(FieldError::new(
            field::AGE,
            format!("must be between {} and {}", AGE_RANGE.start(), AGE_RANGE.end()),
        )),
        Some(_) => {}
    }

    if record.gender.is_none() {
        failures.push(FieldError::new(field::GENDER, "required"));
    }

    check_range(&mut failures, field::HEIGHT_CM, record.height_cm, &HEIGHT_CM_RANGE, true);
    check_range(&mut failures, field::WEIGHT_KG, record.weight_kg, &WEIGHT_KG_RANGE, true);
    check_range(&mut failures, field::WAIST_CM, record.waist_cm, &WAIST_CM_RANGE, true);
    // Hip circumference is optional, but range-checked when entered.
    check_range(&mut failures, field::HIP_CM, record.hip_cm, &HIP_CM_RANGE, false);

    failures
}

fn validate_lifestyle(record: &IntakeRecord) -> Vec<FieldError> {
    let mut failures = Vec::new();

    if record.activity_level.is_none() {
        failures.push(FieldError::new(field::ACTIVITY_LEVEL, "required"));
    }

    check_range(&mut failures, field::SLEEP_HOURS, record.sleep_hours, &SLEEP_HOURS_RANGE, true);
    // family_history is a boolean: both values are valid.

    failures
}

fn validate_physical_signs(record: &IntakeRecord) -> Vec<FieldError> {
    // The only mandatory attachment in the whole flow.
    if record.signs_image.is_none() {
        vec![FieldError::new(field::SIGNS_IMAGE, "an image is required")]
    } else {
        Vec::new()
    }
}

fn check_range(
    failures: &mut Vec<FieldError>,
    name: &'static str,
    value: Option<f64>,
    range: &RangeInclusive<f64>,
    required: bool,
) {
    match value {
        None if required => failures.push(FieldError::new(name, "required")),
        None => {}
        Some(v) if !range.contains(&v) => failures.push(FieldError::new(
            name,
            format!("must be between {} and {}", range.start(), range.end()),
        )),
        Some(_) => {}
    }
}
