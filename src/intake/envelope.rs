//! Submission envelope — the immutable snapshot sent to the analysis service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::record::{ActivityLevel, Gender, IntakeRecord};

/// A snapshot of the intake record taken at submission time.
///
/// Scalar, enum, and boolean fields are copied as-is; attachments are
/// represented by file name only; the bytes are deferred to the transport
/// layer. Immutable once created and never resent automatically: a retry
/// rebuilds a fresh envelope from the still-intact record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEnvelope {
    /// Client-generated envelope id, for log correlation.
    pub envelope_id: Uuid,
    pub submitted_at: DateTime<Utc>,

    pub age: Option<u32>,
    pub gender: Option<Gender>,
    #[serde(rename = "height")]
    pub height_cm: Option<f64>,
    #[serde(rename = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "waistCircumference")]
    pub waist_cm: Option<f64>,
    #[serde(rename = "hipCircumference")]
    pub hip_cm: Option<f64>,

    pub activity_level: Option<ActivityLevel>,
    pub sleep_hours: Option<f64>,
    pub family_history: bool,

    /// File name of the physical-signs image, if attached.
    pub signs_image: Option<String>,
    /// File name of the lab report, if attached.
    pub lab_file: Option<String>,
    /// File name of the genomic data file, if attached.
    pub genomic_file: Option<String>,
}

impl SubmissionEnvelope {
    /// Snapshot the record. Does not consume or mutate it.
    pub fn from_record(record: &IntakeRecord) -> Self {
        Self {
            envelope_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            age: record.age,
            gender: record.gender,
            height_cm: record.height_cm,
            weight_kg: record.weight_kg,
            waist_cm: record.waist_cm,
            hip_cm: record.hip_cm,
            activity_level: record.activity_level,
            sleep_hours: record.sleep_hours,
            family_history: record.family_history,
            signs_image: record.signs_image.as_ref().map(|a| a.file_name.clone()),
            lab_file: record.lab_file.as_ref().map(|a| a.file_name.clone()),
            genomic_file: record.genomic_file.as_ref().map(|a| a.file_name.clone()),
        }
    }
}
