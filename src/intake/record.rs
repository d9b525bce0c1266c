//! The accumulating intake record and its partial-update type.
//!
//! `IntakeRecord` is the single mutable aggregate for one intake session,
//! owned exclusively by the wizard controller. Every field starts unset —
//! unset is distinct from zero, so numerics are `Option`s and the enums have
//! no "unset" variant of their own.

use serde::{Deserialize, Serialize};

/// Reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-reported physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A binary attachment (skin photo, lab report, raw DNA file).
///
/// Owned by the record until submission, which serializes only the file name
/// into the envelope; the bytes stay behind for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name, e.g. `"neck.jpg"`.
    pub file_name: String,
    /// MIME type, if known.
    pub media_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: None,
            bytes,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// The accumulating, partially-filled intake record.
///
/// Held only in volatile memory for the session's duration; there is no
/// persisted or resumable form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeRecord {
    // Step 1: anthropometrics
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub waist_cm: Option<f64>,
    /// Optional extra measurement; validated only when present.
    pub hip_cm: Option<f64>,

    // Step 2: lifestyle
    pub activity_level: Option<ActivityLevel>,
    pub sleep_hours: Option<f64>,
    pub family_history: bool,

    // Steps 3–5: attachments
    pub signs_image: Option<Attachment>,
    pub lab_file: Option<Attachment>,
    pub genomic_file: Option<Attachment>,
}

impl IntakeRecord {
    /// Merge a partial update into the record. Never fails: validation is
    /// the step validator's job, not the record's.
    ///
    /// Idempotent: applying the same update twice yields the same record as
    /// applying it once.
    pub fn apply(&mut self, update: IntakeUpdate) {
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(height) = update.height_cm {
            self.height_cm = Some(height);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(waist) = update.waist_cm {
            self.waist_cm = Some(waist);
        }
        if let Some(hip) = update.hip_cm {
            self.hip_cm = Some(hip);
        }
        if let Some(level) = update.activity_level {
            self.activity_level = Some(level);
        }
        if let Some(sleep) = update.sleep_hours {
            self.sleep_hours = Some(sleep);
        }
        if let Some(history) = update.family_history {
            self.family_history = history;
        }
        if let Some(image) = update.signs_image {
            self.signs_image = image;
        }
        if let Some(file) = update.lab_file {
            self.lab_file = file;
        }
        if let Some(file) = update.genomic_file {
            self.genomic_file = file;
        }
    }
}

/// A partial update to the intake record: only set fields are merged.
///
/// Attachment fields are doubly optional: the outer `Option` means "touch
/// this field at all", the inner one distinguishes attach from remove.
#[derive(Debug, Clone, Default)]
pub struct IntakeUpdate {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub sleep_hours: Option<f64>,
    pub family_history: Option<bool>,
    pub signs_image: Option<Option<Attachment>>,
    pub lab_file: Option<Option<Attachment>>,
    pub genomic_file: Option<Option<Attachment>>,
}

impl IntakeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn height_cm(mut self, height: f64) -> Self {
        self.height_cm = Some(height);
        self
    }

    pub fn weight_kg(mut self, weight: f64) -> Self {
        self.weight_kg = Some(weight);
        self
    }

    pub fn waist_cm(mut self, waist: f64) -> Self {
        self.waist_cm = Some(waist);
        self
    }

    pub fn hip_cm(mut self, hip: f64) -> Self {
        self.hip_cm = Some(hip);
        self
    }

    pub fn activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    pub fn sleep_hours(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }

    pub fn family_history(mut self, history: bool) -> Self {
        self.family_history = Some(history);
        self
    }

    pub fn attach_signs_image(mut self, attachment: Attachment) -> Self {
        self.signs_image = Some(Some(attachment));
        self
    }

    pub fn remove_signs_image(mut self) -> Self {
        self.signs_image = Some(None);
        self
    }

    pub fn attach_lab_file(mut self, attachment: Attachment) -> Self {
        self.lab_file = Some(Some(attachment));
        self
    }

    pub fn remove_lab_file(mut self) -> Self {
        self.lab_file = Some(None);
        self
    }

    pub fn attach_genomic_file(mut self, attachment: Attachment) -> Self {
        self.genomic_file = Some(Some(attachment));
        self
    }

    pub fn remove_genomic_file(mut self) -> Self {
        self.genomic_file = Some(None);
        self
    }
}
