//! Wizard step cursor — the five intake steps in fixed order.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

/// The five intake steps, traversed in order.
///
/// Forward navigation is gated by the step validator; backward navigation is
/// always permitted. Both clamp at the ends: there is no step 0 or step 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Anthropometrics,
    Lifestyle,
    PhysicalSigns,
    LabResults,
    Genomic,
}

impl WizardStep {
    /// Total number of steps.
    pub const COUNT: u8 = 5;

    /// All steps, in traversal order.
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Anthropometrics,
        WizardStep::Lifestyle,
        WizardStep::PhysicalSigns,
        WizardStep::LabResults,
        WizardStep::Genomic,
    ];

    /// 1-based index of this step.
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Anthropometrics => 1,
            WizardStep::Lifestyle => 2,
            WizardStep::PhysicalSigns => 3,
            WizardStep::LabResults => 4,
            WizardStep::Genomic => 5,
        }
    }

    /// Look up a step by 1-based index.
    pub fn from_index(index: u8) -> Result<Self, NavigationError> {
        match index {
            1 => Ok(WizardStep::Anthropometrics),
            2 => Ok(WizardStep::Lifestyle),
            3 => Ok(WizardStep::PhysicalSigns),
            4 => Ok(WizardStep::LabResults),
            5 => Ok(WizardStep::Genomic),
            _ => Err(NavigationError::OutOfRange {
                step: index,
                max: Self::COUNT,
            }),
        }
    }

    /// The next step, clamped at the final step.
    pub fn next(&self) -> WizardStep {
        match self {
            WizardStep::Anthropometrics => WizardStep::Lifestyle,
            WizardStep::Lifestyle => WizardStep::PhysicalSigns,
            WizardStep::PhysicalSigns => WizardStep::LabResults,
            WizardStep::LabResults => WizardStep::Genomic,
            WizardStep::Genomic => WizardStep::Genomic,
        }
    }

    /// The previous step, clamped at the first step.
    pub fn prev(&self) -> WizardStep {
        match self {
            WizardStep::Anthropometrics => WizardStep::Anthropometrics,
            WizardStep::Lifestyle => WizardStep::Anthropometrics,
            WizardStep::PhysicalSigns => WizardStep::Lifestyle,
            WizardStep::LabResults => WizardStep::PhysicalSigns,
            WizardStep::Genomic => WizardStep::LabResults,
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, WizardStep::Anthropometrics)
    }

    pub fn is_last(&self) -> bool {
        matches!(self, WizardStep::Genomic)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Anthropometrics
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Anthropometrics => "anthropometrics",
            Self::Lifestyle => "lifestyle",
            Self::PhysicalSigns => "physical_signs",
            Self::LabResults => "lab_results",
            Self::Genomic => "genomic",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        let mut current = WizardStep::Anthropometrics;
        for expected in &WizardStep::ALL[1..] {
            current = current.next();
            assert_eq!(current, *expected);
        }
        // Clamped at the end.
        assert_eq!(current.next(), WizardStep::Genomic);
    }

    #[test]
    fn prev_clamps_at_first() {
        assert_eq!(
            WizardStep::Anthropometrics.prev(),
            WizardStep::Anthropometrics
        );
        assert_eq!(WizardStep::Lifestyle.prev(), WizardStep::Anthropometrics);
        assert_eq!(WizardStep::Genomic.prev(), WizardStep::LabResults);
    }

    #[test]
    fn index_roundtrip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()).unwrap(), step);
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        for bad in [0u8, 6, 255] {
            let err = WizardStep::from_index(bad).unwrap_err();
            assert!(
                matches!(err, NavigationError::OutOfRange { step, max: 5 } if step == bad),
                "index {bad} should be out of range"
            );
        }
    }

    #[test]
    fn display_matches_serde() {
        for step in WizardStep::ALL {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn first_and_last() {
        assert!(WizardStep::Anthropometrics.is_first());
        assert!(WizardStep::Genomic.is_last());
        assert!(!WizardStep::PhysicalSigns.is_first());
        assert!(!WizardStep::PhysicalSigns.is_last());
    }
}
