//! Core data types for scale measurements and user configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Body data the estimation formulas are parameterized on.
///
/// Height outside 100-220 cm and age outside 10-99 are accepted; the
/// recommended ranges are advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub sex: Sex,
    pub height_cm: f64,
    pub age: u32,
    /// Selects the athletic-build variants of the formulas.
    pub is_active: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            height_cm: 170.0,
            age: 30,
            is_active: false,
        }
    }
}

impl UserProfile {
    /// Warn about values outside the recommended ranges without rejecting them.
    pub fn warn_if_out_of_range(&self) {
        if !(100.0..=220.0).contains(&self.height_cm) {
            tracing::warn!(
                "Height {} cm is outside the recommended 100-220 cm range",
                self.height_cm
            );
        }
        if !(10..=99).contains(&self.age) {
            tracing::warn!("Age {} is outside the recommended 10-99 range", self.age);
        }
    }
}

/// Full metrics set derived from a stable weight + resistance reading.
///
/// All values are rounded for display: one decimal place, except
/// `visceral_fat` which is a whole-number score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionMetrics {
    pub bmi: f64,
    /// Percent. `0.0` stands for an implausible reading (raw value
    /// outside 5-75), not an actual measurement of zero.
    pub body_fat: f64,
    pub muscle_mass: f64,
    pub water_percentage: f64,
    pub bone_mass: f64,
    pub skeletal_muscle: f64,
    pub lean_body_mass: f64,
    pub visceral_fat: f64,
}

/// One processed advertisement, tagged by measurement state.
///
/// Serializes to the flat record shape downstream consumers expect,
/// e.g. `{"status":"stable","weight":67.0,"count":5,"bmi":21.9,...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MeasurementSnapshot {
    /// Weighing finished or nobody on the platform.
    Idle,
    /// Live but unsettled weight.
    Measuring { weight: f64, count: u8 },
    /// Settled reading with the full metrics set.
    Stable {
        weight: f64,
        count: u8,
        #[serde(flatten)]
        metrics: BodyCompositionMetrics,
    },
}

impl MeasurementSnapshot {
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Measuring { .. } => "measuring",
            Self::Stable { .. } => "stable",
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Stable { .. })
    }

    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::Idle => None,
            Self::Measuring { weight, .. } | Self::Stable { weight, .. } => Some(*weight),
        }
    }

    pub fn count(&self) -> Option<u8> {
        match self {
            Self::Idle => None,
            Self::Measuring { count, .. } | Self::Stable { count, .. } => Some(*count),
        }
    }

    pub fn metrics(&self) -> Option<&BodyCompositionMetrics> {
        match self {
            Self::Stable { metrics, .. } => Some(metrics),
            _ => None,
        }
    }
}
