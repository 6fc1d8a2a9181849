//! Reading catalog.
//!
//! Fixed list of the readings a snapshot can expose, with the keys and
//! units downstream consumers (dashboards, home-automation entities)
//! publish under. Numeric accessors yield `None` whenever the
//! snapshot's status withholds that value.

use crate::domain::models::MeasurementSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Weight,
    Bmi,
    BodyFat,
    MuscleMass,
    WaterPercentage,
    BoneMass,
    SkeletalMuscle,
    LeanBodyMass,
    VisceralFat,
    Status,
}

/// Every reading, in publication order.
pub const ALL_SENSORS: [SensorKind; 10] = [
    SensorKind::Weight,
    SensorKind::Bmi,
    SensorKind::BodyFat,
    SensorKind::MuscleMass,
    SensorKind::WaterPercentage,
    SensorKind::BoneMass,
    SensorKind::SkeletalMuscle,
    SensorKind::LeanBodyMass,
    SensorKind::VisceralFat,
    SensorKind::Status,
];

impl SensorKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Bmi => "bmi",
            Self::BodyFat => "body_fat",
            Self::MuscleMass => "muscle_mass",
            Self::WaterPercentage => "water_percentage",
            Self::BoneMass => "bone_mass",
            Self::SkeletalMuscle => "skeletal_muscle",
            Self::LeanBodyMass => "lean_body_mass",
            Self::VisceralFat => "visceral_fat",
            Self::Status => "scale_status",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Weight => "Weight",
            Self::Bmi => "BMI",
            Self::BodyFat => "Body Fat",
            Self::MuscleMass => "Muscle Mass",
            Self::WaterPercentage => "Water Percentage",
            Self::BoneMass => "Bone Mass",
            Self::SkeletalMuscle => "Skeletal Muscle",
            Self::LeanBodyMass => "Lean Body Mass",
            Self::VisceralFat => "Visceral Fat",
            Self::Status => "Scale Status",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Weight | Self::BoneMass | Self::LeanBodyMass => Some("kg"),
            Self::BodyFat | Self::MuscleMass | Self::WaterPercentage | Self::SkeletalMuscle => {
                Some("%")
            }
            Self::VisceralFat => Some("score"),
            Self::Bmi | Self::Status => None,
        }
    }

    /// Numeric value of this reading, if the snapshot carries it.
    /// [`SensorKind::Status`] has no numeric value; read
    /// [`MeasurementSnapshot::status_label`] instead.
    pub fn value(&self, snapshot: &MeasurementSnapshot) -> Option<f64> {
        let metrics = snapshot.metrics();
        match self {
            Self::Weight => snapshot.weight(),
            Self::Bmi => metrics.map(|m| m.bmi),
            Self::BodyFat => metrics.map(|m| m.body_fat),
            Self::MuscleMass => metrics.map(|m| m.muscle_mass),
            Self::WaterPercentage => metrics.map(|m| m.water_percentage),
            Self::BoneMass => metrics.map(|m| m.bone_mass),
            Self::SkeletalMuscle => metrics.map(|m| m.skeletal_muscle),
            Self::LeanBodyMass => metrics.map(|m| m.lean_body_mass),
            Self::VisceralFat => metrics.map(|m| m.visceral_fat),
            Self::Status => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimator::estimate;
    use crate::domain::models::UserProfile;

    #[test]
    fn test_idle_snapshot_exposes_no_numbers() {
        let snapshot = MeasurementSnapshot::Idle;
        for sensor in ALL_SENSORS {
            assert_eq!(sensor.value(&snapshot), None, "{}", sensor.key());
        }
    }

    #[test]
    fn test_measuring_snapshot_exposes_weight_only() {
        let snapshot = MeasurementSnapshot::Measuring {
            weight: 50.0,
            count: 9,
        };
        assert_eq!(SensorKind::Weight.value(&snapshot), Some(50.0));
        assert_eq!(SensorKind::Bmi.value(&snapshot), None);
        assert_eq!(SensorKind::BodyFat.value(&snapshot), None);
    }

    #[test]
    fn test_stable_snapshot_exposes_all_metrics() {
        let metrics = estimate(67.0, 2000, &UserProfile::default());
        let snapshot = MeasurementSnapshot::Stable {
            weight: 67.0,
            count: 5,
            metrics,
        };
        assert_eq!(SensorKind::Weight.value(&snapshot), Some(67.0));
        assert_eq!(SensorKind::Bmi.value(&snapshot), Some(metrics.bmi));
        assert_eq!(
            SensorKind::VisceralFat.value(&snapshot),
            Some(metrics.visceral_fat)
        );
    }

    #[test]
    fn test_keys_and_units() {
        assert_eq!(SensorKind::WaterPercentage.key(), "water_percentage");
        assert_eq!(SensorKind::Weight.unit(), Some("kg"));
        assert_eq!(SensorKind::BodyFat.unit(), Some("%"));
        assert_eq!(SensorKind::VisceralFat.unit(), Some("score"));
        assert_eq!(SensorKind::Bmi.unit(), None);
    }
}
