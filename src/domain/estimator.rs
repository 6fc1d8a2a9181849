//! Body Composition Estimator
//!
//! Turns a stable weight + bio-impedance reading and a user profile into
//! the full metrics set, using the empirical formulas of the scale
//! vendor's companion app. Every path is total: implausible inputs are
//! absorbed by sentinel and clamping rules, never surfaced as errors.

use crate::domain::models::{BodyCompositionMetrics, Sex, UserProfile};

/// Formula engine parameterized on the invariant parts of a profile.
///
/// Stateless between calls; age travels with the individual formulas
/// that consume it.
#[derive(Debug, Clone, Copy)]
pub struct BodyCompositionEstimator {
    sex: Sex,
    height_cm: f64,
    fitness_body_type: bool,
}

impl BodyCompositionEstimator {
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            sex: profile.sex,
            height_cm: profile.height_cm,
            fitness_body_type: profile.is_active,
        }
    }

    pub fn bmi(&self, weight_kg: f64) -> f64 {
        let h = self.height_cm / 100.0;
        weight_kg / (h * h)
    }

    /// Body fat percentage from weight, age and impedance.
    ///
    /// A result below 5 or above 75 is replaced by the sentinel `0.0`
    /// (implausible reading); downstream formulas consume the sentinel
    /// as-is rather than short-circuiting.
    pub fn body_fat(&self, age: u32, weight_kg: f64, resistance_ohm: u32) -> f64 {
        let mut r = (resistance_ohm as f64 - 100.0) / 100.0;
        let h = self.height_cm / 100.0;
        // Unusually high impedance contributes dampened
        if r >= 1.0 {
            r = r.sqrt();
        }
        let mut fat = (weight_kg * 1.5 / h / h) + (age as f64 * 0.08);
        if self.sex == Sex::Male {
            fat -= 10.8;
        }
        fat = (fat - 7.4) + r;
        if fat < 5.0 || fat > 75.0 {
            fat = 0.0;
        }
        fat
    }

    pub fn muscle_mass(&self, body_fat: f64) -> f64 {
        let factor = if self.fitness_body_type { 0.70 } else { 0.67 };
        round_to((100.0 - body_fat) * factor, 100.0)
    }

    pub fn skeletal_muscle(&self, body_fat: f64) -> f64 {
        let factor = if self.fitness_body_type { 0.60 } else { 0.53 };
        round_to((100.0 - body_fat) * factor, 100.0)
    }

    pub fn water(&self, body_fat: f64) -> f64 {
        round_to((100.0 - body_fat) * 0.726, 100.0)
    }

    /// Bone mass in kg. Consumes the muscle mass percentage as returned
    /// by [`Self::muscle_mass`], two-decimal arithmetic included.
    pub fn bone_mass(&self, muscle_mass: f64, weight_kg: f64) -> f64 {
        let height_offset = self.height_cm - 170.0;
        let bone = match self.sex {
            Sex::Male => {
                (weight_kg * (muscle_mass / 100.0) * 4.0) / 7.0 * 0.22 * 0.6
                    + height_offset / 100.0
            }
            Sex::Female => {
                (weight_kg * (muscle_mass / 100.0) * 4.0) / 7.0 * 0.34 * 0.45
                    + height_offset / 100.0
            }
        };
        round_to(bone, 10.0)
    }

    pub fn lean_body_mass(&self, weight_kg: f64, body_fat: f64) -> f64 {
        weight_kg * (100.0 - body_fat) / 100.0
    }

    /// Visceral fat score. Range 1-30, or 1-9 for the athletic build.
    pub fn visceral_fat(&self, body_fat: f64, age: u32) -> f64 {
        let age = age.clamp(18, 120);

        let vf = if !self.fitness_body_type {
            let offset = match self.sex {
                Sex::Male => {
                    if age < 40 {
                        21.0
                    } else if age < 60 {
                        22.0
                    } else {
                        24.0
                    }
                }
                Sex::Female => {
                    if age < 40 {
                        34.0
                    } else if age < 60 {
                        35.0
                    } else {
                        36.0
                    }
                }
            };
            let f = body_fat - offset;
            let d = if f > 0.0 { 1.1 } else { 1.0 };
            f / d + 9.5
        } else if body_fat > 15.0 {
            (body_fat - 15.0) / 1.1 + 12.0
        } else {
            12.0 - (15.0 - body_fat) / 1.4
        };

        let upper = if self.fitness_body_type { 9.0 } else { 30.0 };
        vf.clamp(1.0, upper)
    }
}

/// Compute all metrics for a stable reading.
///
/// Body fat is evaluated first; the other formulas consume it. Pure and
/// idempotent, safe to call from any context.
pub fn estimate(weight_kg: f64, resistance_ohm: u32, profile: &UserProfile) -> BodyCompositionMetrics {
    let estimator = BodyCompositionEstimator::new(profile);

    let bmi = estimator.bmi(weight_kg);
    let body_fat = estimator.body_fat(profile.age, weight_kg, resistance_ohm);
    let muscle_mass = estimator.muscle_mass(body_fat);
    let water = estimator.water(body_fat);
    let bone_mass = estimator.bone_mass(muscle_mass, weight_kg);
    let skeletal_muscle = estimator.skeletal_muscle(body_fat);
    let lean_body_mass = estimator.lean_body_mass(weight_kg, body_fat);
    let visceral_fat = estimator.visceral_fat(body_fat, profile.age);

    BodyCompositionMetrics {
        bmi: round_1dp(bmi),
        body_fat: round_1dp(body_fat),
        muscle_mass: round_1dp(muscle_mass),
        water_percentage: round_1dp(water),
        bone_mass: round_1dp(bone_mass),
        skeletal_muscle: round_1dp(skeletal_muscle),
        lean_body_mass: round_1dp(lean_body_mass),
        visceral_fat: visceral_fat.round(),
    }
}

// Companion-app arithmetic: offsets by half a step instead of truly
// rounding (no floor). Kept as-is so readings match the vendor app.
fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale + 0.5) / scale
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(sex: Sex, height_cm: f64, age: u32, is_active: bool) -> UserProfile {
        UserProfile {
            sex,
            height_cm,
            age,
            is_active,
        }
    }

    #[test]
    fn test_reference_reading_male_inactive() {
        // 67.00 kg at 2000 ohm, the reference broadcast scenario
        let p = profile(Sex::Male, 175.0, 30, false);
        let m = estimate(67.0, 2000, &p);
        assert_eq!(m.bmi, 21.9);
        assert_eq!(m.body_fat, 21.4);
        assert_eq!(m.muscle_mass, 52.7);
        assert_eq!(m.water_percentage, 57.1);
        assert_eq!(m.bone_mass, 2.8);
        assert_eq!(m.skeletal_muscle, 41.7);
        assert_eq!(m.lean_body_mass, 52.7);
        assert_eq!(m.visceral_fat, 10.0);
    }

    #[test]
    fn test_female_inactive() {
        let p = profile(Sex::Female, 160.0, 45, false);
        let m = estimate(58.6, 500, &p);
        assert_eq!(m.bmi, 22.9);
        assert_eq!(m.body_fat, 32.5);
        assert_eq!(m.muscle_mass, 45.2);
        assert_eq!(m.water_percentage, 49.0);
        assert_eq!(m.bone_mass, 2.3);
        assert_eq!(m.skeletal_muscle, 35.8);
        assert_eq!(m.lean_body_mass, 39.5);
        assert_eq!(m.visceral_fat, 7.0);
    }

    #[test]
    fn test_male_over_sixty_uses_highest_offset() {
        let p = profile(Sex::Male, 172.0, 65, false);
        let m = estimate(80.0, 1500, &p);
        assert_eq!(m.bmi, 27.0);
        assert_eq!(m.body_fat, 31.3);
        assert_eq!(m.muscle_mass, 46.0);
        assert_eq!(m.water_percentage, 49.9);
        assert_eq!(m.bone_mass, 2.8);
        assert_eq!(m.skeletal_muscle, 36.4);
        assert_eq!(m.lean_body_mass, 55.0);
        assert_eq!(m.visceral_fat, 16.0);
    }

    #[test]
    fn test_active_profile_high_fat_branch() {
        let p = profile(Sex::Male, 170.0, 50, true);
        let m = estimate(90.0, 2500, &p);
        assert_eq!(m.body_fat, 37.4);
        assert_eq!(m.muscle_mass, 43.8);
        assert_eq!(m.skeletal_muscle, 37.6);
        // Above 15% fat the athletic score formula overshoots and clamps
        assert_eq!(m.visceral_fat, 9.0);
    }

    #[test]
    fn test_active_profile_low_fat_branch() {
        let p = profile(Sex::Male, 180.0, 25, true);
        let m = estimate(55.0, 300, &p);
        assert_eq!(m.bmi, 17.0);
        assert_eq!(m.body_fat, 10.7);
        assert_eq!(m.muscle_mass, 62.5);
        assert_eq!(m.water_percentage, 64.9);
        assert_eq!(m.bone_mass, 2.7);
        assert_eq!(m.skeletal_muscle, 53.6);
        assert_eq!(m.lean_body_mass, 49.1);
        assert_eq!(m.visceral_fat, 9.0);
    }

    #[test]
    fn test_resistance_of_100_contributes_nothing() {
        let p = profile(Sex::Male, 175.0, 30, false);
        let m = estimate(70.0, 100, &p);
        assert_eq!(m.body_fat, 18.5);
        assert_eq!(m.visceral_fat, 7.0);
    }

    #[test]
    fn test_implausible_low_fat_becomes_sentinel() {
        let p = profile(Sex::Male, 190.0, 18, false);
        let estimator = BodyCompositionEstimator::new(&p);
        // Raw value lands below 5 and is forced to exactly zero
        assert_eq!(estimator.body_fat(18, 40.0, 150), 0.0);

        // Downstream metrics consume the sentinel, they are not zeroed
        let m = estimate(40.0, 150, &p);
        assert_eq!(m.body_fat, 0.0);
        assert_eq!(m.muscle_mass, 67.0);
        assert_eq!(m.water_percentage, 72.6);
        assert_eq!(m.bone_mass, 2.3);
        assert_eq!(m.skeletal_muscle, 53.0);
        assert_eq!(m.lean_body_mass, 40.0);
        assert_eq!(m.visceral_fat, 1.0);
    }

    #[test]
    fn test_implausible_high_fat_becomes_sentinel() {
        let p = profile(Sex::Female, 150.0, 90, false);
        let m = estimate(150.0, 3000, &p);
        assert_eq!(m.body_fat, 0.0);
        assert_eq!(m.bmi, 66.7);
        assert_eq!(m.muscle_mass, 67.0);
        assert_eq!(m.water_percentage, 72.6);
        assert_eq!(m.bone_mass, 8.6);
        assert_eq!(m.skeletal_muscle, 53.0);
        assert_eq!(m.lean_body_mass, 150.0);
        assert_eq!(m.visceral_fat, 1.0);
    }

    #[test]
    fn test_body_fat_increases_with_resistance() {
        let p = profile(Sex::Male, 175.0, 30, false);
        let estimator = BodyCompositionEstimator::new(&p);
        let mut previous = estimator.body_fat(30, 67.0, 200);
        for resistance in [400, 800, 1600, 2400, 2900] {
            let fat = estimator.body_fat(30, 67.0, resistance);
            assert!(fat > previous, "fat not increasing at {resistance} ohm");
            previous = fat;
        }
    }

    #[test]
    fn test_visceral_fat_stays_in_range() {
        for sex in [Sex::Male, Sex::Female] {
            for is_active in [false, true] {
                let upper = if is_active { 9.0 } else { 30.0 };
                let estimator =
                    BodyCompositionEstimator::new(&profile(sex, 170.0, 40, is_active));
                for fat in [0.0, 5.0, 15.0, 15.1, 36.0, 75.0] {
                    for age in [5, 18, 39, 40, 59, 60, 120, 200] {
                        let vf = estimator.visceral_fat(fat, age);
                        assert!(
                            (1.0..=upper).contains(&vf),
                            "vf {vf} out of range for fat {fat}, age {age}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_visceral_fat_clamps_age_bands() {
        let estimator = BodyCompositionEstimator::new(&profile(Sex::Male, 175.0, 30, false));
        // Ages below 18 share the youngest band
        assert_eq!(
            estimator.visceral_fat(25.0, 10),
            estimator.visceral_fat(25.0, 18)
        );
        // Ages above 120 share the oldest band
        assert_eq!(
            estimator.visceral_fat(25.0, 121),
            estimator.visceral_fat(25.0, 120)
        );
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let p = profile(Sex::Female, 165.0, 28, true);
        let first = estimate(61.25, 850, &p);
        let second = estimate(61.25, 850, &p);
        assert_eq!(first, second);
    }
}
