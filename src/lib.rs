//! Yunmai Scale Decoder
//!
//! Decodes the manufacturer-specific BLE advertisement payload
//! broadcast by a Yunmai body-composition scale and, once a reading has
//! settled, derives the full body-composition metrics set from weight,
//! bio-impedance and a user profile.
//!
//! The crate does no scanning of its own. An external collaborator
//! delivers each advertisement's payload as a hex string; the result is
//! a status-tagged [`MeasurementSnapshot`].
//!
//! ```
//! use yunmai_scale_rust::{process_advertisement, UserProfile};
//!
//! let profile = UserProfile::default();
//! let snapshot = process_advertisement("AABBCCDDEEFF1105031A2C07D0", &profile).unwrap();
//! assert_eq!(snapshot.status_label(), "stable");
//! assert_eq!(snapshot.weight(), Some(67.0));
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::estimator::{estimate, BodyCompositionEstimator};
pub use domain::memo::SnapshotMemo;
pub use domain::models::{BodyCompositionMetrics, MeasurementSnapshot, Sex, UserProfile};
pub use domain::sensors::{SensorKind, ALL_SENSORS};
pub use domain::settings::{LogSettings, Settings, SettingsService};
pub use infrastructure::bluetooth::protocol::{
    decode_advertisement, DecodeError, ScaleFrame, ScaleStatus, SERVICE_UUID_PREFIX,
};

use tracing::debug;

/// Decode one advertisement payload and, when the reading is stable,
/// run the estimator over the decoded weight and resistance.
///
/// Idle and Measuring frames come back without metrics; the caller
/// decides whether to keep an older stable snapshot around (see
/// [`SnapshotMemo`]).
pub fn process_advertisement(
    payload_hex: &str,
    profile: &UserProfile,
) -> Result<MeasurementSnapshot, DecodeError> {
    let frame = decode_advertisement(payload_hex)?;

    let snapshot = match frame.status() {
        ScaleStatus::Idle => MeasurementSnapshot::Idle,
        ScaleStatus::Measuring => MeasurementSnapshot::Measuring {
            weight: frame.weight_kg,
            count: frame.count,
        },
        ScaleStatus::Stable => MeasurementSnapshot::Stable {
            weight: frame.weight_kg,
            count: frame.count,
            metrics: estimate(frame.weight_kg, frame.resistance.into(), profile),
        },
    };

    debug!(
        "Processed frame #{}: {} at {:.2} kg",
        frame.count,
        snapshot.status_label(),
        frame.weight_kg
    );

    Ok(snapshot)
}
