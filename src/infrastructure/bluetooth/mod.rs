//! Bluetooth Module
//!
//! Wire-level handling for the scale's BLE advertisements. Scanning
//! itself is out of scope; an external collaborator listens for
//! advertisements carrying the [`protocol::SERVICE_UUID_PREFIX`]
//! service and hands the manufacturer-data payload here as a hex
//! string.
//!
//! ## Modules
//!
//! - [`protocol`] - Payload layout, frame decoding, and device-identity helpers

pub mod protocol;

// Re-export the decoder surface for convenience
pub use protocol::{decode_advertisement, DecodeError, ScaleFrame, ScaleStatus};
