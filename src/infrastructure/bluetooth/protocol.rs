//! Yunmai Scale Advertisement Protocol
//!
//! This module contains the wire-format definitions for the
//! manufacturer-specific advertisement payload broadcast by the scale.

use thiserror::Error;
use tracing::trace;

/// Prefix of the GATT service UUID the scale advertises.
/// External scanners filter on this before handing us a payload.
pub const SERVICE_UUID_PREFIX: &str = "00001320";

/// Minimum decodable payload length in bytes.
pub const MIN_PAYLOAD_LEN: usize = 13;

/// Credibility byte value for an idle scale (weighing finished, platform empty).
pub const CREDIBILITY_IDLE: u8 = 0x00;

/// Credibility byte value for a final, stable reading.
pub const CREDIBILITY_STABLE: u8 = 0x03;

/// Errors produced while decoding an advertisement payload.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload holds fewer than [`MIN_PAYLOAD_LEN`] bytes.
    #[error("payload too short: {0} hex characters (need at least 26)")]
    TooShort(usize),
    /// The payload is not a well-formed hex string.
    #[error("payload is not valid hex")]
    InvalidEncoding,
}

/// Measurement state reported by the credibility byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStatus {
    /// Weighing finished or nobody on the platform.
    Idle,
    /// A measurement is in progress; weight is live but not settled.
    Measuring,
    /// The reading has settled; weight and resistance are trustworthy.
    Stable,
}

impl ScaleStatus {
    pub fn from_credibility(byte: u8) -> Self {
        match byte {
            CREDIBILITY_IDLE => Self::Idle,
            CREDIBILITY_STABLE => Self::Stable,
            _ => Self::Measuring,
        }
    }
}

/// One decoded advertisement frame.
///
/// # Payload Structure (13 bytes minimum)
///
/// ```text
/// [0-3]   : MAC suffix (low four bytes of the device address)
/// [4-6]   : Identifier (opaque device/session tag)
/// [7]     : Count (device-assigned sample sequence number)
/// [8]     : Credibility (0x00 = idle, 0x03 = stable, else measuring)
/// [9-10]  : Weight (u16 big-endian, units of 0.01 kg)
/// [11-12] : Resistance (u16 big-endian, ohms)
/// ```
///
/// Bytes beyond offset 13 are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFrame {
    pub mac_suffix: [u8; 4],
    pub identifier: [u8; 3],
    pub count: u8,
    pub credibility: u8,
    pub weight_kg: f64,
    pub resistance: u16,
}

impl ScaleFrame {
    pub fn status(&self) -> ScaleStatus {
        ScaleStatus::from_credibility(self.credibility)
    }
}

/// Decode a hex advertisement payload into a [`ScaleFrame`].
///
/// The string is case-insensitive and must be even-length, pure hex and
/// at least 26 characters. Pure function; no state is kept between calls.
pub fn decode_advertisement(payload_hex: &str) -> Result<ScaleFrame, DecodeError> {
    if payload_hex.len() < MIN_PAYLOAD_LEN * 2 {
        return Err(DecodeError::TooShort(payload_hex.len()));
    }

    let bytes = hex_to_bytes(payload_hex)?;

    trace!("Raw payload: {:02X?}", &bytes[..MIN_PAYLOAD_LEN]);

    let mut mac_suffix = [0u8; 4];
    mac_suffix.copy_from_slice(&bytes[0..4]);
    let mut identifier = [0u8; 3];
    identifier.copy_from_slice(&bytes[4..7]);

    let count = bytes[7];
    let credibility = bytes[8];
    let weight_raw = u16::from_be_bytes([bytes[9], bytes[10]]);
    let resistance = u16::from_be_bytes([bytes[11], bytes[12]]);

    Ok(ScaleFrame {
        mac_suffix,
        identifier,
        count,
        credibility,
        weight_kg: weight_raw as f64 * 0.01,
        resistance,
    })
}

/// Reassemble the device MAC the way the vendor app does: the two
/// company-identifier bytes (little-endian) followed by the payload's
/// MAC suffix, reversed and colon-joined.
///
/// Returns `None` when the payload carries fewer than four bytes.
pub fn device_mac(company_id: u16, payload: &[u8]) -> Option<String> {
    if payload.len() < 4 {
        return None;
    }

    let cid = company_id.to_le_bytes();
    let bytes = [cid[0], cid[1], payload[0], payload[1], payload[2], payload[3]];

    let mac = bytes
        .iter()
        .rev()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":");

    Some(mac)
}

/// Syntax check for a user-entered MAC address (`AA:BB:CC:DD:EE:FF`).
pub fn is_valid_mac(s: &str) -> bool {
    let parts: Vec<&str> = s.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, DecodeError> {
    if hex.len() % 2 != 0 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidEncoding);
    }

    (0..hex.len() / 2)
        .map(|i| {
            u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| DecodeError::InvalidEncoding)
        })
        .collect()
}
