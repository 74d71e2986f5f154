//! Gardenwire core library for garden telemetry decoding.
//!
//! This crate implements the payload format spoken by the garden sensor
//! cluster: a fixed 9-byte header (little-endian epoch timestamp, soil
//! moisture, sunlight, air temperature, air humidity, initial watering
//! state) followed by a run-length trailer of 2-byte durations between
//! watering state changes. Decoding is byte-oriented and side-effect
//! free; transports (MQTT) and presentation live in the CLI crate.
//!
//! Invariants:
//! - Decoding is pure and stateless; concurrent calls never interact.
//! - A payload shorter than the header fails with no partial result.
//! - Watering state strictly alternates from the initial state; event
//!   timestamps accumulate durations from the sample time.
//! - A dangling trailer byte is reported as a warning, not an error.
//!
//! # Examples
//! ```
//! use gardenwire_core::decode_reading;
//!
//! let payload = [
//!     0x00, 0x00, 0x00, 0x00, // epoch timestamp 0
//!     0x32, 0xFF, 0x14, 0x3C, // soil 50%, sun 255, temp 20, humidity 60
//!     0x01, // watering initially ON
//!     0x0A, 0x00, // OFF after 10s
//! ];
//! let decoded = decode_reading(&payload)?;
//! assert_eq!(decoded.reading.sunlight_lux, 127_500);
//! assert_eq!(decoded.reading.watering_events.len(), 1);
//! # Ok::<(), gardenwire_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

mod protocol;

pub use protocol::error::{DecodeError, DecodeWarning};
pub use protocol::parser::{DecodedReading, SensorReading, WateringEvent, decode_reading};

/// Current reading record schema version.
pub const RECORD_VERSION: u32 = 1;

/// Serializable rendition of a decoded reading.
///
/// One record is produced per received payload and handed straight to
/// the presentation layer; records carry no identity beyond their
/// contents. Optional RFC3339 timestamps are omitted when the epoch
/// value cannot be represented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    /// Record schema version (not the wire format version).
    pub record_version: u32,
    /// MQTT topic the payload arrived on, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Sample time, seconds since the Unix epoch.
    pub sampled_at_epoch: i64,
    /// Sample time as RFC3339, when representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampled_at: Option<String>,
    pub soil_moisture_percent: i8,
    pub sunlight_lux: u32,
    pub air_temperature_c: i8,
    pub air_humidity_percent: i8,
    /// Watering state at the sample time, before any recorded change.
    pub watering_on: bool,
    /// Watering state changes in chronological order.
    pub watering_events: Vec<EventRecord>,
    /// Non-fatal decode conditions, rendered as messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Single watering state change within a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Change time, seconds since the Unix epoch.
    pub at_epoch: i64,
    /// Change time as RFC3339, when representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
    /// Watering state after the change.
    pub watering_on: bool,
}

/// Format epoch seconds as RFC3339, or `None` when out of range.
///
/// # Examples
/// ```
/// use gardenwire_core::format_epoch;
///
/// assert_eq!(format_epoch(0).as_deref(), Some("1970-01-01T00:00:00Z"));
/// ```
pub fn format_epoch(epoch_seconds: i64) -> Option<String> {
    OffsetDateTime::from_unix_timestamp(epoch_seconds)
        .ok()?
        .format(&Rfc3339)
        .ok()
}

/// Build a reading record from a decoded payload.
///
/// # Examples
/// ```
/// use gardenwire_core::{decode_reading, make_reading_record};
///
/// let payload = [0, 0, 0, 0, 50, 255, 20, 60, 1];
/// let decoded = decode_reading(&payload)?;
/// let record = make_reading_record(Some("garden/data"), &decoded);
/// assert_eq!(record.record_version, gardenwire_core::RECORD_VERSION);
/// assert!(record.watering_events.is_empty());
/// # Ok::<(), gardenwire_core::DecodeError>(())
/// ```
pub fn make_reading_record(topic: Option<&str>, decoded: &DecodedReading) -> ReadingRecord {
    let reading = &decoded.reading;
    ReadingRecord {
        record_version: RECORD_VERSION,
        topic: topic.map(str::to_string),
        sampled_at_epoch: reading.timestamp,
        sampled_at: format_epoch(reading.timestamp),
        soil_moisture_percent: reading.soil_moisture_percent,
        sunlight_lux: reading.sunlight_lux,
        air_temperature_c: reading.air_temperature_c,
        air_humidity_percent: reading.air_humidity_percent,
        watering_on: reading.initial_state_on,
        watering_events: reading
            .watering_events
            .iter()
            .map(|event| EventRecord {
                at_epoch: event.timestamp,
                at: format_epoch(event.timestamp),
                watering_on: event.state_after_change,
            })
            .collect(),
        warnings: decoded.warnings.iter().map(|w| w.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_omits_optional_fields_when_none() {
        let payload = [0u8, 0, 0, 0, 50, 255, 20, 60, 1];
        let decoded = decode_reading(&payload).expect("decode");
        let record = make_reading_record(None, &decoded);

        let value = serde_json::to_value(&record).expect("record json");
        assert!(value.get("topic").is_none());
        assert!(value.get("warnings").is_none());
        assert_eq!(value["sampled_at"], "1970-01-01T00:00:00Z");
        assert_eq!(value["sunlight_lux"], 127_500);
    }

    #[test]
    fn record_carries_warnings_and_events() {
        let mut payload = vec![0u8, 0, 0, 0, 50, 255, 20, 60, 1];
        payload.extend_from_slice(&[10, 0, 5, 0, 0xAA]);
        let decoded = decode_reading(&payload).expect("decode");
        let record = make_reading_record(Some("garden/data"), &decoded);

        assert_eq!(record.topic.as_deref(), Some("garden/data"));
        assert_eq!(record.watering_events.len(), 2);
        assert_eq!(record.watering_events[0].at_epoch, 10);
        assert!(!record.watering_events[0].watering_on);
        assert_eq!(record.watering_events[1].at_epoch, 15);
        assert!(record.watering_events[1].watering_on);
        assert_eq!(record.warnings.len(), 1);
        assert!(record.warnings[0].contains("trailing odd byte"));
    }

    #[test]
    fn format_epoch_out_of_range_is_none() {
        assert!(format_epoch(i64::MAX).is_none());
    }
}
