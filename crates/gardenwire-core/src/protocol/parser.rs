use super::error::{DecodeError, DecodeWarning};
use super::layout;
use super::reader::TelemetryReader;

/// One sensor sample decoded from a telemetry payload.
///
/// Soil moisture, air temperature, and air humidity are the raw bytes
/// reinterpreted as signed; sunlight is the raw byte's full unsigned
/// range scaled to lux. Event timestamps are widened to `i64` so that
/// accumulated durations cannot wrap the 32-bit wire field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Sample time, seconds since the Unix epoch.
    pub timestamp: i64,
    pub soil_moisture_percent: i8,
    pub sunlight_lux: u32,
    pub air_temperature_c: i8,
    pub air_humidity_percent: i8,
    /// Watering state before the first trailer entry.
    pub initial_state_on: bool,
    /// State changes in chronological order.
    pub watering_events: Vec<WateringEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WateringEvent {
    /// Seconds since the Unix epoch, accumulated from the sample time.
    pub timestamp: i64,
    /// Watering state after this transition.
    pub state_after_change: bool,
}

/// A successful decode plus any non-fatal conditions observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReading {
    pub reading: SensorReading,
    pub warnings: Vec<DecodeWarning>,
}

pub fn decode_reading(payload: &[u8]) -> Result<DecodedReading, DecodeError> {
    let reader = TelemetryReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let timestamp = i64::from(reader.read_i32_le(layout::TIMESTAMP_RANGE.clone())?);
    let soil_moisture_percent = reader.read_i8(layout::SOIL_MOISTURE_OFFSET)?;
    let sunlight_lux = u32::from(reader.read_u8(layout::SUNLIGHT_OFFSET)?) * layout::LUX_PER_COUNT;
    let air_temperature_c = reader.read_i8(layout::AIR_TEMPERATURE_OFFSET)?;
    let air_humidity_percent = reader.read_i8(layout::AIR_HUMIDITY_OFFSET)?;
    let initial_state_on = reader.read_u8(layout::INITIAL_STATE_OFFSET)? == layout::STATE_ON;

    let mut watering_events = Vec::new();
    let mut warnings = Vec::new();
    let mut state = initial_state_on;
    let mut last_timestamp = timestamp;
    let mut offset = layout::TRAILER_OFFSET;
    while offset + layout::DURATION_SIZE <= payload.len() {
        let duration = reader.read_u16_le(offset..offset + layout::DURATION_SIZE)?;
        last_timestamp += i64::from(duration);
        state = !state;
        watering_events.push(WateringEvent {
            timestamp: last_timestamp,
            state_after_change: state,
        });
        offset += layout::DURATION_SIZE;
    }
    if offset < payload.len() {
        warnings.push(DecodeWarning::TrailingOddByte { offset });
    }

    Ok(DecodedReading {
        reading: SensorReading {
            timestamp,
            soil_moisture_percent,
            sunlight_lux,
            air_temperature_c,
            air_humidity_percent,
            initial_state_on,
            watering_events,
        },
        warnings,
    })
}
