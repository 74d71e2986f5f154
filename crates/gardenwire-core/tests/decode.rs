use gardenwire_core::{DecodeWarning, decode_reading, make_reading_record};

/// The reference payload exchanged with the sensor cluster during
/// bring-up: epoch 0, soil 50%, full sunlight, 20 C, 60% humidity,
/// watering initially ON, turned OFF after 10s and back ON 5s later.
const REFERENCE_PAYLOAD: [u8; 13] = [
    0x00, 0x00, 0x00, 0x00, 0x32, 0xFF, 0x14, 0x3C, 0x01, 0x0A, 0x00, 0x05, 0x00,
];

#[test]
fn reference_payload_decodes_exactly() {
    let decoded = decode_reading(&REFERENCE_PAYLOAD).expect("decode");
    let reading = &decoded.reading;

    assert_eq!(reading.timestamp, 0);
    assert_eq!(reading.soil_moisture_percent, 50);
    assert_eq!(reading.sunlight_lux, 127_500);
    assert_eq!(reading.air_temperature_c, 20);
    assert_eq!(reading.air_humidity_percent, 60);
    assert!(reading.initial_state_on);

    assert_eq!(reading.watering_events.len(), 2);
    assert_eq!(reading.watering_events[0].timestamp, 10);
    assert!(!reading.watering_events[0].state_after_change);
    assert_eq!(reading.watering_events[1].timestamp, 15);
    assert!(reading.watering_events[1].state_after_change);

    assert!(decoded.warnings.is_empty());
}

#[test]
fn every_short_length_is_truncated() {
    for len in 0..9 {
        let payload = vec![0u8; len];
        let err = decode_reading(&payload).expect_err("short payload must fail");
        assert!(
            err.to_string().contains("truncated header"),
            "unexpected error at len {len}: {err}"
        );
    }
}

#[test]
fn header_only_payload_has_no_events() {
    let decoded = decode_reading(&REFERENCE_PAYLOAD[..9]).expect("decode");
    assert!(decoded.reading.watering_events.is_empty());
    assert!(decoded.warnings.is_empty());
}

#[test]
fn state_alternates_over_long_trailer() {
    let mut payload = REFERENCE_PAYLOAD[..9].to_vec();
    for _ in 0..16 {
        payload.extend_from_slice(&1u16.to_le_bytes());
    }

    let events = decode_reading(&payload).expect("decode").reading.watering_events;
    assert_eq!(events.len(), 16);
    for (index, event) in events.iter().enumerate() {
        // initial state is ON, so even-indexed events are OFF
        assert_eq!(event.state_after_change, index % 2 == 1, "event {index}");
    }
}

#[test]
fn timestamps_accumulate_durations() {
    let durations: [u16; 4] = [1, 0, 65_535, 30];
    let mut payload = REFERENCE_PAYLOAD[..9].to_vec();
    payload[0..4].copy_from_slice(&1_000i32.to_le_bytes());
    for duration in durations {
        payload.extend_from_slice(&duration.to_le_bytes());
    }

    let events = decode_reading(&payload).expect("decode").reading.watering_events;
    let mut expected = 1_000i64;
    for (event, duration) in events.iter().zip(durations) {
        expected += i64::from(duration);
        assert_eq!(event.timestamp, expected);
    }
}

#[test]
fn odd_trailing_byte_keeps_complete_events() {
    for pairs in 0..3usize {
        let mut payload = REFERENCE_PAYLOAD[..9].to_vec();
        for _ in 0..pairs {
            payload.extend_from_slice(&2u16.to_le_bytes());
        }
        payload.push(0x7F);

        let decoded = decode_reading(&payload).expect("decode");
        assert_eq!(decoded.reading.watering_events.len(), pairs);
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::TrailingOddByte { offset: 9 + pairs * 2 }]
        );
    }
}

#[test]
fn signed_bytes_keep_their_sign() {
    let mut payload = REFERENCE_PAYLOAD[..9].to_vec();
    payload[4] = 0xE0; // -32, not 224
    payload[6] = 0x85; // -123
    payload[7] = 0xFF; // -1

    let reading = decode_reading(&payload).expect("decode").reading;
    assert_eq!(reading.soil_moisture_percent, -32);
    assert_eq!(reading.air_temperature_c, -123);
    assert_eq!(reading.air_humidity_percent, -1);
}

#[test]
fn record_round_trips_through_json() {
    let decoded = decode_reading(&REFERENCE_PAYLOAD).expect("decode");
    let record = make_reading_record(Some("elec4740g6/data"), &decoded);

    let json = serde_json::to_string(&record).expect("serialize");
    let parsed: gardenwire_core::ReadingRecord = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed.topic.as_deref(), Some("elec4740g6/data"));
    assert_eq!(parsed.sampled_at.as_deref(), Some("1970-01-01T00:00:00Z"));
    assert_eq!(parsed.watering_events.len(), 2);
    assert_eq!(parsed.watering_events[1].at.as_deref(), Some("1970-01-01T00:00:15Z"));
}
