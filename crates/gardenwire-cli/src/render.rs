use gardenwire_core::{SensorReading, format_epoch};

/// Render the classic console timeline for a decoded reading.
pub fn render_reading(reading: &SensorReading) -> String {
    let sampled = timestamp_text(reading.timestamp);
    let mut out = String::new();
    out.push_str(&format!("===== Data received at: {sampled}\n"));
    out.push_str(&format!(
        "Soil moisture: {}%\n",
        reading.soil_moisture_percent
    ));
    out.push_str(&format!("Sunlight: {} Lux\n", reading.sunlight_lux));
    out.push_str(&format!(
        "Air temperature: {} degrees Celsius\n",
        reading.air_temperature_c
    ));
    out.push_str(&format!(
        "Air humidity: {}%\n",
        reading.air_humidity_percent
    ));
    out.push_str("Watering system status:\n");
    out.push_str(&format!(
        "{sampled} -  System {}.\n",
        state_text(reading.initial_state_on)
    ));
    for event in &reading.watering_events {
        out.push_str(&format!(
            "{} -  System turned {}.\n",
            timestamp_text(event.timestamp),
            state_text(event.state_after_change)
        ));
    }
    out.push_str(&format!(
        "Total number of watering system status changes: {}\n",
        reading.watering_events.len()
    ));
    out
}

fn state_text(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn timestamp_text(epoch_seconds: i64) -> String {
    format_epoch(epoch_seconds).unwrap_or_else(|| format!("epoch {epoch_seconds}"))
}
