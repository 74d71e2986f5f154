use std::time::Duration;

use anyhow::Result;
use clap::Args;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tokio::time::sleep;
use tracing::{error, info, warn};

use gardenwire_core::{decode_reading, make_reading_record};

use crate::render::render_reading;

#[derive(Args, Debug)]
pub struct ListenOpts {
    /// MQTT broker host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// MQTT broker port
    #[arg(long, default_value_t = 1883)]
    pub port: u16,

    /// Telemetry topic carrying binary sensor payloads
    #[arg(long, default_value = "elec4740g6/data")]
    pub topic: String,

    /// Last-will topic announcing sensor loss
    #[arg(long, default_value = "home/LWT")]
    pub lwt_topic: String,

    /// MQTT client identifier
    #[arg(long, default_value = "gardenwire")]
    pub client_id: String,

    /// Render human-readable timelines instead of JSON lines
    #[arg(long)]
    pub text: bool,
}

/// Subscribe and decode arriving payloads until interrupted.
///
/// One JSON record (or text block) is written to stdout per telemetry
/// message; connection lifecycle and undecodable payloads go to the log.
/// Reconnection is left to the event loop's polling.
pub async fn run(opts: ListenOpts) -> Result<()> {
    let mut options = MqttOptions::new(opts.client_id.as_str(), opts.host.as_str(), opts.port);
    options.set_keep_alive(Duration::from_secs(30));

    let (client, mut eventloop) = AsyncClient::new(options, 20);
    client.subscribe(opts.topic.as_str(), QoS::AtLeastOnce).await?;
    client
        .subscribe(opts.lwt_topic.as_str(), QoS::AtLeastOnce)
        .await?;
    info!(topic = %opts.topic, lwt = %opts.lwt_topic, "subscribed");

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if publish.topic == opts.lwt_topic {
                    warn!(topic = %publish.topic, "sensor gone");
                    continue;
                }
                if publish.topic != opts.topic {
                    continue;
                }
                handle_payload(&opts, &publish.topic, &publish.payload);
            }
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!(host = %opts.host, port = opts.port, "mqtt connected");
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                warn!("mqtt disconnected");
            }
            Ok(_) => {}
            Err(err) => {
                error!(%err, "mqtt error, retrying");
                sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

fn handle_payload(opts: &ListenOpts, topic: &str, payload: &[u8]) {
    match decode_reading(payload) {
        Ok(decoded) => {
            for warning in &decoded.warnings {
                warn!(%warning, topic, "payload decoded with warning");
            }
            if opts.text {
                print!("{}", render_reading(&decoded.reading));
            } else {
                let record = make_reading_record(Some(topic), &decoded);
                match serde_json::to_string(&record) {
                    Ok(line) => println!("{line}"),
                    Err(err) => error!(%err, "record serialization failed"),
                }
            }
        }
        Err(err) => {
            warn!(%err, topic, len = payload.len(), "discarding undecodable payload");
        }
    }
}
