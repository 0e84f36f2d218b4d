mod config;

use anyhow::{Context, Result};
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use serde::Serialize;
use std::{
    env,
    time::{Duration, Instant},
};
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use config::SimSensor;

#[derive(Debug, Serialize)]
struct Reading {
    sensor_id: String,
    quantity: String,
    value: f64,
    unit: &'static str,
}

#[derive(Debug, Serialize)]
struct ReadingMsg {
    ts: i64,
    readings: Vec<Reading>,
}

fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Milliseconds since `start` on the monotonic clock.
fn monotonic_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Flatten every sensor's current values into publishable readings.
fn collect_readings(sensors: &[SimSensor]) -> Vec<Reading> {
    sensors
        .iter()
        .flat_map(|s| {
            s.model
                .readings()
                .into_iter()
                .map(move |(quantity, value)| Reading {
                    sensor_id: s.sensor_id.clone(),
                    quantity: quantity.to_string(),
                    value,
                    unit: quantity.unit(),
                })
        })
        .collect()
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Env config ──────────────────────────────────────────────────
    let broker = env::var("MQTT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env_or("MQTT_PORT", 1883);
    let node_id = env::var("NODE_ID").unwrap_or_else(|_| "sim-node".to_string());
    let sample_every_ms = env_or::<u64>("SAMPLE_EVERY_MS", 1000).max(1);
    let seed: Option<u64> = env::var("SIM_SEED").ok().and_then(|s| s.parse().ok());
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "sensors.toml".to_string());

    // ── Sensors ─────────────────────────────────────────────────────
    let cfg = config::load(&config_path)?;
    anyhow::ensure!(
        !cfg.sensors.is_empty(),
        "no sensors configured in {config_path}"
    );

    let start = Instant::now();
    let mut sensors = config::build_sensors(&cfg, monotonic_ms(start), seed)
        .context("failed to build sensors")?;

    tracing::info!(
        sensors = sensors.len(),
        sample_every_ms,
        seed = ?seed,
        "simulation ready"
    );

    // ── MQTT ────────────────────────────────────────────────────────
    let client_id = format!("envsim-node-{node_id}");
    let mut mqttoptions = MqttOptions::new(client_id, broker, port);
    mqttoptions.set_keep_alive(Duration::from_secs(30));

    let (client, mut eventloop) = AsyncClient::new(mqttoptions, 10);

    // We only publish, but the eventloop must run to keep the connection alive.
    tokio::spawn(async move {
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!("node connected to mqtt");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("mqtt error: {e}. retrying...");
                    sleep(Duration::from_secs(2)).await;
                }
            }
        }
    });

    let topic = format!("tele/{node_id}/reading");
    tracing::info!(%topic, "publishing readings");

    let mut ticker = tokio::time::interval(Duration::from_millis(sample_every_ms));
    loop {
        ticker.tick().await;

        let now_ms = monotonic_ms(start);
        for s in &mut sensors {
            s.model.update(now_ms);
        }

        let msg = ReadingMsg {
            ts: now_unix(),
            readings: collect_readings(&sensors),
        };

        let payload = match serde_json::to_vec(&msg) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("failed to encode readings: {e}");
                continue;
            }
        };

        if let Err(e) = client
            .publish(&topic, QoS::AtLeastOnce, false, payload)
            .await
        {
            tracing::error!("publish error: {e}");
        } else {
            tracing::debug!(ts = msg.ts, readings = msg.readings.len(), "published readings");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
