//! TOML sensor file loading, validation, and construction of the simulated
//! sensors it describes.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;

use envsim_core::profile::validate_time_scale;
use envsim_core::{
    Bounds, ChannelProfile, ClimateScenario, LightMeter, LightScenario, ManualClimate,
    ManualLight, SensorModel, ThermoHygrometer, UniformDraw,
};

// ---------------------------------------------------------------------------
// Config file structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sensors: Vec<SensorEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Temperature + humidity.
    Climate,
    /// Illuminance.
    Light,
}

#[derive(Debug, Deserialize)]
pub struct SensorEntry {
    pub sensor_id: String,
    pub kind: SensorKind,
    /// Named preset.  Mutually exclusive with `manual`.
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub manual: Option<ManualEntry>,
    /// Simulated hour of day at start-up (default midnight).
    #[serde(default)]
    pub start_hour: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ManualEntry {
    #[serde(default)]
    pub time_scale: Option<f64>,
    #[serde(default)]
    pub temperature: Option<ChannelEntry>,
    #[serde(default)]
    pub humidity: Option<ChannelEntry>,
    #[serde(default)]
    pub lux: Option<ChannelEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChannelEntry {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub drift_per_sec: Option<f64>,
    #[serde(default)]
    pub noise_std_per_sec: Option<f64>,
    #[serde(default)]
    pub daily_amplitude: f64,
    #[serde(default)]
    pub daily_phase: f64,
}

impl ChannelEntry {
    /// Overlay the entry onto a profile that already carries the defaults.
    fn apply(&self, defaults: ChannelProfile) -> ChannelProfile {
        ChannelProfile {
            bounds: Bounds::new(self.min, self.max),
            drift_rate_per_sec: self.drift_per_sec.unwrap_or(defaults.drift_rate_per_sec),
            noise_std_per_sec: self
                .noise_std_per_sec
                .unwrap_or(defaults.noise_std_per_sec),
            daily_amplitude: self.daily_amplitude,
            daily_phase: self.daily_phase,
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario resolution
// ---------------------------------------------------------------------------

impl SensorEntry {
    pub fn climate_scenario(&self) -> Result<ClimateScenario> {
        if let Some(name) = &self.scenario {
            return Ok(name.parse::<ClimateScenario>()?);
        }
        let Some(manual) = &self.manual else {
            bail!("sensor '{}': neither scenario nor manual given", self.sensor_id);
        };
        let (Some(t), Some(h)) = (&manual.temperature, &manual.humidity) else {
            bail!(
                "sensor '{}': manual climate needs temperature and humidity",
                self.sensor_id
            );
        };
        let mut m = ManualClimate::new(Bounds::new(t.min, t.max), Bounds::new(h.min, h.max));
        m.temperature = t.apply(m.temperature);
        m.humidity = h.apply(m.humidity);
        if let Some(ts) = manual.time_scale {
            m.time_scale = ts;
        }
        Ok(ClimateScenario::Manual(m))
    }

    pub fn light_scenario(&self) -> Result<LightScenario> {
        if let Some(name) = &self.scenario {
            return Ok(name.parse::<LightScenario>()?);
        }
        let Some(manual) = &self.manual else {
            bail!("sensor '{}': neither scenario nor manual given", self.sensor_id);
        };
        let Some(l) = &manual.lux else {
            bail!("sensor '{}': manual light needs lux", self.sensor_id);
        };
        let mut m = ManualLight::new(Bounds::new(l.min, l.max));
        m.lux = l.apply(m.lux);
        if let Some(ts) = manual.time_scale {
            m.time_scale = ts;
        }
        Ok(LightScenario::Manual(m))
    }

    /// Build the simulated sensor, timestamped at `now_ms`.
    pub fn build(&self, now_ms: u64, draw: UniformDraw) -> Result<SensorModel> {
        let start_hour = self.start_hour.unwrap_or(0.0);
        let model: SensorModel = match self.kind {
            SensorKind::Climate => {
                ThermoHygrometer::new(self.climate_scenario()?, now_ms, draw)
                    .with_start_hour(start_hour)
                    .into()
            }
            SensorKind::Light => LightMeter::new(self.light_scenario()?, now_ms, draw)
                .with_start_hour(start_hour)
                .into(),
        };
        Ok(model)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl Config {
    /// Validate all sensor entries. Returns `Ok(())` or an error describing
    /// every violation found (not just the first one).
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for (i, s) in self.sensors.iter().enumerate() {
            let ctx = || {
                if s.sensor_id.is_empty() {
                    format!("sensors[{i}]")
                } else {
                    format!("sensor '{}'", s.sensor_id)
                }
            };

            // ── Identity ────────────────────────────────────────
            if s.sensor_id.trim().is_empty() {
                errors.push(format!("{}: sensor_id is empty", ctx()));
            } else if !seen_ids.insert(&s.sensor_id) {
                errors.push(format!("{}: duplicate sensor_id", ctx()));
            }

            if let Some(h) = s.start_hour {
                if !h.is_finite() {
                    errors.push(format!("{}: start_hour must be finite", ctx()));
                }
            }

            // ── Scenario vs manual ──────────────────────────────
            match (&s.scenario, &s.manual) {
                (Some(_), Some(_)) => {
                    errors.push(format!("{}: set either scenario or manual, not both", ctx()));
                }
                (None, None) => {
                    errors.push(format!("{}: one of scenario or manual is required", ctx()));
                }
                (Some(name), None) => {
                    let parsed = match s.kind {
                        SensorKind::Climate => name.parse::<ClimateScenario>().map(|_| ()),
                        SensorKind::Light => name.parse::<LightScenario>().map(|_| ()),
                    };
                    if let Err(e) = parsed {
                        errors.push(format!("{}: {e}", ctx()));
                    }
                }
                (None, Some(m)) => validate_manual(s.kind, m, &ctx(), &mut errors),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "config validation failed ({} error{}):\n  - {}",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" },
                errors.join("\n  - ")
            );
        }
    }
}

fn validate_manual(kind: SensorKind, m: &ManualEntry, ctx: &str, errors: &mut Vec<String>) {
    if let Some(ts) = m.time_scale {
        if let Err(e) = validate_time_scale(ts) {
            errors.push(format!("{ctx}: {e}"));
        }
    }

    let channels = [
        ("temperature", &m.temperature, SensorKind::Climate),
        ("humidity", &m.humidity, SensorKind::Climate),
        ("lux", &m.lux, SensorKind::Light),
    ];

    for (name, entry, owner) in channels {
        match (owner == kind, entry) {
            (true, None) => errors.push(format!("{ctx}: manual.{name} is missing")),
            (true, Some(c)) => {
                // unset rates fall back to non-negative defaults, so zero stands in
                let profile = c.apply(ChannelProfile::new(Bounds::new(c.min, c.max), 0.0, 0.0));
                if let Err(problems) = profile.validate() {
                    for p in problems {
                        errors.push(format!("{ctx}: manual.{name}: {p}"));
                    }
                }
            }
            (false, Some(_)) => errors.push(format!(
                "{ctx}: manual.{name} does not apply to this sensor kind"
            )),
            (false, None) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Load + build
// ---------------------------------------------------------------------------

/// Read, parse, and validate a TOML sensor file.
pub fn load(path: &str) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read sensor config: {path}"))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse sensor config: {path}"))?;
    config
        .validate()
        .with_context(|| format!("invalid sensor config: {path}"))?;
    Ok(config)
}

/// A configured sensor and its model.
pub struct SimSensor {
    pub sensor_id: String,
    pub model: SensorModel,
}

/// Build every sensor in the config.
///
/// With `seed` set, sensor `i` draws from `seed + i`, so a run can be
/// reproduced exactly.  Otherwise each sensor is seeded from entropy.
pub fn build_sensors(config: &Config, now_ms: u64, seed: Option<u64>) -> Result<Vec<SimSensor>> {
    let mut sensors = Vec::with_capacity(config.sensors.len());

    for (i, entry) in config.sensors.iter().enumerate() {
        let draw = match seed {
            Some(base) => UniformDraw::with_seed(base.wrapping_add(i as u64)),
            None => UniformDraw::from_entropy(),
        };
        let model = entry
            .build(now_ms, draw)
            .with_context(|| format!("failed to build sensor '{}'", entry.sensor_id))?;

        tracing::info!(
            sensor_id = %entry.sensor_id,
            scenario = %model.scenario_name(),
            start_hour = model.simulated_hour(),
            "sensor ready"
        );

        sensors.push(SimSensor {
            sensor_id: entry.sensor_id.clone(),
            model,
        });
    }

    Ok(sensors)
}

// ===========================================================================
// Tests
// ===========================================================================
