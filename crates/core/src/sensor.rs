//! Simulated sensors: a dual-channel thermo-hygrometer and a light meter.

use std::fmt;

use crate::channel::{EnvironmentChannel, SimClock};
use crate::rng::UniformDraw;
use crate::scenario::{ClimateScenario, LightScenario};

/// Physical quantity reported by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    Humidity,
    Illuminance,
}

impl Quantity {
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%RH",
            Self::Illuminance => "lx",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Illuminance => write!(f, "illuminance"),
        }
    }
}

// ---------------------------------------------------------------------------
// Thermo-hygrometer
// ---------------------------------------------------------------------------

/// Temperature + relative humidity, two channels on one simulated clock.
#[derive(Debug, Clone)]
pub struct ThermoHygrometer {
    scenario: ClimateScenario,
    clock: SimClock,
    temperature: EnvironmentChannel,
    humidity: EnvironmentChannel,
    draw: UniformDraw,
}

impl ThermoHygrometer {
    /// `now_ms` is the current reading of the host's monotonic millisecond
    /// counter; the first `update` measures from it.
    pub fn new(scenario: ClimateScenario, now_ms: u64, mut draw: UniformDraw) -> Self {
        let preset = scenario.preset();
        let (t_seed, t_dyn) = preset.temperature;
        let (h_seed, h_dyn) = preset.humidity;
        let temperature = EnvironmentChannel::new(t_seed, t_dyn, &mut draw);
        let humidity = EnvironmentChannel::new(h_seed, h_dyn, &mut draw);

        tracing::debug!(
            %scenario,
            temperature = temperature.value(),
            humidity = humidity.value(),
            "thermo-hygrometer initialised"
        );

        Self {
            scenario,
            clock: SimClock::new(now_ms, preset.time_scale),
            temperature,
            humidity,
            draw,
        }
    }

    /// Start the simulated day at `hour` rather than midnight.
    pub fn with_start_hour(mut self, hour: f64) -> Self {
        self.clock = self.clock.with_hour(hour);
        self
    }

    /// Advance both channels to `now_ms`.  A reading that is not newer than
    /// the previous one changes nothing.
    pub fn update(&mut self, now_ms: u64) {
        let Some(dt) = self.clock.tick(now_ms) else {
            return;
        };
        let hour = self.clock.hour();
        self.temperature.advance(&mut self.draw, hour, dt);
        self.humidity.advance(&mut self.draw, hour, dt);
    }

    pub fn read(&self) -> f64 {
        self.temperature.value()
    }

    pub fn read_humidity(&self) -> f64 {
        self.humidity.value()
    }

    pub fn scenario(&self) -> &ClimateScenario {
        &self.scenario
    }

    pub fn simulated_hour(&self) -> f64 {
        self.clock.hour()
    }

    pub fn temperature_channel(&self) -> &EnvironmentChannel {
        &self.temperature
    }

    pub fn humidity_channel(&self) -> &EnvironmentChannel {
        &self.humidity
    }
}

// ---------------------------------------------------------------------------
// Light meter
// ---------------------------------------------------------------------------

/// Ambient illuminance in lux.
#[derive(Debug, Clone)]
pub struct LightMeter {
    scenario: LightScenario,
    clock: SimClock,
    lux: EnvironmentChannel,
    draw: UniformDraw,
}

impl LightMeter {
    pub fn new(scenario: LightScenario, now_ms: u64, mut draw: UniformDraw) -> Self {
        let preset = scenario.preset();
        let (seed, dynamics) = preset.lux;
        let lux = EnvironmentChannel::new(seed, dynamics, &mut draw);

        tracing::debug!(%scenario, lux = lux.value(), "light meter initialised");

        Self {
            scenario,
            clock: SimClock::new(now_ms, preset.time_scale),
            lux,
            draw,
        }
    }

    pub fn with_start_hour(mut self, hour: f64) -> Self {
        self.clock = self.clock.with_hour(hour);
        self
    }

    pub fn update(&mut self, now_ms: u64) {
        let Some(dt) = self.clock.tick(now_ms) else {
            return;
        };
        self.lux.advance(&mut self.draw, self.clock.hour(), dt);
    }

    pub fn read(&self) -> f64 {
        self.lux.value()
    }

    pub fn scenario(&self) -> &LightScenario {
        &self.scenario
    }

    pub fn simulated_hour(&self) -> f64 {
        self.clock.hour()
    }

    pub fn channel(&self) -> &EnvironmentChannel {
        &self.lux
    }
}

// ---------------------------------------------------------------------------
// Closed sensor set
// ---------------------------------------------------------------------------

/// Any simulated sensor, behind one `update`/`read` surface.
#[derive(Debug, Clone)]
pub enum SensorModel {
    ThermoHygrometer(ThermoHygrometer),
    LightMeter(LightMeter),
}

impl SensorModel {
    pub fn update(&mut self, now_ms: u64) {
        match self {
            Self::ThermoHygrometer(s) => s.update(now_ms),
            Self::LightMeter(s) => s.update(now_ms),
        }
    }

    /// Primary value: temperature or lux.
    pub fn read(&self) -> f64 {
        match self {
            Self::ThermoHygrometer(s) => s.read(),
            Self::LightMeter(s) => s.read(),
        }
    }

    /// Humidity for a thermo-hygrometer, nothing for a light meter.
    pub fn read_secondary(&self) -> Option<f64> {
        match self {
            Self::ThermoHygrometer(s) => Some(s.read_humidity()),
            Self::LightMeter(_) => None,
        }
    }

    /// Every current value with the quantity it measures.
    pub fn readings(&self) -> Vec<(Quantity, f64)> {
        match self {
            Self::ThermoHygrometer(s) => vec![
                (Quantity::Temperature, s.read()),
                (Quantity::Humidity, s.read_humidity()),
            ],
            Self::LightMeter(s) => vec![(Quantity::Illuminance, s.read())],
        }
    }

    pub fn simulated_hour(&self) -> f64 {
        match self {
            Self::ThermoHygrometer(s) => s.simulated_hour(),
            Self::LightMeter(s) => s.simulated_hour(),
        }
    }

    pub fn scenario_name(&self) -> String {
        match self {
            Self::ThermoHygrometer(s) => s.scenario().to_string(),
            Self::LightMeter(s) => s.scenario().to_string(),
        }
    }
}

impl From<ThermoHygrometer> for SensorModel {
    fn from(s: ThermoHygrometer) -> Self {
        Self::ThermoHygrometer(s)
    }
}

impl From<LightMeter> for SensorModel {
    fn from(s: LightMeter) -> Self {
        Self::LightMeter(s)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
