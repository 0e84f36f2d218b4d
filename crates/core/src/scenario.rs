//! Scenario presets.  The constants here define each environment; changing
//! them changes what the scenario means.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::channel::{Dynamics, HourWindow, Seed};
use crate::profile::{Bounds, ChannelProfile};

// ---------------------------------------------------------------------------
// Climate (temperature + humidity)
// ---------------------------------------------------------------------------

/// Default simulated hours per wall-clock second for climate sensors.
pub const CLIMATE_TIME_SCALE: f64 = 0.0001;

const INDOOR_TEMP: Bounds = Bounds::new(22.4, 23.1);
const INDOOR_HUM: Bounds = Bounds::new(47.0, 52.0);

const GREENHOUSE_TEMP: Bounds = Bounds::new(27.0, 32.0);
const GREENHOUSE_HUM: Bounds = Bounds::new(75.0, 95.0);

const OFFICE_TEMP_SEED: Bounds = Bounds::new(21.0, 24.0);
const OFFICE_HUM_SEED: Bounds = Bounds::new(35.0, 45.0);

/// Office air conditioning runs from 09:00 until 18:00.
pub const OFFICE_AC_HOURS: HourWindow = HourWindow {
    start: 9.0,
    end: 18.0,
};

/// Manual climate configuration: one profile per quantity, one shared clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualClimate {
    pub temperature: ChannelProfile,
    pub humidity: ChannelProfile,
    pub time_scale: f64,
}

impl ManualClimate {
    /// Bounds only; every rate takes its default.
    pub fn new(temperature: Bounds, humidity: Bounds) -> Self {
        Self {
            temperature: ChannelProfile::new(temperature, 0.05, 0.01),
            humidity: ChannelProfile::new(humidity, 0.10, 0.02),
            time_scale: CLIMATE_TIME_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimateScenario {
    Manual(ManualClimate),
    IndoorRoom,
    Greenhouse,
    OfficeAc,
}

/// Everything a thermo-hygrometer needs at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatePreset {
    pub time_scale: f64,
    pub temperature: (Seed, Dynamics),
    pub humidity: (Seed, Dynamics),
}

impl ClimateScenario {
    pub fn preset(&self) -> ClimatePreset {
        match self {
            Self::Manual(m) => ClimatePreset {
                time_scale: m.time_scale,
                temperature: (
                    Seed::Uniform(m.temperature.bounds),
                    Dynamics::Manual(m.temperature),
                ),
                humidity: (
                    Seed::Uniform(m.humidity.bounds),
                    Dynamics::Manual(m.humidity),
                ),
            },
            Self::IndoorRoom => ClimatePreset {
                time_scale: CLIMATE_TIME_SCALE,
                temperature: (
                    Seed::Uniform(INDOOR_TEMP),
                    Dynamics::Walk {
                        bounds: INDOOR_TEMP,
                        rate: 0.02,
                    },
                ),
                humidity: (
                    Seed::Uniform(INDOOR_HUM),
                    Dynamics::Walk {
                        bounds: INDOOR_HUM,
                        rate: 0.05,
                    },
                ),
            },
            Self::Greenhouse => ClimatePreset {
                time_scale: CLIMATE_TIME_SCALE,
                temperature: (
                    Seed::Uniform(GREENHOUSE_TEMP),
                    Dynamics::DailySwing {
                        bounds: GREENHOUSE_TEMP,
                        swing: 0.4,
                        rate: 0.05,
                    },
                ),
                humidity: (
                    Seed::Uniform(GREENHOUSE_HUM),
                    Dynamics::DailySwing {
                        bounds: GREENHOUSE_HUM,
                        swing: 1.0,
                        rate: 0.10,
                    },
                ),
            },
            Self::OfficeAc => ClimatePreset {
                time_scale: CLIMATE_TIME_SCALE,
                temperature: (
                    Seed::Uniform(OFFICE_TEMP_SEED),
                    Dynamics::Scheduled {
                        window: OFFICE_AC_HOURS,
                        active: Bounds::new(21.2, 22.0),
                        idle: Bounds::new(22.8, 23.2),
                        rate: 0.03,
                    },
                ),
                humidity: (
                    Seed::Uniform(OFFICE_HUM_SEED),
                    Dynamics::Scheduled {
                        window: OFFICE_AC_HOURS,
                        active: Bounds::new(37.0, 41.0),
                        idle: Bounds::new(42.0, 47.0),
                        rate: 0.08,
                    },
                ),
            },
        }
    }
}

impl fmt::Display for ClimateScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual(_) => write!(f, "manual"),
            Self::IndoorRoom => write!(f, "indoor-room"),
            Self::Greenhouse => write!(f, "greenhouse"),
            Self::OfficeAc => write!(f, "office-ac"),
        }
    }
}

impl FromStr for ClimateScenario {
    type Err = UnknownScenario;

    /// Named presets only; manual mode needs parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "indoorroom" | "indoor" => Ok(Self::IndoorRoom),
            "greenhouse" => Ok(Self::Greenhouse),
            "officeac" | "office" => Ok(Self::OfficeAc),
            _ => Err(UnknownScenario::new("climate", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Light
// ---------------------------------------------------------------------------

/// Default simulated hours per wall-clock second for light sensors.
pub const LIGHT_TIME_SCALE: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualLight {
    pub lux: ChannelProfile,
    pub time_scale: f64,
}

impl ManualLight {
    /// Bounds only; every rate takes its default.
    pub fn new(lux: Bounds) -> Self {
        Self {
            lux: ChannelProfile::new(lux, 5.0, 1.0),
            time_scale: LIGHT_TIME_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightScenario {
    Manual(ManualLight),
    OutdoorSunny,
    OutdoorCloudy,
    IndoorRoom,
    Greenhouse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightPreset {
    pub time_scale: f64,
    pub lux: (Seed, Dynamics),
}

impl LightScenario {
    pub fn preset(&self) -> LightPreset {
        match self {
            Self::Manual(m) => LightPreset {
                time_scale: m.time_scale,
                lux: (Seed::Uniform(m.lux.bounds), Dynamics::Manual(m.lux)),
            },
            Self::OutdoorSunny => LightPreset {
                time_scale: 0.02,
                lux: (
                    Seed::Fixed(2000.0),
                    Dynamics::Daylight {
                        peak: 100_000.0,
                        bounds: Bounds::new(0.0, 100_000.0),
                        noise_std: 100.0,
                        cloud_factor: None,
                    },
                ),
            },
            Self::OutdoorCloudy => LightPreset {
                time_scale: 0.02,
                lux: (
                    Seed::Fixed(1500.0),
                    Dynamics::Daylight {
                        peak: 25_000.0,
                        bounds: Bounds::new(0.0, 25_000.0),
                        noise_std: 200.0,
                        cloud_factor: Some(Bounds::new(0.4, 0.8)),
                    },
                ),
            },
            Self::IndoorRoom => LightPreset {
                time_scale: 0.0,
                lux: (
                    Seed::Fixed(90.0),
                    Dynamics::Walk {
                        bounds: Bounds::new(50.0, 150.0),
                        rate: 3.0,
                    },
                ),
            },
            Self::Greenhouse => LightPreset {
                time_scale: 0.015,
                lux: (
                    Seed::Fixed(12_000.0),
                    Dynamics::Daylight {
                        peak: 30_000.0,
                        bounds: Bounds::new(2000.0, 30_000.0),
                        noise_std: 150.0,
                        cloud_factor: None,
                    },
                ),
            },
        }
    }
}

impl fmt::Display for LightScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual(_) => write!(f, "manual"),
            Self::OutdoorSunny => write!(f, "outdoor-sunny"),
            Self::OutdoorCloudy => write!(f, "outdoor-cloudy"),
            Self::IndoorRoom => write!(f, "indoor-room"),
            Self::Greenhouse => write!(f, "greenhouse"),
        }
    }
}

impl FromStr for LightScenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "outdoorsunny" | "sunny" => Ok(Self::OutdoorSunny),
            "outdoorcloudy" | "cloudy" => Ok(Self::OutdoorCloudy),
            "indoorroom" | "indoor" => Ok(Self::IndoorRoom),
            "greenhouse" => Ok(Self::Greenhouse),
            _ => Err(UnknownScenario::new("light", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} scenario '{name}'")]
pub struct UnknownScenario {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownScenario {
    fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// Lowercase and drop separators so "Office-AC", "office_ac" and "officeac"
/// all match.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
