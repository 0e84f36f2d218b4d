//! Stochastic environment models that stand in for physical sensors.
//!
//! A sensor turns elapsed wall-clock milliseconds into bounded, noisy,
//! optionally diurnal readings:
//! - Bounded random walk scaled by the time since the last update
//! - Gaussian noise (Box-Muller over a seedable uniform source)
//! - Daily cycles driven by a simulated hour-of-day clock
//! - Named scenarios (indoor room, greenhouse, office with AC, outdoor
//!   sunny/cloudy) or fully manual parameters
//!
//! The clock and the random source are explicit inputs, so tests can pin the
//! seed and feed synthetic timestamps.
//!
//! ```
//! use envsim_core::{ClimateScenario, ThermoHygrometer, UniformDraw};
//!
//! let mut dht = ThermoHygrometer::new(ClimateScenario::IndoorRoom, 0, UniformDraw::with_seed(1));
//! dht.update(1_000);
//! assert!((22.4..=23.1).contains(&dht.read()));
//! ```

pub mod channel;
pub mod diurnal;
pub mod noise;
pub mod profile;
pub mod rng;
pub mod scenario;
pub mod sensor;
pub mod walk;

pub use channel::{Dynamics, EnvironmentChannel, HourWindow, Seed, SimClock};
pub use profile::{Bounds, ChannelProfile, ProfileError};
pub use rng::UniformDraw;
pub use scenario::{ClimateScenario, LightScenario, ManualClimate, ManualLight, UnknownScenario};
pub use sensor::{LightMeter, Quantity, SensorModel, ThermoHygrometer};
