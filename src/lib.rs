//! A time-sliced channel operator (CHOP) that either rescales an upstream
//! channel source or synthesizes sine, square and ramp waves.
//!
//! - [`generator`]: waveform shapes and the persistent phase accumulator
//! - [`engine`]: the per-call execution engine
//! - [`chop`]: the host-facing operator (parameters, info channels, pulses)
//! - [`host`]: host interface types plus a simulated host and timeline
//! - [`wav`]: WAV export of rendered output

pub mod chop;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod host;
pub mod wav;

pub use chop::WaveChop;
pub use config::ChopConfig;
pub use engine::{Engine, ParameterSnapshot};
pub use error::ChopError;
pub use generator::Shape;
