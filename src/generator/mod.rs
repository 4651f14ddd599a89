pub mod phase;
pub mod waveform;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChopError;

pub use phase::PhaseAccumulator;

/// Waveform selected by the `Shape` menu
///
/// The variants do not agree on what a unit of phase means:
/// - `Sine` reads phase as radians, one period every 2π.
/// - `Square` and `Ramp` read phase as wavelengths, one period every 1.0.
///
/// The engine spaces channels by 2π / channels and steps by `speed * 0.01`
/// for every shape, so the audible rate of a square or ramp is 2π times that
/// of a sine at the same speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Sine,
    Square,
    Ramp,
}

impl Shape {
    /// Menu order as declared to the host
    pub const ALL: [Shape; 3] = [Shape::Sine, Shape::Square, Shape::Ramp];

    /// Map a menu index to a shape. Indices outside the menu give `None`.
    pub fn from_index(index: i32) -> Option<Shape> {
        match index {
            0 => Some(Shape::Sine),
            1 => Some(Shape::Square),
            2 => Some(Shape::Ramp),
            _ => None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Shape::Sine => 0,
            Shape::Square => 1,
            Shape::Ramp => 2,
        }
    }

    /// Menu entry name (also used as the label)
    pub fn name(self) -> &'static str {
        match self {
            Shape::Sine => "Sine",
            Shape::Square => "Square",
            Shape::Ramp => "Ramp",
        }
    }

    /// Evaluate this shape at `phase`
    pub fn sample(self, phase: f64) -> f64 {
        match self {
            Shape::Sine => waveform::sine_wave(phase),
            Shape::Square => waveform::square_wave(phase),
            Shape::Ramp => waveform::ramp_wave(phase),
        }
    }
}

impl FromStr for Shape {
    type Err = ChopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChopError::UnknownMenuEntry {
                name: "Shape".to_string(),
                value: s.to_string(),
            })
    }
}

/// Evaluate an optional shape; an unknown menu selection is silent.
pub fn sample_or_silence(shape: Option<Shape>, phase: f64) -> f64 {
    shape.map_or(0.0, |shape| shape.sample(phase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Shape::from_index(0), Some(Shape::Sine));
        assert_eq!(Shape::from_index(1), Some(Shape::Square));
        assert_eq!(Shape::from_index(2), Some(Shape::Ramp));
        assert_eq!(Shape::from_index(3), None);
        assert_eq!(Shape::from_index(-1), None);

        for shape in Shape::ALL {
            assert_eq!(Shape::from_index(shape.index()), Some(shape));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Sine".parse::<Shape>().unwrap(), Shape::Sine);
        assert_eq!("square".parse::<Shape>().unwrap(), Shape::Square);
        assert_eq!("RAMP".parse::<Shape>().unwrap(), Shape::Ramp);
        assert!("Triangle".parse::<Shape>().is_err());
    }

    #[test]
    fn test_unknown_shape_is_silent() {
        assert_eq!(sample_or_silence(None, 0.75), 0.0);
        assert_eq!(sample_or_silence(Some(Shape::Square), 0.75), 1.0);
    }

    #[test]
    fn test_phase_units_differ_per_shape() {
        // A quarter turn in radians for sine, three quarters of a wavelength for ramp
        let quarter = std::f64::consts::FRAC_PI_2;
        assert!((Shape::Sine.sample(quarter) - 1.0).abs() < 1e-12);
        assert!((Shape::Ramp.sample(0.75) - 0.75).abs() < 1e-12);
        assert_eq!(Shape::Square.sample(0.75), 1.0);
    }
}
