//! Stateless waveform functions
//!
//! All three accept an unbounded phase. `%` is the truncating remainder, so
//! for negative phases the fractional part is negative before `abs()`.

/// `sin(phase)`, phase in radians
pub fn sine_wave(phase: f64) -> f64 {
    phase.sin()
}

/// `1.0` when the fractional phase magnitude is above one half, else `0.0`
pub fn square_wave(phase: f64) -> f64 {
    if (phase % 1.0).abs() > 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Fractional phase magnitude, in `[0, 1)`
pub fn ramp_wave(phase: f64) -> f64 {
    (phase % 1.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases() -> impl Iterator<Item = f64> {
        (-400..=400).map(|i| i as f64 * 0.0137)
    }

    #[test]
    fn test_sine() {
        assert_eq!(sine_wave(0.0), 0.0);
        assert!((sine_wave(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-12);
        assert!((sine_wave(-std::f64::consts::FRAC_PI_2) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_is_binary() {
        for p in phases() {
            let v = square_wave(p);
            assert!(v == 0.0 || v == 1.0, "square({}) = {}", p, v);
            assert_eq!(v == 1.0, (p % 1.0).abs() > 0.5);
        }
    }

    #[test]
    fn test_square_threshold() {
        assert_eq!(square_wave(0.0), 0.0);
        assert_eq!(square_wave(0.5), 0.0); // strictly greater than one half
        assert_eq!(square_wave(0.51), 1.0);
        assert_eq!(square_wave(1.25), 0.0);
        assert_eq!(square_wave(1.75), 1.0);
        // Negative phases mirror through abs()
        assert_eq!(square_wave(-0.75), 1.0);
        assert_eq!(square_wave(-0.25), 0.0);
    }

    #[test]
    fn test_ramp_range() {
        for p in phases() {
            let v = ramp_wave(p);
            assert!((0.0..1.0).contains(&v), "ramp({}) = {}", p, v);
            assert_eq!(v, (p % 1.0).abs());
        }
    }

    #[test]
    fn test_ramp_values() {
        assert_eq!(ramp_wave(0.0), 0.0);
        assert!((ramp_wave(0.25) - 0.25).abs() < 1e-12);
        assert!((ramp_wave(3.75) - 0.75).abs() < 1e-12);
        assert!((ramp_wave(-0.25) - 0.25).abs() < 1e-12);
        assert_eq!(ramp_wave(2.0), 0.0);
    }
}
