/// Phase advanced per sample for a `Speed` of 1.0
pub const STEP_PER_SPEED: f64 = 0.01;

/// Persistent execution state of one operator instance
///
/// Holds the phase offset that carries synthesis across calls and the count
/// of execute calls. Passthrough calls only touch the counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseAccumulator {
    invocation_count: u64,
    phase_offset: f64,
}

impl PhaseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-sample phase increment for `speed`
    pub fn step(speed: f64) -> f64 {
        speed * STEP_PER_SPEED
    }

    /// Record one execute call. Called once per call, in either mode.
    pub fn touch(&mut self) {
        self.invocation_count += 1;
    }

    /// Move the phase offset past `num_samples` samples at `speed`
    ///
    /// Returns the per-sample step used.
    pub fn advance(&mut self, speed: f64, num_samples: usize) -> f64 {
        let step = Self::step(speed);
        self.phase_offset += step * num_samples as f64;
        step
    }

    /// Return the phase offset to zero. The invocation count is kept.
    pub fn reset(&mut self) {
        self.phase_offset = 0.0;
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocation_count
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }
}
