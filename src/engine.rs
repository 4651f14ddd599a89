//! Per-call execution engine
//!
//! Each call either rescales the upstream channels (passthrough) or
//! synthesizes the selected shape from the accumulated phase (synthesis).
//! The mode is decided afresh every call from upstream presence alone.

use std::f64::consts::TAU;

use tracing::{debug, trace, warn};

use crate::generator::{sample_or_silence, PhaseAccumulator, Shape};
use crate::host::{ChopInput, ChopOutput, OpInputs};

/// Parameter names read by the engine
pub const PAR_SPEED: &str = "Speed";
pub const PAR_SCALE: &str = "Scale";
pub const PAR_SHAPE: &str = "Shape";
pub const PAR_RESET: &str = "Reset";

/// Parameter values and upstream data for one call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot<'a> {
    pub scale: f64,
    /// Only read in synthesis mode
    pub speed: f64,
    /// `None` for a menu position outside the known shapes
    pub shape: Option<Shape>,
    pub upstream: Option<&'a ChopInput>,
}

impl Default for ParameterSnapshot<'_> {
    fn default() -> Self {
        Self {
            scale: 1.0,
            speed: 1.0,
            shape: Some(Shape::Sine),
            upstream: None,
        }
    }
}

impl<'a> ParameterSnapshot<'a> {
    /// Read the current parameter values and the first input
    pub fn read(inputs: &'a dyn OpInputs) -> Self {
        Self {
            scale: inputs.par_double(PAR_SCALE),
            speed: inputs.par_double(PAR_SPEED),
            shape: Shape::from_index(inputs.par_int(PAR_SHAPE)),
            upstream: inputs.input_chop(0),
        }
    }

    /// Snapshot for synthesizing `shape`
    pub fn synthesis(shape: Shape, speed: f64, scale: f64) -> Self {
        Self {
            scale,
            speed,
            shape: Some(shape),
            upstream: None,
        }
    }

    /// Snapshot for rescaling `upstream`
    pub fn passthrough(upstream: &'a ChopInput, scale: f64) -> Self {
        Self {
            scale,
            upstream: Some(upstream),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::select(self.upstream)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Passthrough,
    Synthesis,
}

impl Mode {
    /// Passthrough when there is upstream data to read, synthesis otherwise
    pub fn select(upstream: Option<&ChopInput>) -> Mode {
        match upstream {
            Some(input) if !input.is_empty() => Mode::Passthrough,
            _ => Mode::Synthesis,
        }
    }
}

/// Execution engine for one operator instance
#[derive(Debug, Clone, Default)]
pub struct Engine {
    state: PhaseAccumulator,
    last_mode: Option<Mode>,
    /// Where the passthrough read cursor stopped on the last passthrough call
    read_cursor: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `output` for one call
    ///
    /// # Example
    /// ```
    /// use wave_chop::engine::{Engine, ParameterSnapshot};
    /// use wave_chop::host::{ChopInput, ChopOutput};
    ///
    /// let mut engine = Engine::new();
    /// let upstream = ChopInput::new(vec![vec![1.0, 2.0, 3.0]], 60.0).unwrap();
    /// let mut output = ChopOutput::new(1, 5, 60.0);
    ///
    /// engine.execute(&mut output, &ParameterSnapshot::passthrough(&upstream, 2.0));
    /// assert_eq!(output.channel(0), Some(&[2.0, 4.0, 6.0, 2.0, 4.0][..]));
    /// ```
    pub fn execute(&mut self, output: &mut ChopOutput, params: &ParameterSnapshot<'_>) {
        self.state.touch();

        let mode = params.mode();
        if self.last_mode != Some(mode) {
            debug!(?mode, previous = ?self.last_mode, "mode changed");
            self.last_mode = Some(mode);
        }
        trace!(
            count = self.state.invocation_count(),
            channels = output.num_channels(),
            samples = output.num_samples(),
            ?mode,
            "execute"
        );

        match (mode, params.upstream) {
            (Mode::Passthrough, Some(upstream)) => {
                self.read_cursor = passthrough(output, upstream, params.scale);
            }
            _ => self.synthesize(output, params),
        }
    }

    fn synthesize(&mut self, output: &mut ChopOutput, params: &ParameterSnapshot<'_>) {
        let step = PhaseAccumulator::step(params.speed);
        let num_samples = output.num_samples();
        // Fixed angular spacing between channels, in the sine's radians
        let spacing = TAU / output.num_channels() as f64;
        let start = self.state.phase_offset();
        if params.shape.is_none() {
            warn!("unknown shape, writing silence");
        }

        for (i, channel) in output.channels_mut().enumerate() {
            let mut offset = start + spacing * i as f64;
            for sample in channel.iter_mut() {
                *sample = (sample_or_silence(params.shape, offset) * params.scale) as f32;
                offset += step;
            }
        }

        self.state.advance(params.speed, num_samples);
    }

    /// Zero the phase offset
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &PhaseAccumulator {
        &self.state
    }

    pub fn invocation_count(&self) -> u64 {
        self.state.invocation_count()
    }

    pub fn phase_offset(&self) -> f64 {
        self.state.phase_offset()
    }

    /// Mode taken by the most recent call
    pub fn last_mode(&self) -> Option<Mode> {
        self.last_mode
    }

    /// Upstream sample index the last passthrough call would have read next
    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }
}

/// Copy `upstream` into `output` scaled by `scale`
///
/// A single cursor walks the upstream samples across all channels in order,
/// wrapping at the upstream length, so channel `i` starts reading where
/// channel `i - 1` stopped. Output channels without an upstream counterpart
/// are written as zero but still move the cursor.
///
/// Returns the final cursor position.
fn passthrough(output: &mut ChopOutput, upstream: &ChopInput, scale: f64) -> usize {
    let wrap = upstream.num_samples();
    if output.num_channels() > upstream.num_channels() {
        warn!(
            output = output.num_channels(),
            upstream = upstream.num_channels(),
            "upstream has fewer channels than the output, padding with zeros"
        );
    }

    let mut ind = 0;
    for (i, channel) in output.channels_mut().enumerate() {
        let source = upstream.channel_data(i);
        for sample in channel.iter_mut() {
            *sample = source.map_or(0.0, |data| (data[ind] as f64 * scale) as f32);
            ind = (ind + 1) % wrap;
        }
    }
    ind
}
