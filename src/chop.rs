//! Host-facing operator
//!
//! `WaveChop` wires the engine to the host: it declares the parameters,
//! negotiates the output shape, greys out the synthesis parameters while an
//! input is connected, reports diagnostics and handles the `Reset` pulse.

use tracing::info;

use crate::config::ChopConfig;
use crate::engine::{
    Engine, Mode, ParameterSnapshot, PAR_RESET, PAR_SCALE, PAR_SHAPE, PAR_SPEED,
};
use crate::error::ChopError;
use crate::generator::Shape;
use crate::host::{
    Chop, ChopOutput, GeneralInfo, InfoChan, InfoDatEntries, InfoDatSize, MenuParameter,
    NodeInfo, NumericParameter, OpInputs, OutputInfo, ParAppendResult, ParameterManager,
    Registration, StringParameter, CHOP_API_VERSION,
};

/// Names reported on the info channels and info table, in row order
pub const INFO_EXECUTE_COUNT: &str = "executeCount";
pub const INFO_OFFSET: &str = "offset";

pub struct WaveChop {
    node: NodeInfo,
    config: ChopConfig,
    engine: Engine,
}

impl WaveChop {
    /// Create an operator with the stock configuration
    ///
    /// # Example
    /// ```
    /// use wave_chop::host::{Chop, NodeInfo};
    /// use wave_chop::WaveChop;
    ///
    /// let mut chop = WaveChop::new(&NodeInfo::new("/project1/wave1", 1));
    /// chop.pulse_pressed("Reset");
    /// assert_eq!(chop.engine().phase_offset(), 0.0);
    /// ```
    pub fn new(node: &NodeInfo) -> Self {
        Self::with_config(node, ChopConfig::default())
    }

    pub fn with_config(node: &NodeInfo, config: ChopConfig) -> Self {
        Self {
            node: node.clone(),
            config,
            engine: Engine::new(),
        }
    }

    pub fn node(&self) -> &NodeInfo {
        &self.node
    }

    pub fn config(&self) -> &ChopConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn info_row(&self, index: usize) -> Option<(&'static str, String)> {
        match index {
            0 => Some((
                INFO_EXECUTE_COUNT,
                self.engine.invocation_count().to_string(),
            )),
            1 => Some((INFO_OFFSET, format_g(self.engine.phase_offset()))),
            _ => None,
        }
    }
}

fn check_append(name: &str, result: ParAppendResult) -> Result<(), ChopError> {
    match result {
        ParAppendResult::Success => Ok(()),
        result => Err(ChopError::ParameterRejected {
            name: name.to_string(),
            result,
        }),
    }
}

impl Chop for WaveChop {
    fn general_info(&self, _inputs: &dyn OpInputs) -> GeneralInfo {
        GeneralInfo {
            cook_every_frame_if_asked: true,
            timeslice: true,
            input_match_index: 0,
        }
    }

    fn output_info(&self, inputs: &dyn OpInputs) -> Option<OutputInfo> {
        // A connected input dictates channels, names and rate
        if inputs.num_inputs() > 0 {
            return None;
        }
        Some(OutputInfo {
            num_channels: self.config.num_channels,
            sample_rate: self.config.sample_rate,
        })
    }

    fn channel_name(&self, index: usize, _inputs: &dyn OpInputs) -> String {
        self.config.channel_name(index)
    }

    fn execute(&mut self, output: &mut ChopOutput, inputs: &mut dyn OpInputs) {
        let synthesis = Mode::select(inputs.input_chop(0)) == Mode::Synthesis;
        inputs.enable_par(PAR_SPEED, synthesis);
        inputs.enable_par(PAR_SHAPE, synthesis);
        inputs.enable_par(PAR_RESET, synthesis);

        let params = ParameterSnapshot::read(&*inputs);
        self.engine.execute(output, &params);
    }

    fn num_info_chop_chans(&self) -> usize {
        2
    }

    fn info_chop_chan(&self, index: usize) -> Option<InfoChan> {
        let (name, value) = match index {
            0 => (INFO_EXECUTE_COUNT, self.engine.invocation_count() as f32),
            1 => (INFO_OFFSET, self.engine.phase_offset() as f32),
            _ => return None,
        };
        Some(InfoChan {
            name: name.to_string(),
            value,
        })
    }

    fn info_dat_size(&self) -> Option<InfoDatSize> {
        Some(InfoDatSize {
            rows: 2,
            cols: 2,
            by_column: false,
        })
    }

    fn info_dat_entries(&self, index: usize, num_entries: usize) -> Option<InfoDatEntries> {
        let (name, value) = self.info_row(index)?;
        let mut values = vec![name.to_string(), value];
        values.truncate(num_entries);
        Some(InfoDatEntries { values })
    }

    fn setup_parameters(&mut self, manager: &mut dyn ParameterManager) -> Result<(), ChopError> {
        let speed = self.config.speed;
        check_append(
            PAR_SPEED,
            manager.append_float(
                NumericParameter::new(PAR_SPEED, "Speed")
                    .with_default(speed.default)
                    .with_slider(speed.min, speed.max),
            ),
        )?;

        let scale = self.config.scale;
        check_append(
            PAR_SCALE,
            manager.append_float(
                NumericParameter::new(PAR_SCALE, "Scale")
                    .with_default(scale.default)
                    .with_slider(scale.min, scale.max),
            ),
        )?;

        let names = Shape::ALL.map(Shape::name);
        check_append(
            PAR_SHAPE,
            manager.append_menu(MenuParameter::new(
                StringParameter::new(PAR_SHAPE, "Shape", self.config.shape.name()),
                &names,
                &names,
            )),
        )?;

        check_append(
            PAR_RESET,
            manager.append_pulse(NumericParameter::new(PAR_RESET, "Reset")),
        )?;

        info!(op = %self.node.op_path, "parameters declared");
        Ok(())
    }

    fn pulse_pressed(&mut self, name: &str) {
        if name == PAR_RESET {
            info!(
                op = %self.node.op_path,
                offset = self.engine.phase_offset(),
                "phase reset"
            );
            self.engine.reset();
        }
    }
}

fn create(node: &NodeInfo) -> Box<dyn Chop> {
    Box::new(WaveChop::new(node))
}

/// Entry points for loading this operator into a host
pub fn registration() -> Registration {
    Registration {
        api_version: CHOP_API_VERSION,
        create,
    }
}

/// Format like C's `%g`: six significant digits, trailing zeros dropped,
/// exponent form when the exponent is below -4 or at least 6
pub fn format_g(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the target precision first; rounding can bump the exponent
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
