//! Host interface
//!
//! The host owns timing and parameters and calls into an operator through the
//! [`Chop`] trait. Operators read parameters and upstream data through
//! [`OpInputs`] and declare their parameters through [`ParameterManager`].
//!
//! [`sim::SimHost`] and [`timeline::Timeline`] are an in-process host used by
//! the tests and the command-line tools.

pub mod buffers;
pub mod params;
pub mod sim;
pub mod timeline;

use crate::error::ChopError;

pub use buffers::{ChopInput, ChopOutput};
pub use params::{
    MenuParameter, NumericParameter, OpInputs, ParAppendResult, ParameterDescriptor,
    ParameterManager, StringParameter,
};

/// Version of the operator API this crate implements
pub const CHOP_API_VERSION: i32 = 8;

/// Identity of the node an operator instance is attached to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeInfo {
    /// Full path of the node in the host's network
    pub op_path: String,
    /// Host-assigned instance id
    pub op_id: u32,
}

impl NodeInfo {
    pub fn new(op_path: impl Into<String>, op_id: u32) -> Self {
        Self {
            op_path: op_path.into(),
            op_id,
        }
    }
}

/// How the host should schedule an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralInfo {
    /// Cook every frame when something downstream asks for it
    pub cook_every_frame_if_asked: bool,
    /// Output a time slice: the host dictates `num_samples` each cook
    pub timeslice: bool,
    /// Input whose shape is mirrored when the operator declines to declare one
    pub input_match_index: usize,
}

/// Output shape declared by the operator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputInfo {
    pub num_channels: usize,
    pub sample_rate: f64,
}

/// One value reported on the info channel list
#[derive(Debug, Clone, PartialEq)]
pub struct InfoChan {
    pub name: String,
    pub value: f32,
}

/// Shape of the info table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoDatSize {
    pub rows: usize,
    pub cols: usize,
    /// `false` fills the table one row at a time
    pub by_column: bool,
}

/// One row (or column) of the info table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoDatEntries {
    pub values: Vec<String>,
}

/// Operator callbacks invoked by the host
///
/// Only `general_info`, `output_info`, `channel_name` and `execute` are
/// required; the remaining callbacks default to reporting nothing.
pub trait Chop {
    fn general_info(&self, inputs: &dyn OpInputs) -> GeneralInfo;

    /// Declare the output shape, or `None` to mirror the matched input
    fn output_info(&self, inputs: &dyn OpInputs) -> Option<OutputInfo>;

    fn channel_name(&self, index: usize, inputs: &dyn OpInputs) -> String;

    /// Fill every sample of every channel in `output`
    fn execute(&mut self, output: &mut ChopOutput, inputs: &mut dyn OpInputs);

    fn num_info_chop_chans(&self) -> usize {
        0
    }

    fn info_chop_chan(&self, _index: usize) -> Option<InfoChan> {
        None
    }

    fn info_dat_size(&self) -> Option<InfoDatSize> {
        None
    }

    fn info_dat_entries(&self, _index: usize, _num_entries: usize) -> Option<InfoDatEntries> {
        None
    }

    fn setup_parameters(&mut self, _manager: &mut dyn ParameterManager) -> Result<(), ChopError> {
        Ok(())
    }

    fn pulse_pressed(&mut self, _name: &str) {}
}

/// Entry points a host looks up when loading an operator
///
/// Destroying an instance is dropping the returned box.
#[derive(Clone, Copy)]
pub struct Registration {
    pub api_version: i32,
    pub create: fn(&NodeInfo) -> Box<dyn Chop>,
}

impl Registration {
    /// Create an operator instance for `info`
    pub fn instantiate(&self, info: &NodeInfo) -> Box<dyn Chop> {
        (self.create)(info)
    }

    /// Whether this registration targets the API version `host_version`
    pub fn is_compatible(&self, host_version: i32) -> bool {
        self.api_version == host_version
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
