//! In-process host
//!
//! `SimHost` records parameter declarations, holds their current values and
//! carries the connected inputs. It stands in for the real host in tests and
//! in the command-line tools.

use std::collections::HashMap;

use tracing::debug;

use super::params::{
    MenuParameter, NumericParameter, OpInputs, ParAppendResult, ParameterDescriptor,
    ParameterManager, StringParameter,
};
use super::ChopInput;
use crate::error::ChopError;

#[derive(Debug, Clone, PartialEq)]
enum ParValue {
    Number(f64),
    Text(String),
    Menu { position: usize, name: String },
}

#[derive(Debug, Clone, Default)]
pub struct SimHost {
    declared: Vec<ParameterDescriptor>,
    values: HashMap<String, ParValue>,
    enabled: HashMap<String, bool>,
    inputs: Vec<ChopInput>,
}

/// Uppercase first letter, then lowercase letters or digits
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        _ => false,
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.declared
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.declared.iter().find(|p| p.name() == name)
    }

    /// Whether the operator last left `name` enabled. Undeclared names are disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.parameter(name).is_some() && self.enabled.get(name).copied().unwrap_or(true)
    }

    pub fn set_double(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), ParValue::Number(value));
    }

    /// Select a menu entry by name
    pub fn set_menu(&mut self, name: &str, entry: &str) -> Result<(), ChopError> {
        let position = match self.parameter(name) {
            Some(ParameterDescriptor::Menu(menu)) => menu.position(entry),
            _ => None,
        }
        .ok_or_else(|| ChopError::UnknownMenuEntry {
            name: name.to_string(),
            value: entry.to_string(),
        })?;

        self.values.insert(
            name.to_string(),
            ParValue::Menu {
                position,
                name: entry.to_string(),
            },
        );
        Ok(())
    }

    /// Force a raw menu position, including positions outside the menu
    pub fn set_menu_index(&mut self, name: &str, position: usize) {
        let entry = match self.parameter(name) {
            Some(ParameterDescriptor::Menu(menu)) => menu.names.get(position).cloned(),
            _ => None,
        }
        .unwrap_or_default();
        self.values.insert(
            name.to_string(),
            ParValue::Menu {
                position,
                name: entry,
            },
        );
    }

    /// Connect an input after the existing ones
    pub fn connect_input(&mut self, input: ChopInput) {
        self.inputs.push(input);
    }

    pub fn disconnect_inputs(&mut self) {
        self.inputs.clear();
    }

    fn declare(
        &mut self,
        descriptor: ParameterDescriptor,
        value: Option<ParValue>,
    ) -> ParAppendResult {
        let result = if !is_valid_name(descriptor.name()) {
            ParAppendResult::InvalidName
        } else if descriptor.label().is_empty() {
            ParAppendResult::InvalidLabel
        } else if descriptor.page().is_empty() {
            ParAppendResult::InvalidPage
        } else if self.parameter(descriptor.name()).is_some() {
            ParAppendResult::AlreadyExists
        } else {
            ParAppendResult::Success
        };

        debug!(name = descriptor.name(), ?result, "parameter declared");
        if result == ParAppendResult::Success {
            if let Some(value) = value {
                self.values.insert(descriptor.name().to_string(), value);
            }
            self.declared.push(descriptor);
        }
        result
    }
}

impl ParameterManager for SimHost {
    fn append_float(&mut self, par: NumericParameter) -> ParAppendResult {
        let value = ParValue::Number(par.default_value);
        self.declare(ParameterDescriptor::Float(par), Some(value))
    }

    fn append_string(&mut self, par: StringParameter) -> ParAppendResult {
        let value = ParValue::Text(par.default_value.clone());
        self.declare(ParameterDescriptor::String(par), Some(value))
    }

    fn append_menu(&mut self, par: MenuParameter) -> ParAppendResult {
        if par.names.is_empty() || par.names.len() != par.labels.len() {
            return ParAppendResult::InvalidSize;
        }
        let value = par.position(&par.par.default_value).map(|position| ParValue::Menu {
            position,
            name: par.par.default_value.clone(),
        });
        self.declare(ParameterDescriptor::Menu(par), value)
    }

    fn append_pulse(&mut self, par: NumericParameter) -> ParAppendResult {
        self.declare(ParameterDescriptor::Pulse(par), None)
    }
}

impl OpInputs for SimHost {
    fn par_double(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(ParValue::Number(v)) => *v,
            Some(ParValue::Menu { position, .. }) => *position as f64,
            Some(ParValue::Text(s)) => s.trim().parse().unwrap_or(0.0),
            None => 0.0,
        }
    }

    fn par_int(&self, name: &str) -> i32 {
        match self.values.get(name) {
            Some(ParValue::Menu { position, .. }) => i32::try_from(*position).unwrap_or(i32::MAX),
            _ => self.par_double(name) as i32,
        }
    }

    fn par_string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParValue::Text(s)) => Some(s.as_str()),
            Some(ParValue::Menu { name, .. }) => Some(name.as_str()),
            _ => None,
        }
    }

    fn enable_par(&mut self, name: &str, enabled: bool) {
        self.enabled.insert(name.to_string(), enabled);
    }

    fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn input_chop(&self, index: usize) -> Option<&ChopInput> {
        self.inputs.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_params() -> SimHost {
        let mut host = SimHost::new();
        let speed = NumericParameter::new("Speed", "Speed").with_default(1.5);
        assert_eq!(host.append_float(speed), ParAppendResult::Success);
        let menu = MenuParameter::new(
            StringParameter::new("Shape", "Shape", "Square"),
            &["Sine", "Square", "Ramp"],
            &["Sine", "Square", "Ramp"],
        );
        assert_eq!(host.append_menu(menu), ParAppendResult::Success);
        assert_eq!(
            host.append_pulse(NumericParameter::new("Reset", "Reset")),
            ParAppendResult::Success
        );
        host
    }

    #[test]
    fn test_defaults_are_readable() {
        let host = host_with_params();
        assert_eq!(host.par_double("Speed"), 1.5);
        assert_eq!(host.par_int("Shape"), 1);
        assert_eq!(host.par_string("Shape"), Some("Square"));
        assert_eq!(host.par_double("Reset"), 0.0);
        assert_eq!(host.par_double("Missing"), 0.0);
        assert_eq!(host.parameters().len(), 3);
    }

    #[test]
    fn test_name_validation() {
        let mut host = host_with_params();
        assert_eq!(
            host.append_float(NumericParameter::new("speed", "Speed")),
            ParAppendResult::InvalidName
        );
        assert_eq!(
            host.append_float(NumericParameter::new("SpeedX", "Speed")),
            ParAppendResult::InvalidName
        );
        assert_eq!(
            host.append_float(NumericParameter::new("Gain", "")),
            ParAppendResult::InvalidLabel
        );
        assert_eq!(
            host.append_float(NumericParameter::new("Speed", "Speed")),
            ParAppendResult::AlreadyExists
        );
        assert_eq!(
            host.append_float(NumericParameter::new("Gain2", "Gain 2")),
            ParAppendResult::Success
        );
    }

    #[test]
    fn test_menu_validation() {
        let mut host = SimHost::new();
        let empty = MenuParameter::new(StringParameter::new("Mode", "Mode", ""), &[], &[]);
        assert_eq!(host.append_menu(empty), ParAppendResult::InvalidSize);

        let mismatched = MenuParameter::new(
            StringParameter::new("Mode", "Mode", "A"),
            &["A", "B"],
            &["A"],
        );
        assert_eq!(host.append_menu(mismatched), ParAppendResult::InvalidSize);
    }

    #[test]
    fn test_set_menu() {
        let mut host = host_with_params();
        host.set_menu("Shape", "Ramp").unwrap();
        assert_eq!(host.par_int("Shape"), 2);
        assert!(host.set_menu("Shape", "Triangle").is_err());
        assert!(host.set_menu("Speed", "Sine").is_err());

        host.set_menu_index("Shape", 7);
        assert_eq!(host.par_int("Shape"), 7);
        assert_eq!(host.par_string("Shape"), Some(""));
    }

    #[test]
    fn test_enable_par() {
        let mut host = host_with_params();
        assert!(host.is_enabled("Speed"));
        host.enable_par("Speed", false);
        assert!(!host.is_enabled("Speed"));
        host.enable_par("Speed", true);
        assert!(host.is_enabled("Speed"));
        assert!(!host.is_enabled("Missing"));
    }

    #[test]
    fn test_inputs() {
        let mut host = SimHost::new();
        assert_eq!(host.num_inputs(), 0);
        assert!(host.input_chop(0).is_none());

        host.connect_input(ChopInput::new(vec![vec![1.0]], 60.0).unwrap());
        host.connect_input(ChopInput::new(vec![vec![2.0, 3.0]], 60.0).unwrap());
        assert_eq!(host.num_inputs(), 2);
        assert_eq!(host.input_chop(0).unwrap().num_samples(), 1);
        assert_eq!(host.input_chop(1).unwrap().num_samples(), 2);

        host.disconnect_inputs();
        assert_eq!(host.num_inputs(), 0);
    }
}
