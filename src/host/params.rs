use serde::{Deserialize, Serialize};

use super::ChopInput;

/// Page new parameters land on unless told otherwise
pub const DEFAULT_PAGE: &str = "Custom";

/// Outcome of a parameter declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParAppendResult {
    Success,
    /// Names must start with an uppercase letter followed by lowercase letters or digits
    InvalidName,
    InvalidLabel,
    /// Mismatched or empty menu entry lists
    InvalidSize,
    InvalidPage,
    AlreadyExists,
}

/// A float slider or a pulse button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericParameter {
    pub name: String,
    pub label: String,
    pub page: String,
    pub default_value: f64,
    pub min_slider: f64,
    pub max_slider: f64,
}

impl NumericParameter {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            page: DEFAULT_PAGE.to_string(),
            default_value: 0.0,
            min_slider: 0.0,
            max_slider: 1.0,
        }
    }

    pub fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_slider(mut self, min: f64, max: f64) -> Self {
        self.min_slider = min;
        self.max_slider = max;
        self
    }
}

/// A free text field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringParameter {
    pub name: String,
    pub label: String,
    pub page: String,
    pub default_value: String,
}

impl StringParameter {
    pub fn new(name: &str, label: &str, default_value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            page: DEFAULT_PAGE.to_string(),
            default_value: default_value.to_string(),
        }
    }
}

/// A menu: a string parameter restricted to `names`, shown as `labels`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuParameter {
    #[serde(flatten)]
    pub par: StringParameter,
    pub names: Vec<String>,
    pub labels: Vec<String>,
}

impl MenuParameter {
    pub fn new(par: StringParameter, names: &[&str], labels: &[&str]) -> Self {
        Self {
            par,
            names: names.iter().map(|s| s.to_string()).collect(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Menu position of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Every kind of declaration a host records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParameterDescriptor {
    Float(NumericParameter),
    String(StringParameter),
    Menu(MenuParameter),
    Pulse(NumericParameter),
}

impl ParameterDescriptor {
    pub fn name(&self) -> &str {
        match self {
            ParameterDescriptor::Float(p) | ParameterDescriptor::Pulse(p) => &p.name,
            ParameterDescriptor::String(p) => &p.name,
            ParameterDescriptor::Menu(p) => &p.par.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ParameterDescriptor::Float(p) | ParameterDescriptor::Pulse(p) => &p.label,
            ParameterDescriptor::String(p) => &p.label,
            ParameterDescriptor::Menu(p) => &p.par.label,
        }
    }

    pub fn page(&self) -> &str {
        match self {
            ParameterDescriptor::Float(p) | ParameterDescriptor::Pulse(p) => &p.page,
            ParameterDescriptor::String(p) => &p.page,
            ParameterDescriptor::Menu(p) => &p.par.page,
        }
    }
}

/// Parameter declaration capability handed to an operator at setup
pub trait ParameterManager {
    fn append_float(&mut self, par: NumericParameter) -> ParAppendResult;
    fn append_string(&mut self, par: StringParameter) -> ParAppendResult;
    fn append_menu(&mut self, par: MenuParameter) -> ParAppendResult;
    fn append_pulse(&mut self, par: NumericParameter) -> ParAppendResult;
}

/// Per-cook view of parameter values and connected inputs
///
/// Reading an undeclared parameter yields zero (or `None` for strings).
pub trait OpInputs {
    fn par_double(&self, name: &str) -> f64;

    /// Integer value; menus evaluate to their position
    fn par_int(&self, name: &str) -> i32;

    /// String value; menus evaluate to their entry name
    fn par_string(&self, name: &str) -> Option<&str>;

    /// Grey out (`false`) or restore (`true`) a parameter in the host UI
    fn enable_par(&mut self, name: &str, enabled: bool);

    fn num_inputs(&self) -> usize;

    fn input_chop(&self, index: usize) -> Option<&ChopInput>;
}
