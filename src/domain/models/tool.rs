//! Built-in arithmetic tools and the arguments they consume.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::domain::errors::{ToolError, ToolResult};

/// Names of the parameters every built-in tool requires, in declaration order.
pub const REQUIRED_PARAMS: [&str; 2] = ["a", "b"];

/// Caller-supplied mapping of parameter name to numeric value.
///
/// Keys are caller-controlled; extra keys are carried but ignored by tools.
/// A `null` value decodes as `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArgumentSet(HashMap<String, f64>);

impl<'de> Deserialize<'de> for ArgumentSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Option<f64>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(name, value)| (name, value.unwrap_or_default()))
                .collect(),
        ))
    }
}

impl ArgumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing arguments in code.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve both operands, or report every missing key together with the
    /// values that were present.
    fn operands(&self) -> ToolResult<(f64, f64)> {
        match (self.get("a"), self.get("b")) {
            (Some(a), Some(b)) => Ok((a, b)),
            (a, b) => {
                let mut missing = Vec::new();
                let mut provided = Vec::new();
                for (name, value) in REQUIRED_PARAMS.iter().zip([a, b]) {
                    match value {
                        Some(v) => provided.push(((*name).to_string(), v)),
                        None => missing.push((*name).to_string()),
                    }
                }
                Err(ToolError::MissingArguments { missing, provided })
            }
        }
    }
}

/// The closed set of operations this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Add,
    Sub,
    Mul,
    Div,
}

impl Tool {
    /// Every tool, in the order it is advertised to callers.
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Add => "Adds two numbers together and returns result",
            Self::Sub => "Subtracts second number from the first and returns result",
            Self::Mul => "Multiplies two numbers together and returns result",
            Self::Div => "Divides second number from the first and returns result",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Run the tool against `args` using plain IEEE-754 double arithmetic.
    pub fn apply(self, args: &ArgumentSet) -> ToolResult<f64> {
        let (a, b) = args.operands()?;
        match self {
            Self::Add => Ok(a + b),
            Self::Sub => Ok(a - b),
            Self::Mul => Ok(a * b),
            Self::Div => {
                if b == 0.0 {
                    return Err(ToolError::DivisionByZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
