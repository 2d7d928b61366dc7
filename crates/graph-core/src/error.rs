// File: crates/graph-core/src/error.rs
// Summary: Error types for compiling, evaluating and sampling expressions.

use thiserror::Error;

use crate::expr::Function;
use crate::mode::PlotMode;

/// Expression text could not be turned into an evaluable function.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("expression is empty")]
    Empty,
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("function '{name}' expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
    },
    #[error("'{0}' is a function and must be called with arguments")]
    BareFunction(String),
}

/// A compiled expression could not produce a value at one sample point.
/// The sampler records these as missing samples; they never fail a plot.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalFault {
    #[error("undefined symbol '{0}'")]
    UndefinedVariable(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("{function}({value}) is outside the function's domain")]
    Domain { function: &'static str, value: f64 },
}

impl EvalFault {
    pub(crate) fn domain(function: Function, value: f64) -> Self {
        EvalFault::Domain {
            function: function.name(),
            value,
        }
    }
}

/// A plot request was rejected before any sampling happened.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("{slot}: {source}")]
    Compile {
        slot: String,
        #[source]
        source: CompileError,
    },
    #[error("no expression supplied for slot '{slot}'")]
    MissingSlot { slot: String },
    #[error("invalid sampling range for {mode} mode: {reason}")]
    InvalidRange { mode: PlotMode, reason: String },
}

impl ParseError {
    /// Identifier of the offending slot, when the error is tied to one.
    pub fn slot(&self) -> Option<&str> {
        match self {
            ParseError::Compile { slot, .. } | ParseError::MissingSlot { slot } => Some(slot),
            ParseError::InvalidRange { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("mode {mode} has no slot '{slot}'")]
    UnknownSlot { mode: PlotMode, slot: String },
}
