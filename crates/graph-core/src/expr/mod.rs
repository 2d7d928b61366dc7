// File: crates/graph-core/src/expr/mod.rs
// Summary: Expression evaluator boundary: compiler traits, variable bindings and the built-in math compiler.

mod ast;
mod parser;

use std::fmt;
use std::str::FromStr;

pub use ast::{BinaryOp, Function, Node, UnaryOp};

use crate::error::{CompileError, EvalFault};

/// Named numeric bindings handed to a compiled expression.
/// Updating an existing name reuses its slot, so per-point rebinding does not allocate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variables {
    entries: Vec<(String, f64)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A function over named variables that may fault at any individual point.
pub trait CompiledExpression: Send + Sync {
    fn evaluate(&self, vars: &Variables) -> Result<f64, EvalFault>;

    /// Names the expression reads, when the compiler can tell ahead of evaluation.
    fn free_variables(&self) -> Option<Vec<String>> {
        None
    }
}

/// Turns expression text into a [`CompiledExpression`].
pub trait ExpressionCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression>, CompileError>;
}

/// A parsed expression in the built-in math language.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, CompileError> {
        if source.trim().is_empty() {
            return Err(CompileError::Empty);
        }
        let root = parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Free variables the expression needs bound at evaluation time.
    pub fn variables(&self) -> Vec<String> {
        self.root.variables()
    }

    pub fn eval(&self, vars: &Variables) -> Result<f64, EvalFault> {
        self.root.eval(vars)
    }
}

impl FromStr for Expression {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl CompiledExpression for Expression {
    fn evaluate(&self, vars: &Variables) -> Result<f64, EvalFault> {
        self.eval(vars)
    }

    fn free_variables(&self) -> Option<Vec<String>> {
        Some(self.variables())
    }
}

/// Default compiler backed by the pest grammar in `grammar.pest`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathCompiler;

impl ExpressionCompiler for MathCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression>, CompileError> {
        Ok(Box::new(Expression::parse(source)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_reuses_entry() {
        let mut vars = Variables::new().with("x", 1.0);
        vars.set("x", 2.0);
        vars.set("y", 3.0);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("x"), Some(2.0));
        assert_eq!(vars.get("z"), None);
    }

    #[test]
    fn compiler_rejects_blank_text() {
        assert_eq!(MathCompiler.compile("   ").err(), Some(CompileError::Empty));
    }

    #[test]
    fn reports_free_variables() {
        let expr: Expression = "x * sin(y) + x + pi".parse().unwrap();
        assert_eq!(expr.variables(), vec!["x".to_string(), "y".to_string()]);
    }
}
