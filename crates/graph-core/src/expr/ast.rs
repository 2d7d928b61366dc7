// File: crates/graph-core/src/expr/ast.rs
// Summary: Expression tree, built-in function table and pointwise evaluation.

use std::fmt;

use strum::{EnumString, IntoStaticStr};

use crate::error::EvalFault;
use crate::expr::Variables;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Factorial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// Built-in functions, resolved by name when an expression is compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Sec,
    Csc,
    Cot,
    Exp,
    Ln,
    Log,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
    Atan2,
    Pow,
    Min,
    Max,
    Mod,
    Hypot,
}

impl Function {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Accepted argument counts as `(min, max)`; `None` means variadic.
    pub fn arity(self) -> (usize, Option<usize>) {
        use Function::*;
        match self {
            Log => (1, Some(2)),
            Min | Max => (1, None),
            Atan2 | Pow | Mod | Hypot => (2, Some(2)),
            _ => (1, Some(1)),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |m| count <= m)
    }

    pub fn describe_arity(self) -> String {
        match self.arity() {
            (min, Some(max)) if min == max => min.to_string(),
            (min, Some(max)) => format!("{min} to {max}"),
            (min, None) => format!("at least {min}"),
        }
    }

    fn apply(self, args: &[f64]) -> Result<f64, EvalFault> {
        use Function::*;
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        let v = match self {
            Sin => a.sin(),
            Cos => a.cos(),
            Tan => a.tan(),
            Asin => unit_interval(self, a)?.asin(),
            Acos => unit_interval(self, a)?.acos(),
            Atan => a.atan(),
            Sinh => a.sinh(),
            Cosh => a.cosh(),
            Tanh => a.tanh(),
            Asinh => a.asinh(),
            Acosh => {
                if a < 1.0 {
                    return Err(EvalFault::domain(self, a));
                }
                a.acosh()
            }
            Atanh => unit_interval(self, a)?.atanh(),
            Sec => 1.0 / a.cos(),
            Csc => 1.0 / a.sin(),
            Cot => 1.0 / a.tan(),
            Exp => a.exp(),
            Ln => non_negative(self, a)?.ln(),
            Log if args.len() == 2 => non_negative(self, a)?.ln() / non_negative(self, b)?.ln(),
            Log => non_negative(self, a)?.ln(),
            Log10 => non_negative(self, a)?.log10(),
            Log2 => non_negative(self, a)?.log2(),
            Sqrt => non_negative(self, a)?.sqrt(),
            Cbrt => a.cbrt(),
            Abs => a.abs(),
            Sign => {
                if a == 0.0 || a.is_nan() {
                    a
                } else {
                    a.signum()
                }
            }
            Floor => a.floor(),
            Ceil => a.ceil(),
            Round => a.round(),
            Atan2 => a.atan2(b),
            Pow => power(a, b)?,
            Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Mod => floored_mod(a, b)?,
            Hypot => a.hypot(b),
        };
        Ok(v)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number(f64),
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        func: Function,
        args: Vec<Node>,
    },
}

impl Node {
    pub fn eval(&self, vars: &Variables) -> Result<f64, EvalFault> {
        match self {
            Node::Number(v) => Ok(*v),
            Node::Variable(name) => vars
                .get(name)
                .ok_or_else(|| EvalFault::UndefinedVariable(name.clone())),
            Node::Unary { op, operand } => {
                let v = operand.eval(vars)?;
                match op {
                    UnaryOp::Neg => Ok(-v),
                    UnaryOp::Factorial => factorial(v),
                }
            }
            Node::Binary { op, lhs, rhs } => {
                let a = lhs.eval(vars)?;
                let b = rhs.eval(vars)?;
                match op {
                    BinaryOp::Add => Ok(a + b),
                    BinaryOp::Sub => Ok(a - b),
                    BinaryOp::Mul => Ok(a * b),
                    BinaryOp::Div => {
                        if b == 0.0 {
                            return Err(EvalFault::DivisionByZero);
                        }
                        Ok(a / b)
                    }
                    BinaryOp::Rem => floored_mod(a, b),
                    BinaryOp::Pow => power(a, b),
                }
            }
            Node::Call { func, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(vars))
                    .collect::<Result<Vec<_>, _>>()?;
                func.apply(&values)
            }
        }
    }

    /// Names of all variables referenced by this tree, sorted and deduplicated.
    pub fn variables(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Node::Number(_) => {}
            Node::Variable(name) => out.push(name.clone()),
            Node::Unary { operand, .. } => operand.collect_variables(out),
            Node::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
            Node::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(out);
                }
            }
        }
    }
}

fn unit_interval(func: Function, v: f64) -> Result<f64, EvalFault> {
    if (-1.0..=1.0).contains(&v) || v.is_nan() {
        Ok(v)
    } else {
        Err(EvalFault::domain(func, v))
    }
}

fn non_negative(func: Function, v: f64) -> Result<f64, EvalFault> {
    if v < 0.0 {
        Err(EvalFault::domain(func, v))
    } else {
        Ok(v)
    }
}

// Real results only: a negative base with a fractional exponent has no real value.
fn power(base: f64, exp: f64) -> Result<f64, EvalFault> {
    let v = base.powf(exp);
    if v.is_nan() && !base.is_nan() && !exp.is_nan() {
        return Err(EvalFault::domain(Function::Pow, base));
    }
    Ok(v)
}

// Result takes the sign of the divisor, e.g. -1 % 3 == 2.
fn floored_mod(a: f64, b: f64) -> Result<f64, EvalFault> {
    if b == 0.0 {
        return Err(EvalFault::DivisionByZero);
    }
    Ok(a - b * (a / b).floor())
}

fn factorial(n: f64) -> Result<f64, EvalFault> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(EvalFault::Domain {
            function: "factorial",
            value: n,
        });
    }
    // 171! overflows f64.
    if n > 170.0 {
        return Ok(f64::INFINITY);
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}
