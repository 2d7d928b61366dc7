// File: crates/graph-core/src/expr/parser.rs
// Summary: pest front end; turns expression text into a `Node` tree via a Pratt parser.

use std::str::FromStr;

use pest::error::{Error as PestError, LineColLocation};
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

use super::ast::{BinaryOp, Function, Node, UnaryOp};
use crate::error::CompileError;

#[derive(Parser)]
#[grammar = "expr/grammar.pest"]
struct ExprParser;

lazy_static::lazy_static! {
    // Unary minus sits below `^` so `-x^2` reads as `-(x^2)`.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(
            Op::infix(Rule::mul, Assoc::Left)
                | Op::infix(Rule::div, Assoc::Left)
                | Op::infix(Rule::rem, Assoc::Left)
                | Op::infix(Rule::implicit_mul, Assoc::Left)
        )
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos))
        .op(Op::infix(Rule::pow, Assoc::Right))
        .op(Op::postfix(Rule::fact));
}

/// Deepest operator nesting accepted. Building and evaluating the tree recurse once per level.
const MAX_DEPTH: usize = 256;

const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("PI", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("E", std::f64::consts::E),
    ("tau", std::f64::consts::TAU),
    ("phi", 1.618_033_988_749_895),
];

pub(super) fn parse(source: &str) -> Result<Node, CompileError> {
    let mut pairs = ExprParser::parse(Rule::expression, source).map_err(syntax_error)?;
    let expr = pairs
        .next()
        .and_then(|expression| expression.into_inner().next())
        .ok_or_else(|| CompileError::Syntax {
            column: 1,
            message: "expected an expression".into(),
        })?;
    check_depth(&expr)?;
    build_expr(expr.into_inner())
}

fn is_operator(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::neg
            | Rule::pos
            | Rule::fact
            | Rule::add
            | Rule::sub
            | Rule::pow
            | Rule::mul
            | Rule::div
            | Rule::rem
            | Rule::implicit_mul
    )
}

// Upper bound on tree depth: every operator of a sub-expression plus one per
// parenthesis or call, walked with an explicit stack.
fn check_depth(expr: &Pair<Rule>) -> Result<(), CompileError> {
    let mut stack = vec![(expr.clone(), 0usize)];
    while let Some((pair, depth)) = stack.pop() {
        let depth = match pair.as_rule() {
            Rule::expr => depth + 1 + pair.clone().into_inner().filter(|p| is_operator(p.as_rule())).count(),
            Rule::call | Rule::paren => depth + 1,
            _ => depth,
        };
        if depth > MAX_DEPTH {
            return Err(CompileError::Syntax {
                column: pair.line_col().1,
                message: format!("expression nested too deeply (limit {MAX_DEPTH})"),
            });
        }
        stack.extend(pair.into_inner().map(|p| (p, depth)));
    }
    Ok(())
}

fn syntax_error(err: PestError<Rule>) -> CompileError {
    let column = match err.line_col {
        LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
    };
    let err = err.renamed_rules(|rule| match rule {
        Rule::EOI => "end of input".into(),
        Rule::number => "number".into(),
        Rule::ident => "name".into(),
        Rule::call => "function call".into(),
        Rule::paren => "'('".into(),
        Rule::neg | Rule::sub => "'-'".into(),
        Rule::pos | Rule::add => "'+'".into(),
        Rule::mul => "'*'".into(),
        Rule::div => "'/'".into(),
        Rule::rem => "'%'".into(),
        Rule::pow => "'^'".into(),
        Rule::fact => "'!'".into(),
        other => format!("{other:?}"),
    });
    CompileError::Syntax {
        column,
        message: err.variant.message().into_owned(),
    }
}

fn build_expr(pairs: Pairs<Rule>) -> Result<Node, CompileError> {
    PRATT_PARSER
        .map_primary(build_primary)
        .map_prefix(|op, operand| {
            let operand = operand?;
            match op.as_rule() {
                Rule::neg => Ok(Node::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                }),
                Rule::pos => Ok(operand),
                rule => Err(unexpected(rule, &op)),
            }
        })
        .map_postfix(|operand, op| match op.as_rule() {
            Rule::fact => Ok(Node::Unary {
                op: UnaryOp::Factorial,
                operand: Box::new(operand?),
            }),
            rule => Err(unexpected(rule, &op)),
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::sub => BinaryOp::Sub,
                Rule::mul | Rule::implicit_mul => BinaryOp::Mul,
                Rule::div => BinaryOp::Div,
                Rule::rem => BinaryOp::Rem,
                Rule::pow => BinaryOp::Pow,
                rule => return Err(unexpected(rule, &op)),
            };
            Ok(Node::Binary {
                op,
                lhs: Box::new(lhs?),
                rhs: Box::new(rhs?),
            })
        })
        .parse(pairs)
}

fn build_primary(pair: Pair<Rule>) -> Result<Node, CompileError> {
    match pair.as_rule() {
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map(Node::Number)
            .map_err(|e| CompileError::Syntax {
                column: pair.line_col().1,
                message: format!("invalid number '{}': {e}", pair.as_str()),
            }),
        Rule::ident => build_ident(pair.as_str()),
        Rule::paren => match pair.into_inner().next() {
            Some(inner) => build_expr(inner.into_inner()),
            None => Err(CompileError::Syntax {
                column: 1,
                message: "empty parentheses".into(),
            }),
        },
        Rule::call => build_call(pair),
        rule => Err(unexpected(rule, &pair)),
    }
}

fn build_ident(name: &str) -> Result<Node, CompileError> {
    if let Some((_, value)) = CONSTANTS.iter().find(|(n, _)| *n == name) {
        return Ok(Node::Number(*value));
    }
    if Function::from_str(name).is_ok() {
        return Err(CompileError::BareFunction(name.to_string()));
    }
    Ok(Node::Variable(name.to_string()))
}

fn build_call(pair: Pair<Rule>) -> Result<Node, CompileError> {
    let mut inner = pair.into_inner();
    let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();
    let func =
        Function::from_str(&name).map_err(|_| CompileError::UnknownFunction(name.clone()))?;
    let args = inner
        .map(|arg| build_expr(arg.into_inner()))
        .collect::<Result<Vec<_>, _>>()?;
    if !func.accepts(args.len()) {
        return Err(CompileError::Arity {
            name,
            expected: func.describe_arity(),
            found: args.len(),
        });
    }
    Ok(Node::Call { func, args })
}

fn unexpected(rule: Rule, pair: &Pair<Rule>) -> CompileError {
    CompileError::Syntax {
        column: pair.line_col().1,
        message: format!("unexpected {rule:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalFault;
    use crate::expr::Variables;
    use approx::assert_relative_eq;

    fn eval(src: &str, vars: &Variables) -> Result<f64, EvalFault> {
        parse(src).expect("parses").eval(vars)
    }

    fn eval0(src: &str) -> f64 {
        eval(src, &Variables::new()).expect("evaluates")
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval0("1 + 2 * 3"), 7.0);
        assert_eq!(eval0("(1 + 2) * 3"), 9.0);
        assert_eq!(eval0("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(eval0("-2 ^ 2"), -4.0);
        assert_eq!(eval0("2 ^ -1"), 0.5);
        assert_eq!(eval0("10 - 4 - 3"), 3.0);
        assert_eq!(eval0("2 ** 3"), 8.0);
        assert_eq!(eval0("-3!"), -6.0);
        assert_eq!(eval0("7 % 4"), 3.0);
        assert_eq!(eval0("+5"), 5.0);
    }

    #[test]
    fn implicit_multiplication() {
        let vars = Variables::new().with("x", 3.0);
        assert_eq!(eval("2x", &vars), Ok(6.0));
        assert_eq!(eval("2x^2", &vars), Ok(18.0));
        assert_eq!(eval("3(x + 1)", &vars), Ok(12.0));
        assert_eq!(eval("(x - 1)(x + 1)", &vars), Ok(8.0));
    }

    #[test]
    fn numbers_and_constants() {
        assert_eq!(eval0("1.5e2"), 150.0);
        assert_eq!(eval0(".25"), 0.25);
        assert_relative_eq!(eval0("pi"), std::f64::consts::PI);
        assert_relative_eq!(eval0("2e"), 2.0 * std::f64::consts::E);
        assert_relative_eq!(eval0("tau / 2"), std::f64::consts::PI);
    }

    #[test]
    fn function_calls() {
        assert_relative_eq!(eval0("sin(pi / 2)"), 1.0);
        assert_relative_eq!(eval0("log(100, 10)"), 2.0, epsilon = 1e-12);
        assert_relative_eq!(eval0("log(e)"), 1.0);
        assert_eq!(eval0("max(1, 7, 3)"), 7.0);
        assert_eq!(eval0("hypot(3, 4)"), 5.0);
        assert_eq!(eval0("abs(-2) + sqrt(16)"), 6.0);
    }

    #[test]
    fn compile_faults() {
        assert!(matches!(parse("sin(x"), Err(CompileError::Syntax { .. })));
        assert!(matches!(parse("1 +"), Err(CompileError::Syntax { .. })));
        assert!(matches!(parse("2 3"), Err(CompileError::Syntax { .. })));
        assert_eq!(parse("foo(1)"), Err(CompileError::UnknownFunction("foo".into())));
        assert_eq!(parse("sin + 1"), Err(CompileError::BareFunction("sin".into())));
        assert!(matches!(parse("atan2(1)"), Err(CompileError::Arity { found: 1, .. })));
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        for src in [
            format!("{}x", "-".repeat(10_000)),
            format!("{}x", "-".repeat(200_000)),
            format!("x{}", "!".repeat(10_000)),
            vec!["2"; 10_000].join("^"),
            format!("{}x{}", "sin(".repeat(300), ")".repeat(300)),
        ] {
            match parse(&src) {
                Err(CompileError::Syntax { message, .. }) => assert!(message.contains("nested too deeply"), "{message}"),
                other => panic!("expected a depth error, got {other:?}"),
            }
        }
    }

    #[test]
    fn moderate_nesting_still_parses() {
        assert_eq!(eval0(&format!("{}1", "-".repeat(100))), 1.0);
        assert_eq!(eval0(&format!("{}1{}", "(".repeat(50), ")".repeat(50))), 1.0);
        assert_eq!(eval0(&vec!["1"; 100].join(" + ")), 100.0);
    }

    #[test]
    fn evaluation_faults() {
        let vars = Variables::new().with("x", 0.0);
        assert_eq!(eval("1 / x", &vars), Err(EvalFault::DivisionByZero));
        assert_eq!(eval("y + 1", &vars), Err(EvalFault::UndefinedVariable("y".into())));
        assert!(matches!(eval("sqrt(x - 1)", &vars), Err(EvalFault::Domain { function: "sqrt", .. })));
        assert_eq!(eval("log(x)", &vars), Ok(f64::NEG_INFINITY));
        assert_eq!(eval("exp(1000)", &vars), Ok(f64::INFINITY));
    }
}
