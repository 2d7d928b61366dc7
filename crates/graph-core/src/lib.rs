// File: crates/graph-core/src/lib.rs
// Summary: Core library entry point; exports the expression evaluator, field model and mode sampler.

pub mod error;
pub mod expr;
pub mod fields;
pub mod grid;
pub mod mode;
pub mod render;
pub mod result;
pub mod sampler;

pub use error::{CompileError, EvalFault, FieldError, ParseError};
pub use expr::{CompiledExpression, Expression, ExpressionCompiler, MathCompiler, Variables};
pub use fields::{ExpressionSlot, FieldModel};
pub use grid::{Range, SamplingOptions};
pub use mode::{PlotMode, SlotTemplate};
pub use render::Renderer;
pub use result::{PlotData, PlotResult, RenderKind, SampleCurve, SampleGrid};
pub use sampler::{sample, PlotSampler, SlotTexts};
