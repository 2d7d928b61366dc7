// File: crates/graph-core/src/sampler.rs
// Summary: Mode sampler; compiles slot expressions and evaluates them over fixed-step domains.
// Notes:
// - Compile failures reject the whole request. Per-point evaluation faults become `None`.
// - Sampling is a pure function of (mode, slot texts, options).

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::error::{CompileError, EvalFault, ParseError};
use crate::expr::{CompiledExpression, ExpressionCompiler, MathCompiler, Variables};
use crate::grid::{Range, SamplingOptions};
use crate::mode::PlotMode;
use crate::result::{PlotData, PlotResult, SampleCurve, SampleGrid};

pub const PARAMETRIC_TITLE: &str = "Parametric curve: x(t), y(t), z(t)";

/// Current text of each expression slot, keyed by slot identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotTexts(BTreeMap<String, String>);

impl SlotTexts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default texts for every slot of `mode`.
    pub fn defaults(mode: PlotMode) -> Self {
        mode.slots().iter().map(|s| (s.id, s.default)).collect()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.0.insert(id.into(), text.into());
    }

    pub fn with(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SlotTexts {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Samples plot expressions with a pluggable compiler and configurable ranges.
#[derive(Clone, Debug, Default)]
pub struct PlotSampler<C = MathCompiler> {
    compiler: C,
    options: SamplingOptions,
}

impl PlotSampler<MathCompiler> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ExpressionCompiler> PlotSampler<C> {
    pub fn with_compiler(compiler: C) -> Self {
        Self {
            compiler,
            options: SamplingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SamplingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SamplingOptions {
        &self.options
    }

    /// Produce a [`PlotResult`] for `mode` from the given slot texts.
    pub fn sample(&self, mode: PlotMode, texts: &SlotTexts) -> Result<PlotResult, ParseError> {
        let compiled = self.compile_slots(mode, texts)?;
        let range = self.options.range(mode);
        range
            .validate_for(mode)
            .map_err(|reason| ParseError::InvalidRange { mode, reason })?;

        // compile_slots yields one entry per slot template, in template order.
        let missing = || ParseError::MissingSlot {
            slot: mode.slots().get(compiled.len()).map_or("", |s| s.id).to_string(),
        };
        let data = match mode {
            PlotMode::Explicit => {
                let [(_, f)] = compiled.as_slice() else { return Err(missing()) };
                PlotData::Surface(sample_grid(f.as_ref(), range, |v| v.is_finite()))
            }
            PlotMode::Implicit => {
                let [(_, f)] = compiled.as_slice() else { return Err(missing()) };
                PlotData::Contour(sample_grid(f.as_ref(), range, |_| true))
            }
            PlotMode::Parametric => {
                let [(_, fx), (_, fy), (_, fz)] = compiled.as_slice() else { return Err(missing()) };
                PlotData::Line3d(sample_parametric([fx.as_ref(), fy.as_ref(), fz.as_ref()], range))
            }
            PlotMode::Polar => {
                let [(_, r)] = compiled.as_slice() else { return Err(missing()) };
                PlotData::Line3d(sample_polar(r.as_ref(), range))
            }
        };
        let src = compiled.first().map_or("", |(src, _)| src.as_str());
        let title = match mode {
            PlotMode::Explicit => format!("z = {src}"),
            PlotMode::Implicit => format!("F(x, y) = 0: {src}"),
            PlotMode::Parametric => PARAMETRIC_TITLE.to_string(),
            PlotMode::Polar => format!("Polar function: r(θ) = {src}"),
        };
        let result = PlotResult { title, mode, data };

        let (total, nulls) = (result.sample_count(), result.null_count());
        debug!("sampled {mode}: {total} samples, {nulls} missing");
        if total > 0 && nulls == total {
            warn!("every sample of '{}' failed to evaluate", result.title);
        }
        Ok(result)
    }

    fn compile_slots(
        &self,
        mode: PlotMode,
        texts: &SlotTexts,
    ) -> Result<Vec<(String, Box<dyn CompiledExpression>)>, ParseError> {
        mode.slots()
            .iter()
            .map(|slot| {
                let text = texts.get(slot.id).ok_or_else(|| ParseError::MissingSlot {
                    slot: slot.id.to_string(),
                })?;
                let compiled = if text.trim().is_empty() {
                    Err(CompileError::Empty)
                } else {
                    self.compiler.compile(text)
                }
                .map_err(|source| ParseError::Compile {
                    slot: slot.id.to_string(),
                    source,
                })?;
                if let Some(names) = compiled.free_variables() {
                    let unbound = mode.unbound_variables(&names);
                    if !unbound.is_empty() {
                        warn!(
                            "{}: {} not defined in {mode} mode (available: {})",
                            slot.id,
                            unbound.join(", "),
                            mode.variables().join(", ")
                        );
                    }
                }
                Ok((text.trim().to_string(), compiled))
            })
            .collect()
    }
}

/// Sample `mode` with the built-in compiler and default ranges.
pub fn sample(mode: PlotMode, texts: &SlotTexts) -> Result<PlotResult, ParseError> {
    PlotSampler::new().sample(mode, texts)
}

fn sample_grid(f: &dyn CompiledExpression, range: Range, keep: impl Fn(f64) -> bool) -> SampleGrid {
    let axis = range.values();
    let mut vars = Variables::new();
    let mut values = Vec::with_capacity(axis.len());
    for &x in &axis {
        let mut row = Vec::with_capacity(axis.len());
        for &y in &axis {
            vars.set("x", x);
            vars.set("y", y);
            row.push(f.evaluate(&vars).ok().filter(|v| keep(*v)));
        }
        values.push(row);
    }
    SampleGrid {
        x: axis.clone(),
        y: axis,
        values,
    }
}

fn sample_parametric(f: [&dyn CompiledExpression; 3], range: Range) -> SampleCurve {
    let params = range.values();
    let mut curve = SampleCurve::with_capacity(params.len());
    let mut vars = Variables::new();
    for t in params {
        vars.set("t", t);
        let point = (|| -> Result<[f64; 3], EvalFault> {
            Ok([f[0].evaluate(&vars)?, f[1].evaluate(&vars)?, f[2].evaluate(&vars)?])
        })();
        curve.push(t, point.ok());
    }
    curve
}

fn sample_polar(r: &dyn CompiledExpression, range: Range) -> SampleCurve {
    let params = range.values();
    let mut curve = SampleCurve::with_capacity(params.len());
    let mut vars = Variables::new();
    for theta in params {
        vars.set("theta", theta);
        let point = r
            .evaluate(&vars)
            .map(|radius| [radius * theta.cos(), radius * theta.sin(), theta]);
        curve.push(theta, point.ok());
    }
    curve
}
