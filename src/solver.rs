//! End-to-end solve: expression strings in, probability out.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::eval::evaluate;
use crate::fill::{max_fill, saturation_row};
use crate::parser::parse_expression;
use crate::space::SampleSpace;
use crate::system::{check_tolerance, find_unknown, solve};

/// Numeric settings of a [`Solver`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolverConfig {
    tolerance: f64,
}

impl SolverConfig {
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;

    /// Sets the magnitude at or below which a matrix entry counts as zero,
    /// both when choosing pivots and when clearing the unknown's row.
    ///
    /// Fails with [`Error::InvalidTolerance`] for a negative or NaN value.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        self.tolerance = check_tolerance(tolerance)?;
        Ok(self)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

/// Infers the probability of the one expression given without `= p`.
///
/// Every call rebuilds the sample space, the coverage vectors and the linear
/// system from scratch; nothing is kept between calls. Cost grows as `2^n`
/// in the number of simple events (`3^n` for fill levels, and elimination is
/// cubic in `2^n`), so `n` should stay small.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve<S, E>(&self, events: &[S], expressions: &[E]) -> Result<f64>
    where
        S: AsRef<str>,
        E: AsRef<str>,
    {
        let space = SampleSpace::new(events)?;
        if expressions.is_empty() {
            return Err(Error::NoExpressions);
        }

        let exprs = expressions
            .iter()
            .map(|text| parse_expression(text.as_ref(), space.events()))
            .collect::<Result<Vec<_>>>()?;
        let probabilities: Vec<Option<f64>> = exprs.iter().map(|e| e.probability).collect();
        let unknown = find_unknown(&probabilities)?;
        debug!("unknown expression: #{} ({})", unknown, exprs[unknown]);

        let max = max_fill(space.cells(), space.num_events());
        let mut rows = Vec::with_capacity(exprs.len());
        for expr in &exprs {
            let evaluation = evaluate(expr, &space)?;
            let row = saturation_row(&max, space.cells(), &evaluation.coverage);
            debug!("saturation({}) = {}", expr, row);
            trace!(
                "saturated cells of {}: {}",
                expr,
                row.iter()
                    .map(|i| space.cells()[i].to_label_string(space.events()))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            rows.push(row);
        }

        let p = solve(space.num_cells(), &rows, &probabilities, self.config.tolerance())?;
        debug!("P({}) = {}", exprs[unknown], p);
        Ok(p)
    }
}

/// Solves with the default configuration.
///
/// ```
/// let p = probinfer::solve_unknown_probability(
///     &["A", "B", "C", "D"],
///     &[
///         "(A and C) or B and D",
///         "B and D = 0.6",
///         "A and C and D = 0.2",
///         "A and B and C and D = 0.1",
///     ],
/// )
/// .unwrap();
/// assert!((p - 0.7).abs() < 1e-12);
/// ```
pub fn solve_unknown_probability<S, E>(events: &[S], expressions: &[E]) -> Result<f64>
where
    S: AsRef<str>,
    E: AsRef<str>,
{
    Solver::default().solve(events, expressions)
}
