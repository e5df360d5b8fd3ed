//! Linear system over cell probabilities.
//!
//! Columns `0..num_cells` hold the coefficient of each cell's probability
//! and the last column holds the equation's constant. Row 0 is always the
//! normalization constraint: all cells together have probability one. Every
//! known expression adds the row `saturation | probability`.
//!
//! The known rows are brought to reduced row-echelon form, then the unknown
//! expression's row is cleared column by column against the pivot rows. If
//! that succeeds, what is left in the constant column is minus the unknown
//! probability.

use log::{debug, trace};

use crate::bitset::BitSet;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct LinearSystem {
    rows: Vec<Vec<f64>>,
    num_cells: usize,
    /// Entries with magnitude at most this count as zero, both in `reduce`
    /// and in `solve_for`.
    tolerance: f64,
    /// Pivot column of each leading row, set by `reduce`.
    pivots: Option<Vec<usize>>,
}

impl LinearSystem {
    /// Creates a system holding only the normalization row.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is negative or NaN.
    pub fn new(num_cells: usize, tolerance: f64) -> Self {
        assert!(tolerance >= 0.0, "Tolerance should be non-negative");
        Self {
            rows: vec![vec![1.0; num_cells + 1]],
            num_cells,
            tolerance,
            pivots: None,
        }
    }

    /// Builds the system from known saturation rows and their probabilities.
    pub fn with_equations<'a>(
        num_cells: usize,
        tolerance: f64,
        equations: impl IntoIterator<Item = (&'a BitSet, f64)>,
    ) -> Self {
        let mut system = Self::new(num_cells, tolerance);
        for (coefficients, constant) in equations {
            system.push_equation(coefficients, constant);
        }
        system
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn num_cols(&self) -> usize {
        self.num_cells + 1
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn pivots(&self) -> Option<&[usize]> {
        self.pivots.as_deref()
    }

    /// Adds the equation `sum(coefficients[i] * p_i) = constant`.
    ///
    /// # Panics
    ///
    /// Panics if the coefficient vector does not have one bit per cell.
    pub fn push_equation(&mut self, coefficients: &BitSet, constant: f64) {
        assert_eq!(coefficients.len(), self.num_cells, "Equation should have one coefficient per cell");
        let mut row = coefficients.to_coefficients();
        row.push(constant);
        self.rows.push(row);
        self.pivots = None;
    }

    /// Reduces the rows to reduced row-echelon form in place and returns the
    /// pivot column of each leading row.
    ///
    /// Entries with magnitude at most the system's tolerance are not pivot
    /// candidates.
    pub fn reduce(&mut self) -> &[usize] {
        let tolerance = self.tolerance;
        let num_rows = self.rows.len();
        let num_cols = self.num_cols();
        let mut pivots = Vec::new();
        let mut pivot_row = 0;

        for j in 0..num_cols {
            if pivot_row == num_rows {
                break;
            }
            let Some(i) = (pivot_row..num_rows).find(|&i| self.rows[i][j].abs() > tolerance) else {
                continue;
            };

            let current = self.rows[i][j];
            for x in self.rows[i].iter_mut() {
                *x /= current;
            }
            self.rows.swap(pivot_row, i);

            let pivot = self.rows[pivot_row].clone();
            for (r, row) in self.rows.iter_mut().enumerate() {
                if r == pivot_row {
                    continue;
                }
                let factor = row[j] / pivot[j];
                for (x, p) in row.iter_mut().zip(&pivot) {
                    *x -= factor * p;
                }
            }

            trace!("pivot at row {}, column {}", pivot_row, j);
            pivots.push(j);
            pivot_row += 1;
        }

        debug!("reduced {} rows, pivots = {:?}", num_rows, pivots);
        self.pivots.insert(pivots)
    }

    /// Solves for the probability of the expression with saturation row
    /// `target`, reducing the system first if needed.
    ///
    /// Fails with [`Error::Underdetermined`] when some cell of `target` has
    /// no pivot row to clear it (the known equations do not pin the value
    /// down), or when the known equations contradict each other.
    pub fn solve_for(&mut self, target: &BitSet) -> Result<f64> {
        assert_eq!(target.len(), self.num_cells, "Target should have one coefficient per cell");

        if self.pivots.is_none() {
            self.reduce();
        }
        let tolerance = self.tolerance;
        let pivots = self.pivots.as_deref().unwrap_or_default();
        let constant_col = self.num_cells;

        // A pivot in the constant column is a row `0 = 1`.
        if pivots.last() == Some(&constant_col) {
            debug!("known equations are inconsistent");
            return Err(Error::Underdetermined);
        }

        let mut unknown = target.to_coefficients();
        unknown.push(0.0);

        for i in 0..self.num_cells {
            let factor = unknown[i];
            if factor.abs() <= tolerance {
                continue;
            }
            let Some(p) = pivots.iter().position(|&c| c == i) else {
                debug!("no pivot for cell column {}", i);
                return Err(Error::Underdetermined);
            };
            for (x, v) in unknown.iter_mut().zip(&self.rows[p]) {
                *x -= factor * v;
            }
        }

        Ok(-unknown[constant_col])
    }
}

/// Solves for the single expression whose probability is `None`.
///
/// `rows[k]` is the saturation row of expression `k` and `probabilities[k]`
/// its known probability.
pub fn solve(num_cells: usize, rows: &[BitSet], probabilities: &[Option<f64>], tolerance: f64) -> Result<f64> {
    assert_eq!(rows.len(), probabilities.len());

    let tolerance = check_tolerance(tolerance)?;
    let unknown = find_unknown(probabilities)?;
    let known = rows
        .iter()
        .zip(probabilities)
        .filter_map(|(row, p)| p.map(|p| (row, p)));
    let mut system = LinearSystem::with_equations(num_cells, tolerance, known);
    system.solve_for(&rows[unknown])
}

/// Accepts a zero-test tolerance only if it is a non-negative number.
pub fn check_tolerance(tolerance: f64) -> Result<f64> {
    if tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(Error::InvalidTolerance(tolerance))
    }
}

/// Index of the only absent probability.
pub fn find_unknown(probabilities: &[Option<f64>]) -> Result<usize> {
    let mut unknowns = probabilities
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_none())
        .map(|(i, _)| i);
    let first = unknowns.next().ok_or(Error::MissingUnknown)?;
    if let Some(second) = unknowns.next() {
        return Err(Error::MultipleUnknowns { first, second });
    }
    Ok(first)
}
