//! # probinfer: inferring an unknown event probability
//!
//! **`probinfer`** takes a finite list of simple events and a handful of
//! compound events built from them with `and`, `or` and parentheses. Every
//! compound event but one comes with a known probability; the library works
//! out the probability of the remaining one from the axioms of probability,
//! or reports that the known values do not determine it.
//!
//! ## How it works
//!
//! The sample space over `n` simple events is split into `2^n` **cells**,
//! one per subset of the events. Each expression selects a set of cells and
//! thereby becomes a linear equation over cell probabilities. Together with
//! the normalization constraint (all cells sum to one) the known equations
//! are reduced by Gaussian elimination, and the unknown expression's
//! equation is solved against them.
//!
//! ## Expression syntax
//!
//! ```text
//! (A and C) or B and D          unknown
//! B and D = 0.6                 known
//! ```
//!
//! There is no precedence between `and` and `or`: a chain is evaluated
//! strictly left to right, so the first line means `((A and C) or B) and D`.
//! Use parentheses to group differently.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probinfer::solve_unknown_probability;
//!
//! let p = solve_unknown_probability(
//!     &["A", "B"],
//!     &["A or B", "A = 0.5", "B = 0.4", "A and B = 0.2"],
//! )?;
//! assert!((p - 0.7).abs() < 1e-12);
//! # Ok::<(), probinfer::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`lexer`]** and **[`parser`]**: the expression mini-language, producing [`ast::Expression`].
//! - **[`cell`]** and **[`space`]**: cells of the sample space and the cells each simple event covers.
//! - **[`eval`]**: coverage vectors of expressions.
//! - **[`fill`]**: fill levels and saturation rows.
//! - **[`system`]**: the linear system and its solution.
//! - **[`solver`]**: the whole pipeline behind [`Solver`] and [`solve_unknown_probability`].
//!
//! The library logs through the [`log`] facade and never installs a logger.

pub mod ast;
pub mod bitset;
pub mod cell;
pub mod error;
pub mod eval;
pub mod fill;
pub mod lexer;
pub mod parser;
pub mod solver;
pub mod space;
pub mod system;

pub use crate::error::{Error, Result};
pub use crate::solver::{solve_unknown_probability, Solver, SolverConfig};
