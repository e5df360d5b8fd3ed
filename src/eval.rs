use std::borrow::Cow;

use log::debug;

use crate::ast::{Chain, Expression, Op, Operand};
use crate::bitset::BitSet;
use crate::error::Result;
use crate::space::SampleSpace;

/// Something that selects a set of cells of a sample space.
pub trait Eval {
    fn eval(&self, space: &SampleSpace) -> Result<BitSet>;
}

impl SampleSpace {
    /// Coverage vector of `value`: bit `i` is set iff cell `i` is selected.
    pub fn eval(&self, value: &impl Eval) -> Result<BitSet> {
        value.eval(self)
    }
}

impl Eval for Chain {
    /// Folds the operands left to right into an initially empty coverage,
    /// OR-ing or AND-ing each according to the connective before it.
    fn eval(&self, space: &SampleSpace) -> Result<BitSet> {
        let mut coverage = BitSet::zeros(space.num_cells());
        for (op, operand) in self.steps() {
            let rhs = match operand {
                Operand::Event(label) => Cow::Borrowed(space.indicator(label)?),
                Operand::Group(chain) => Cow::Owned(chain.eval(space)?),
            };
            match op {
                Op::Or => coverage.union_with(&rhs),
                Op::And => coverage.intersect_with(&rhs),
            }
        }
        Ok(coverage)
    }
}

impl Eval for Expression {
    fn eval(&self, space: &SampleSpace) -> Result<BitSet> {
        self.chain.eval(space)
    }
}

/// Result of evaluating one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub coverage: BitSet,
    pub probability: Option<f64>,
}

/// Evaluates `expr` into its coverage vector, carrying its known probability.
pub fn evaluate(expr: &Expression, space: &SampleSpace) -> Result<Evaluation> {
    let coverage = space.eval(expr)?;
    debug!("eval({}) -> {}", expr, coverage);
    Ok(Evaluation {
        coverage,
        probability: expr.probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::Error;
    use crate::parser::parse_expression;

    const EVENTS: [&str; 4] = ["A", "B", "C", "D"];

    fn coverage(space: &SampleSpace, text: &str) -> BitSet {
        let expr = parse_expression(text, space.events()).unwrap();
        evaluate(&expr, space).unwrap().coverage
    }

    /// Cells selected by a predicate over event membership, for comparison.
    fn select(space: &SampleSpace, pred: impl Fn(&dyn Fn(&str) -> bool) -> bool) -> BitSet {
        BitSet::from_bools(space.cells().iter().map(|cell| {
            let has = |label: &str| cell.contains(space.event_index(label).unwrap());
            pred(&has)
        }))
    }

    #[test]
    fn test_eval_event() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        assert_eq!(coverage(&space, "A"), *space.indicator("A").unwrap());
    }

    #[test]
    fn test_eval_idempotent() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        let a = coverage(&space, "A");
        assert_eq!(coverage(&space, "A or A"), a);
        assert_eq!(coverage(&space, "A and A"), a);
        assert_eq!(coverage(&space, "(A)"), a);
    }

    #[test]
    fn test_eval_and_or() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        assert_eq!(coverage(&space, "A and B"), select(&space, |has| has("A") && has("B")));
        assert_eq!(coverage(&space, "A or B"), select(&space, |has| has("A") || has("B")));
    }

    #[test]
    fn test_eval_left_to_right() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        assert_eq!(
            coverage(&space, "A or B and C"),
            select(&space, |has| (has("A") || has("B")) && has("C"))
        );
        assert_eq!(
            coverage(&space, "(A and C) or B and D"),
            select(&space, |has| ((has("A") && has("C")) || has("B")) && has("D"))
        );
        assert_eq!(
            coverage(&space, "A or (B and C)"),
            select(&space, |has| has("A") || (has("B") && has("C")))
        );
    }

    #[test]
    fn test_eval_carries_probability() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        let expr = parse_expression("B and D = 0.6", space.events()).unwrap();
        let result = evaluate(&expr, &space).unwrap();
        assert_eq!(result.probability, Some(0.6));
        assert_eq!(result.coverage.count_ones(), 4);

        let expr = parse_expression("B and D", space.events()).unwrap();
        assert_eq!(evaluate(&expr, &space).unwrap().probability, None);
    }

    #[test]
    fn test_eval_coverage_is_binary() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        let cov = coverage(&space, "(A or B) and (C or D)");
        assert!(cov.to_indicators().iter().all(|&x| x == 0 || x == 1));
        assert_eq!(cov.len(), 16);
    }

    #[test]
    fn test_eval_unknown_label_in_handmade_ast() {
        let space = SampleSpace::new(&EVENTS).unwrap();
        let expr = Expression::new(Chain::new(Operand::event("Z")), None);
        assert_eq!(evaluate(&expr, &space).unwrap_err(), Error::UnknownEvent("Z".to_string()));
    }
}
