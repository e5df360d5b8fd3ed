//! Fill levels of cells under an expression's coverage.
//!
//! A cell `c` with `k` of the `n` simple events has `2^(n-k)` refinements:
//! the cells that contain `c`, one for each choice of the remaining events.
//! That is its maximum fill. An expression fills `c` by one for every
//! selected cell that contains it, and saturates `c` when all of its
//! refinements are selected. The saturation flags are the coefficients of
//! the expression's equation in the linear system.

use crate::bitset::BitSet;
use crate::cell::Cell;

/// Maximum fill level of every cell: `2^(n - |cell|)`.
pub fn max_fill(cells: &[Cell], num_events: usize) -> Vec<u64> {
    cells
        .iter()
        .map(|cell| {
            assert!(cell.len() <= num_events, "Cell {} has more than {} events", cell, num_events);
            1u64 << (num_events - cell.len())
        })
        .collect()
}

/// Actual fill level of every cell under `coverage`.
///
/// Each selected cell adds one to itself and to every cell whose event set
/// is a subset of it, never exceeding that cell's maximum fill.
pub fn actual_fill(max_fill: &[u64], cells: &[Cell], coverage: &BitSet) -> Vec<u64> {
    assert_eq!(max_fill.len(), cells.len());
    assert_eq!(coverage.len(), cells.len());

    let mut fill = vec![0u64; cells.len()];
    for i in coverage.iter() {
        for sub in cells[i].subsets() {
            let j = sub.index();
            if fill[j] < max_fill[j] {
                fill[j] += 1;
            }
        }
    }
    fill
}

/// Saturation flags: bit `j` is set iff `actual[j] == max[j]`.
pub fn saturation(actual_fill: &[u64], max_fill: &[u64]) -> BitSet {
    assert_eq!(actual_fill.len(), max_fill.len());
    BitSet::from_bools(actual_fill.iter().zip(max_fill).map(|(a, m)| a == m))
}

/// Saturation row of one coverage vector.
pub fn saturation_row(max_fill: &[u64], cells: &[Cell], coverage: &BitSet) -> BitSet {
    saturation(&actual_fill(max_fill, cells, coverage), max_fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::eval::evaluate;
    use crate::parser::parse_expression;
    use crate::space::SampleSpace;

    fn row(space: &SampleSpace, text: &str) -> BitSet {
        let expr = parse_expression(text, space.events()).unwrap();
        let coverage = evaluate(&expr, space).unwrap().coverage;
        let max = max_fill(space.cells(), space.num_events());
        saturation_row(&max, space.cells(), &coverage)
    }

    #[test]
    fn test_max_fill() {
        let space = SampleSpace::new(&["A", "B"]).unwrap();
        // Cells: {}, {A}, {B}, {A, B}
        assert_eq!(max_fill(space.cells(), 2), vec![4, 2, 2, 1]);
    }

    #[test]
    fn test_actual_fill_single_event() {
        let space = SampleSpace::new(&["A", "B"]).unwrap();
        let max = max_fill(space.cells(), 2);
        let coverage = space.indicator("A").unwrap();
        // {A} and {A, B} are selected; the empty cell and {B} only partly.
        assert_eq!(actual_fill(&max, space.cells(), coverage), vec![2, 2, 1, 1]);
        assert_eq!(saturation(&actual_fill(&max, space.cells(), coverage), &max).to_indicators(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_actual_fill_never_exceeds_max() {
        let space = SampleSpace::new(&["A", "B", "C"]).unwrap();
        let max = max_fill(space.cells(), 3);
        let all = BitSet::ones(space.num_cells());
        let fill = actual_fill(&max, space.cells(), &all);
        assert_eq!(fill, max);
        assert_eq!(saturation(&fill, &max), all);
    }

    #[test]
    fn test_actual_fill_matches_subset_scan() {
        let space = SampleSpace::new(&["A", "B", "C"]).unwrap();
        let max = max_fill(space.cells(), 3);
        let expr = parse_expression("A or B and C", space.events()).unwrap();
        let coverage = evaluate(&expr, &space).unwrap().coverage;

        let mut expected = vec![0u64; space.num_cells()];
        for i in coverage.iter() {
            for (j, cell) in space.cells().iter().enumerate() {
                if cell.is_subset_of(space.cells()[i]) && expected[j] < max[j] {
                    expected[j] += 1;
                }
            }
        }
        assert_eq!(actual_fill(&max, space.cells(), &coverage), expected);
    }

    #[test]
    fn test_saturation_rows() {
        let space = SampleSpace::new(&["A", "B", "C", "D"]).unwrap();
        assert_eq!(row(&space, "B and D").to_string(), "0000000000110011");
        assert_eq!(row(&space, "A and C and D").to_string(), "0000000000000101");
        assert_eq!(row(&space, "A and B and C and D").to_string(), "0000000000000001");
        assert_eq!(row(&space, "(A and C) or B and D").to_string(), "0000000000110111");
    }

    #[test]
    fn test_saturation_is_binary() {
        let space = SampleSpace::new(&["A", "B", "C"]).unwrap();
        for text in ["A", "A or B", "A and (B or C)", "C or A and B"] {
            let flags = row(&space, text).to_indicators();
            assert_eq!(flags.len(), 8);
            assert!(flags.iter().all(|&x| x <= 1));
        }
    }
}
