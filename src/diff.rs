use crate::bit_grid::{BitGrid, GRID_SIZE};
use std::collections::VecDeque;

/// Cells where `a` and `b` disagree.
pub fn diff(a: &BitGrid, b: &BitGrid) -> BitGrid {
    let mut rows = [0; GRID_SIZE];
    for (row, (x, y)) in rows.iter_mut().zip(a.rows().zip(b.rows())) {
        *row = x ^ y;
    }
    BitGrid::from_row_bits(rows)
}

/// The last two loaded grids, oldest first.
#[derive(Debug, Default, Clone)]
pub struct PasteHistory {
    entries: VecDeque<BitGrid>,
}

impl PasteHistory {
    pub const DEPTH: usize = 2;

    pub fn record_paste(&mut self, grid: &BitGrid) {
        self.entries.push_back(*grid);
        while self.entries.len() > Self::DEPTH {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Diff of the second-newest against the newest entry, if both exist.
    pub fn diff_last_two(&self) -> Option<BitGrid> {
        let n = self.entries.len();
        if n < 2 {
            return None;
        }
        Some(diff(&self.entries[n - 2], &self.entries[n - 1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn with_cells(cells: &[(usize, usize)]) -> BitGrid {
        let mut grid = BitGrid::new();
        for (row, col) in cells {
            grid.set(*row, *col, true);
        }
        grid
    }

    #[test]
    fn diff_marks_disagreeing_cells() {
        let a = with_cells(&[(0, 0), (1, 1), (31, 31)]);
        let b = with_cells(&[(1, 1), (2, 2)]);
        assert_eq!(diff(&a, &b), with_cells(&[(0, 0), (2, 2), (31, 31)]));
    }

    #[test]
    fn diff_is_symmetric() {
        let a = with_cells(&[(3, 4), (5, 6), (7, 8)]);
        let b = with_cells(&[(5, 6), (9, 10)]);
        assert_eq!(diff(&a, &b), diff(&b, &a));
    }

    #[test]
    fn diff_with_self_is_clear() {
        let a = with_cells(&[(3, 4), (5, 6), (7, 8)]);
        assert!(diff(&a, &a).is_clear());
    }

    #[test]
    fn history_needs_two_entries() {
        let mut history = PasteHistory::default();
        assert_eq!(history.diff_last_two(), None);
        history.record_paste(&with_cells(&[(0, 0)]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.diff_last_two(), None);
        history.record_paste(&with_cells(&[(0, 1)]));
        assert_eq!(history.diff_last_two(), Some(with_cells(&[(0, 0), (0, 1)])));
    }

    #[test]
    fn history_evicts_oldest() {
        let g1 = with_cells(&[(0, 0)]);
        let g2 = with_cells(&[(1, 1)]);
        let g3 = with_cells(&[(1, 1), (2, 2)]);
        let mut history = PasteHistory::default();
        history.record_paste(&g1);
        history.record_paste(&g2);
        history.record_paste(&g3);

        assert_eq!(history.len(), PasteHistory::DEPTH);
        assert_eq!(history.diff_last_two(), Some(diff(&g2, &g3)));
    }

    #[test]
    fn history_keeps_its_own_copies() {
        let mut grid = with_cells(&[(4, 4)]);
        let mut history = PasteHistory::default();
        history.record_paste(&grid);
        grid.set(4, 4, false);
        history.record_paste(&grid);
        assert_eq!(history.diff_last_two(), Some(with_cells(&[(4, 4)])));
    }

    fn grids() -> impl Strategy<Value = BitGrid> {
        prop::array::uniform32(any::<u32>()).prop_map(BitGrid::from_row_bits)
    }

    proptest! {
        #[test]
        fn xor_is_symmetric_for_any_grids(a in grids(), b in grids()) {
            prop_assert_eq!(diff(&a, &b), diff(&b, &a));
            prop_assert!(diff(&a, &a).is_clear());
        }

        #[test]
        fn xor_marks_exactly_the_differing_cells(a in grids(), b in grids()) {
            let d = diff(&a, &b);
            for (i, ((x, y), z)) in a.cells().zip(b.cells()).zip(d.cells()).enumerate() {
                prop_assert_eq!(z, x != y, "cell {}", i);
            }
        }

        #[test]
        fn history_diffs_last_two_of_any_sequence(seq in prop::collection::vec(grids(), 2..6)) {
            let mut history = PasteHistory::default();
            for grid in &seq {
                history.record_paste(grid);
            }
            let n = seq.len();
            prop_assert_eq!(history.len(), PasteHistory::DEPTH);
            prop_assert_eq!(history.diff_last_two(), Some(diff(&seq[n - 2], &seq[n - 1])));
        }
    }
}
