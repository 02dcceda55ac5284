use std::fmt;
use std::fmt::{Display, Formatter, Write};

pub const GRID_SIZE: usize = 32;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A 32x32 binary bitmap.
///
/// Each row is stored as one `u32` with column 0 in the most significant bit,
/// which is also the order the packed export uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitGrid {
    rows: [u32; GRID_SIZE],
}

impl BitGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_row_bits(rows: [u32; GRID_SIZE]) -> Self {
        Self { rows }
    }

    /// Builds a grid row-major from exactly [`CELL_COUNT`] cells.
    ///
    /// Returns `None` when the iterator yields fewer or more cells.
    pub fn from_cells(cells: impl IntoIterator<Item = bool>) -> Option<Self> {
        let mut grid = Self::new();
        let mut count = 0;
        for cell in cells {
            if count == CELL_COUNT {
                return None;
            }
            grid.set(count / GRID_SIZE, count % GRID_SIZE, cell);
            count += 1;
        }
        (count == CELL_COUNT).then_some(grid)
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..32`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        Self::check(row, col);
        self.rows[row] & Self::mask(col) != 0
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..32`.
    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        Self::check(row, col);
        if on {
            self.rows[row] |= Self::mask(col);
        } else {
            self.rows[row] &= !Self::mask(col);
        }
    }

    pub fn row_bits(&self, row: usize) -> u32 {
        self.rows[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().copied()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        (0..CELL_COUNT).map(|i| self.get(i / GRID_SIZE, i % GRID_SIZE))
    }

    pub fn count_ones(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    pub fn is_clear(&self) -> bool {
        self.rows.iter().all(|row| *row == 0)
    }

    fn mask(col: usize) -> u32 {
        1 << (GRID_SIZE - 1 - col)
    }

    fn check(row: usize, col: usize) {
        assert!(
            row < GRID_SIZE && col < GRID_SIZE,
            "cell ({row}, {col}) is outside the {GRID_SIZE}x{GRID_SIZE} grid"
        );
    }
}

impl Display for BitGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                f.write_char(if self.get(row, col) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn new_grid_is_clear() {
        let grid = BitGrid::new();
        assert!(grid.is_clear());
        assert_eq!(grid.count_ones(), 0);
        assert!(grid.cells().all(|c| !c));
    }

    #[test]
    fn set_and_get() {
        let mut grid = BitGrid::new();
        grid.set(0, 0, true);
        grid.set(31, 31, true);
        grid.set(5, 17, true);
        assert!(grid.get(0, 0));
        assert!(grid.get(31, 31));
        assert!(grid.get(5, 17));
        assert!(!grid.get(17, 5));
        assert_eq!(grid.count_ones(), 3);

        grid.set(5, 17, false);
        assert!(!grid.get(5, 17));
        assert_eq!(grid.count_ones(), 2);
    }

    #[test]
    fn column_zero_is_most_significant_bit() {
        let mut grid = BitGrid::new();
        grid.set(3, 0, true);
        grid.set(3, 31, true);
        assert_eq!(grid.row_bits(3), 0x8000_0001);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_out_of_range_panics() {
        BitGrid::new().get(32, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn set_out_of_range_panics() {
        BitGrid::new().set(0, 32, true);
    }

    #[test]
    #[allow(clippy::clone_on_copy)]
    fn clone_is_independent() {
        let mut original = BitGrid::new();
        original.set(1, 1, true);
        let mut copy = original.clone();
        copy.set(1, 1, false);
        copy.set(2, 2, true);

        assert!(original.get(1, 1));
        assert!(!original.get(2, 2));
        assert_ne!(original, copy);
    }

    #[test]
    fn equality_is_cellwise() {
        let mut a = BitGrid::new();
        let mut b = BitGrid::new();
        assert_eq!(a, b);
        a.set(10, 20, true);
        assert_ne!(a, b);
        b.set(10, 20, true);
        assert_eq!(a, b);
    }

    #[test]
    fn from_cells_requires_exact_count() {
        assert_eq!(BitGrid::from_cells(vec![false; CELL_COUNT - 1]), None);
        assert_eq!(BitGrid::from_cells(vec![false; CELL_COUNT + 1]), None);

        let mut cells = vec![false; CELL_COUNT];
        cells[GRID_SIZE + 2] = true;
        let grid = BitGrid::from_cells(cells.clone()).unwrap();
        assert!(grid.get(1, 2));
        assert_eq!(grid.cells().collect::<Vec<_>>(), cells);
    }

    #[test]
    fn display_draws_rows() {
        let mut grid = BitGrid::new();
        grid.set(0, 1, true);
        let text = grid.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), GRID_SIZE);
        assert!(first.starts_with(".#.."));
        assert_eq!(text.lines().count(), GRID_SIZE);
    }

    proptest! {
        #[test]
        #[allow(clippy::clone_on_copy)]
        fn any_clone_is_independent(
            rows in prop::array::uniform32(any::<u32>()),
            row in 0..GRID_SIZE,
            col in 0..GRID_SIZE,
        ) {
            let original = BitGrid::from_row_bits(rows);
            let mut copy = original.clone();
            let was = original.get(row, col);
            copy.set(row, col, !was);

            prop_assert_eq!(original.get(row, col), was);
            prop_assert_eq!(original, BitGrid::from_row_bits(rows));
            prop_assert_ne!(copy, original);
        }

        #[test]
        fn cells_follow_row_bits(rows in prop::array::uniform32(any::<u32>())) {
            let grid = BitGrid::from_row_bits(rows);
            prop_assert_eq!(BitGrid::from_cells(grid.cells()), Some(grid));
            prop_assert_eq!(grid.count_ones(), rows.iter().map(|r| r.count_ones()).sum::<u32>());
        }
    }
}
