use rand::Rng;
use thiserror::Error;

use crate::rle::Pattern;
use crate::rule_set::RuleSet;

/// A fixed-size matrix of cells whose edges wrap around, making the field a torus.
///
/// Dimensions are fixed for the lifetime of a grid. Individual cells may be flipped in place
/// between generations; stepping never mutates in place and instead produces a whole new matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Pattern has no rows")]
    Empty,

    #[error("Pattern has no columns")]
    ZeroWidth,

    #[error("Pattern is too tall ({height} > {rows})")]
    TooTall { height: usize, rows: usize },

    #[error("Pattern is too wide ({width} > {columns})")]
    TooWide { width: usize, columns: usize },
}

impl Grid {
    /// A grid where every cell is independently alive or dead on a coin flip.
    pub fn random(rows: usize, columns: usize) -> Self {
        assert!(rows > 0, "rows must be greater than 0");
        assert!(columns > 0, "columns must be greater than 0");

        let mut rng = rand::rng();
        let cells = (0..rows * columns).map(|_| rng.random()).collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    /// An otherwise dead grid with `pattern` written into its center.
    ///
    /// The offset truncates toward zero, so a pattern one cell smaller than the grid in either
    /// direction sits flush toward the top left.
    pub fn from_pattern(
        pattern: &Pattern,
        rows: usize,
        columns: usize,
    ) -> Result<Self, PlacementError> {
        assert!(rows > 0, "rows must be greater than 0");
        assert!(columns > 0, "columns must be greater than 0");

        let height = pattern.height();
        let width = pattern.width();

        if height == 0 {
            return Err(PlacementError::Empty);
        }

        if width == 0 {
            return Err(PlacementError::ZeroWidth);
        }

        if height > rows {
            return Err(PlacementError::TooTall { height, rows });
        }

        if width > columns {
            return Err(PlacementError::TooWide { width, columns });
        }

        let start_row = (rows - height) / 2;
        let start_column = (columns - width) / 2;

        let mut grid = Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        };

        for row in 0..height {
            for column in 0..width {
                if pattern.get(row, column) {
                    grid.set(start_row + row, start_column + column, true);
                }
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> bool {
        assert!(row < self.rows, "row is out of bounds");
        assert!(column < self.columns, "column is out of bounds");

        self.cells[self.index(row, column)]
    }

    pub fn set(&mut self, row: usize, column: usize, alive: bool) {
        assert!(row < self.rows, "row is out of bounds");
        assert!(column < self.columns, "column is out of bounds");

        let i = self.index(row, column);

        self.cells[i] = alive;
    }

    pub fn toggle(&mut self, row: usize, column: usize) {
        assert!(row < self.rows, "row is out of bounds");
        assert!(column < self.columns, "column is out of bounds");

        let i = self.index(row, column);

        self.cells[i] = !self.cells[i];
    }

    /// Compute the next generation under `set`.
    ///
    /// Every cell of the result is derived from this grid's frozen state; nothing of the new
    /// matrix is ever read back during the pass.
    pub fn step(&self, set: &RuleSet) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());

        for row in 0..self.rows {
            for column in 0..self.columns {
                let alive = self.cells[self.index(row, column)];
                let neighbors = self.live_neighbors(row, column);

                cells.push(if alive {
                    set.survives(neighbors)
                } else {
                    set.born(neighbors)
                });
            }
        }

        Self {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }

    /// Write the grid out row by row, `A` for live and `.` for dead, rows separated by `$`.
    ///
    /// Runs are not length-compressed; the output reads back through [`crate::rle::decode`] at
    /// one character per cell.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows);

        for row in 0..self.rows {
            if row > 0 {
                out.push('$');
            }

            for column in 0..self.columns {
                out.push(if self.cells[self.index(row, column)] {
                    'A'
                } else {
                    '.'
                });
            }
        }

        out
    }

    /// Count live cells among the 8 neighbors of (`row`, `column`), wrapping at the edges.
    fn live_neighbors(&self, row: usize, column: usize) -> u8 {
        let mut count = 0;

        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = wrap(row, dr, self.rows);
                let c = wrap(column, dc, self.columns);

                if self.cells[self.index(r, c)] {
                    count += 1;
                }
            }
        }

        count
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }
}

/// Shift `i` by `delta`, wrapping `-1` to `upper - 1` and `upper` to `0`.
fn wrap(i: usize, delta: isize, upper: usize) -> usize {
    match i.checked_add_signed(delta) {
        None => upper - 1,
        Some(j) if j == upper => 0,
        Some(j) => j,
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use super::PlacementError;
    use crate::rle::decode;
    use crate::rule_set::B3S23;
    use crate::rule_set::RuleSet;

    fn dead(rows: usize, columns: usize) -> Grid {
        Grid {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    #[test]
    fn placement_centers_the_pattern() {
        let pattern = decode("3o!").unwrap();
        let grid = Grid::from_pattern(&pattern, 5, 5).unwrap();

        insta::assert_snapshot!(grid.serialize(), @".....$.....$.AAA.$.....$.....");
    }

    #[test]
    fn placement_truncates_toward_zero() {
        let pattern = decode("2o$2o!").unwrap();
        let grid = Grid::from_pattern(&pattern, 3, 3).unwrap();

        insta::assert_snapshot!(grid.serialize(), @"AA.$AA.$...");
    }

    #[test]
    fn placement_pads_short_rows_with_dead_cells() {
        let pattern = decode("A$3A!").unwrap();
        let grid = Grid::from_pattern(&pattern, 2, 3).unwrap();

        insta::assert_snapshot!(grid.serialize(), @"A..$AAA");
    }

    #[test]
    fn placement_rejects_a_pattern_taller_than_the_grid() {
        let pattern = decode("A$A$A!").unwrap();
        let res = Grid::from_pattern(&pattern, 2, 5);

        assert_eq!(res, Err(PlacementError::TooTall { height: 3, rows: 2 }));
    }

    #[test]
    fn placement_rejects_a_pattern_wider_than_the_grid() {
        let pattern = decode("5o!").unwrap();
        let res = Grid::from_pattern(&pattern, 5, 4);

        assert_eq!(
            res,
            Err(PlacementError::TooWide {
                width: 5,
                columns: 4
            })
        );
    }

    #[test]
    fn placement_rejects_an_empty_pattern() {
        let pattern = decode("!").unwrap();
        assert!(pattern.height() == 1 && pattern.width() == 0);

        let res = Grid::from_pattern(&pattern, 5, 5);

        assert_eq!(res, Err(PlacementError::ZeroWidth));

        let pattern = decode("$").unwrap();
        let res = Grid::from_pattern(&pattern, 5, 5);

        assert_eq!(res, Err(PlacementError::Empty));
    }

    #[test]
    fn set_and_toggle_are_visible_immediately() {
        let mut grid = dead(3, 3);

        grid.set(1, 2, true);
        assert!(grid.get(1, 2));

        grid.toggle(1, 2);
        assert!(!grid.get(1, 2));

        grid.toggle(0, 0);
        assert!(grid.get(0, 0));
    }

    #[test]
    fn random_grids_have_the_requested_size() {
        let grid = Grid::random(7, 11);

        assert_eq!(grid.rows(), 7);
        assert_eq!(grid.columns(), 11);
    }

    #[test]
    fn a_dead_grid_stays_dead() {
        let grid = dead(4, 4);
        let next = grid.step(&B3S23);

        assert_eq!(next, grid);
    }

    #[test]
    fn a_lone_cell_dies() {
        let mut grid = dead(3, 3);
        grid.set(1, 1, true);

        let next = grid.step(&B3S23);

        assert_eq!(next, dead(3, 3));
    }

    #[test]
    fn a_blinker_oscillates() {
        let pattern = decode("3o!").unwrap();
        let grid = Grid::from_pattern(&pattern, 5, 5).unwrap();

        let next = grid.step(&B3S23);
        insta::assert_snapshot!(next.serialize(), @".....$..A..$..A..$..A..$.....");

        assert_eq!(next.step(&B3S23), grid);
    }

    #[test]
    fn a_block_is_still_life() {
        let pattern = decode("2o$2o!").unwrap();
        let grid = Grid::from_pattern(&pattern, 4, 4).unwrap();

        assert_eq!(grid.step(&B3S23), grid);
    }

    #[test]
    fn neighbor_counting_wraps_around_the_corners() {
        let mut grid = dead(4, 4);
        grid.set(3, 3, true);
        grid.set(0, 3, true);
        grid.set(3, 0, true);

        // (0, 0) sees all three across the seams, so B3 brings it alive.
        let next = grid.step(&B3S23);

        assert!(next.get(0, 0));
    }

    #[test]
    fn stepping_respects_the_rule_set() {
        // Seeds: birth on exactly 2 neighbors, nothing survives
        let set: RuleSet = "B2/S".parse().unwrap();

        let pattern = decode("2o!").unwrap();
        let grid = Grid::from_pattern(&pattern, 5, 5).unwrap();

        let next = grid.step(&set);

        insta::assert_snapshot!(next.serialize(), @".....$.AA..$.....$.AA..$.....");
    }
}
