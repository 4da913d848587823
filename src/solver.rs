//! Row-by-row solver.
//!
//! Tiles are placed one at a time from the bottom-right corner, each step
//! keeping everything already placed untouched: first the rows below row 1
//! (right to left, column 0 last), then rows 0 and 1 column by column, and
//! finally the top-left 2x2 block.

use auto_enums::auto_enum;
use itertools::{iproduct, Itertools};
use log::{debug, info};

use crate::error::{Phase, SolveError};
use crate::grid::Grid;
use crate::moves::path_directions;
use crate::path::find_path;
use crate::puzzle::Puzzle;
use crate::Pos;

/// Brings the tile staged at `(row - 1, 1)` down to `(row, 0)` when the
/// blank starts at `(row - 1, 0)`.
pub const COL0_SOLUTION: &str = "ruldrdlurdluurddlur";
/// Brings the tile staged at `(1, col - 1)` up to `(0, col)` when the blank
/// starts at `(1, col - 2)`.
pub const TOPRIGHT_SOLUTION: &str = "urdlurrdluldrruld";
/// Cycles the three tiles of the top-left 2x2 block.
pub const TOPLEFT_SOLUTION: &str = "drul";

const MAX_ROTATIONS: usize = 3;

// cells already solved when the blank sits at (row, col)
#[auto_enum(Iterator)]
fn solved_cells(height: usize, width: usize, row: usize, col: usize) -> impl Iterator<Item = Pos> {
    let total = height * width;
    match row {
        0 | 1 => (2 * width..total)
            .map(move |num| (num / width, num % width))
            .chain(iproduct!(0..2, col + 1..width))
            .chain((row == 0).then(|| (1, col))),
        _ => (row * width + col + 1..total).map(move |num| (num / width, num % width)),
    }
}

fn ensure(holds: bool, phase: Phase, (row, col): Pos) -> Result<(), SolveError> {
    if holds {
        Ok(())
    } else {
        Err(SolveError::InvariantViolated { phase, row, col })
    }
}

impl Puzzle {
    /// Obstacle mask for the step that places the tile at
    /// `(target_row, target_col)`: every cell that step must not disturb is
    /// full.
    pub fn invariant_grid(&self, target_row: usize, target_col: usize) -> Grid {
        let (height, width) = (self.get_height(), self.get_width());
        let mut grid = Grid::new(height, width);
        for pos in solved_cells(height, width, target_row, target_col) {
            grid.set_full(pos);
        }

        grid
    }

    /// Walks the blank to `target` through the empty cells of `mask`.
    fn move_zero(&mut self, mask: Grid, target: Pos) -> Result<String, SolveError> {
        let blank = self.blank();
        let (_, moves) = find_path(mask, blank, target).ok_or(SolveError::Unreachable {
            from: blank,
            to: target,
        })?;

        self.apply_move_string(&moves);
        Ok(moves)
    }

    /// Pushes the tile at `current` along its shortest path to `desired`.
    ///
    /// Before each step the blank walks round to the cell the tile is about
    /// to enter without crossing the tile, then swaps with it.
    pub(crate) fn move_target(
        &mut self,
        mask: &Grid,
        current: Pos,
        desired: Pos,
    ) -> Result<String, SolveError> {
        let (path, _) = find_path(mask.clone(), current, desired).ok_or(SolveError::Unreachable {
            from: current,
            to: desired,
        })?;

        let mut moves = String::new();
        for ((&tile, &next), step) in path
            .iter()
            .tuple_windows()
            .zip_eq(path_directions(&path))
        {
            let mut blank_mask = mask.clone();
            blank_mask.set_full(tile);
            moves += &self.move_zero(blank_mask, next)?;

            let swap = step.flip().as_char();
            self.apply_move_string(&swap.to_string());
            moves.push(swap);
        }

        Ok(moves)
    }

    /// Places the tile belonging at `(target_row, target_col)` for a row
    /// below row 1 and a column right of 0, then parks the blank to its left.
    pub fn solve_interior_tile(
        &mut self,
        target_row: usize,
        target_col: usize,
    ) -> Result<String, SolveError> {
        let target = (target_row, target_col);
        ensure(
            target_row > 1 && target_col > 0 && self.lower_row_invariant(target_row, target_col),
            Phase::LowerRow,
            target,
        )?;
        debug!("solving interior tile {:?}", target);

        let grid = self.invariant_grid(target_row, target_col);
        let current = self.current_position(target_row, target_col);
        let mut moves = self.move_target(&grid, current, target)?;

        let mut mask = grid;
        mask.set_full(target);
        moves += &self.move_zero(mask, (target_row, target_col - 1))?;
        Ok(moves)
    }

    /// Places the tile belonging at `(target_row, 0)` and parks the blank at
    /// the right end of the row above.
    pub fn solve_col0_tile(&mut self, target_row: usize) -> Result<String, SolveError> {
        let target = (target_row, 0);
        ensure(
            target_row > 1 && self.lower_row_invariant(target_row, 0),
            Phase::LowerRow,
            target,
        )?;
        debug!("solving column 0 tile {:?}", target);

        let grid = self.invariant_grid(target_row, 0);
        let blank = self.blank();
        let current = self.current_position(target_row, 0);
        let staging = (target_row - 1, 1);

        let mut moves = if current == (blank.0 - 1, blank.1) {
            // tile right above the blank: one move drops it in
            self.move_zero(grid.clone(), current)?
        } else {
            let mut moves = self.move_target(&grid, current, staging)?;

            let mut mask = grid.clone();
            mask.set_full(staging);
            moves += &self.move_zero(mask, (target_row - 1, 0))?;

            self.apply_move_string(COL0_SOLUTION);
            moves += COL0_SOLUTION;
            moves
        };

        let width = self.get_width();
        let mut mask = grid;
        mask.set_full(target);
        moves += &self.move_zero(mask, (target_row - 1, width - 1))?;
        Ok(moves)
    }

    /// Places the tile belonging at `(1, target_col)` and moves the blank
    /// above it.
    pub fn solve_row1_tile(&mut self, target_col: usize) -> Result<String, SolveError> {
        let target = (1, target_col);
        ensure(
            target_col > 1 && self.row1_invariant(target_col),
            Phase::Row1,
            target,
        )?;
        debug!("solving row 1 tile {:?}", target);

        let grid = self.invariant_grid(1, target_col);
        let current = self.current_position(1, target_col);
        let mut moves = self.move_target(&grid, current, target)?;

        let mut mask = grid;
        mask.set_full(target);
        moves += &self.move_zero(mask, (0, target_col))?;
        Ok(moves)
    }

    /// Places the tile belonging at `(0, target_col)` and leaves the blank
    /// at `(1, target_col - 1)`.
    pub fn solve_row0_tile(&mut self, target_col: usize) -> Result<String, SolveError> {
        let target = (0, target_col);
        ensure(
            target_col > 1 && self.row0_invariant(target_col),
            Phase::Row0,
            target,
        )?;
        debug!("solving row 0 tile {:?}", target);

        let grid = self.invariant_grid(0, target_col);
        let blank = self.blank();
        let current = self.current_position(0, target_col);
        let staging = (1, target_col - 1);

        if current == (blank.0, blank.1 - 1) {
            // tile right next to the blank: slide it over, then step down
            let mut moves = self.move_zero(grid.clone(), current)?;

            let mut mask = grid;
            mask.set_full(target);
            moves += &self.move_zero(mask, staging)?;
            Ok(moves)
        } else {
            let mut moves = self.move_target(&grid, current, staging)?;

            let mut mask = grid;
            mask.set_full(staging);
            moves += &self.move_zero(mask, (1, target_col - 2))?;

            self.apply_move_string(TOPRIGHT_SOLUTION);
            moves += TOPRIGHT_SOLUTION;
            Ok(moves)
        }
    }

    /// Solves the top-left 2x2 block by rotating it until it lines up.
    pub fn solve_2x2(&mut self) -> Result<String, SolveError> {
        ensure(self.row1_invariant(1), Phase::Row1, (1, 1))?;
        debug!("solving top-left 2x2");

        let grid = self.invariant_grid(1, 1);
        let mut moves = self.move_zero(grid, (0, 0))?;
        for _ in 0..MAX_ROTATIONS {
            if self.is_solved() {
                return Ok(moves);
            }

            self.apply_move_string(TOPLEFT_SOLUTION);
            moves += TOPLEFT_SOLUTION;
        }

        if self.is_solved() {
            Ok(moves)
        } else {
            Err(SolveError::Unsolvable)
        }
    }

    /// Solves the whole puzzle in place and returns the moves that did it.
    ///
    /// Replaying the returned string on the original board gives the solved
    /// board. Boards of the wrong parity end in [`SolveError::Unsolvable`],
    /// with the board left in an unspecified arrangement.
    pub fn solve_puzzle(&mut self) -> Result<String, SolveError> {
        let (height, width) = (self.get_height(), self.get_width());

        let mut moves = self.move_zero(Grid::new(height, width), (height - 1, width - 1))?;
        ensure(
            self.lower_row_invariant(height - 1, width - 1),
            Phase::LowerRow,
            (height - 1, width - 1),
        )?;

        for row in (2..height).rev() {
            for col in (1..width).rev() {
                moves += &self.solve_interior_tile(row, col)?;
                ensure(
                    self.lower_row_invariant(row, col - 1),
                    Phase::LowerRow,
                    (row, col - 1),
                )?;
            }

            moves += &self.solve_col0_tile(row)?;
            ensure(
                self.lower_row_invariant(row - 1, width - 1),
                Phase::LowerRow,
                (row - 1, width - 1),
            )?;
        }

        for col in (2..width).rev() {
            moves += &self.solve_row1_tile(col)?;
            ensure(self.row0_invariant(col), Phase::Row0, (0, col))?;

            moves += &self.solve_row0_tile(col)?;
            ensure(self.row1_invariant(col - 1), Phase::Row1, (1, col - 1))?;
        }

        moves += &self.solve_2x2()?;
        info!("solved {}x{} puzzle in {} moves", height, width, moves.len());
        Ok(moves)
    }
}
