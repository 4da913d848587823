use std::fmt::{Display, Write};

use crate::moves::DIRECTIONS;
use crate::Pos;

/// Occupancy mask used for pathfinding. A full cell is an obstacle.
///
/// Searches mark visited cells full, so every search takes its mask by
/// value; clone a base mask before handing it over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a mask with every cell empty.
    pub fn new(height: usize, width: usize) -> Grid {
        Grid {
            height,
            width,
            cells: vec![false; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn offset(&self, pos: Pos) -> usize {
        assert!(
            pos.0 < self.height && pos.1 < self.width,
            "cell {:?} outside {}x{} grid",
            pos,
            self.height,
            self.width
        );
        pos.0 * self.width + pos.1
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn set_empty(&mut self, pos: Pos) {
        let ix = self.offset(pos);
        self.cells[ix] = false;
    }

    pub fn set_full(&mut self, pos: Pos) {
        let ix = self.offset(pos);
        self.cells[ix] = true;
    }

    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.cells[self.offset(pos)]
    }

    /// Neighbors in the order [up, down, left, right]; `None` where the
    /// neighbor would fall off the grid.
    pub fn four_neighbors(&self, pos: Pos) -> [Option<Pos>; 4] {
        DIRECTIONS.map(|d| d.step(pos, self.height, self.width))
    }

    /// Position of the `num`th cell in row-major order.
    pub fn index_of(&self, num: usize) -> Pos {
        assert!(
            num < self.height * self.width,
            "cell number {} too high",
            num
        );
        (num / self.width, num % self.width)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.cells.chunks(self.width.max(1)).enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for &full in line {
                f.write_char(if full { '#' } else { '.' })?;
            }
        }

        Ok(())
    }
}
