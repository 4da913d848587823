use std::fmt::{Display, Write};

use itertools::Itertools;

use crate::Pos;

/// A single move of the blank tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed neighbor order used everywhere a search expands a cell.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    pub fn as_char(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Direction> {
        match c {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn from_delta(delta: (isize, isize)) -> Option<Direction> {
        DIRECTIONS.into_iter().find(|d| d.delta() == delta)
    }

    pub fn flip(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The cell one step away from `pos`, or `None` if that falls outside a
    /// `height` x `width` grid.
    pub fn step(self, pos: Pos, height: usize, width: usize) -> Option<Pos> {
        let (dr, dc) = self.delta();
        let row = pos.0.checked_add_signed(dr)?;
        let col = pos.1.checked_add_signed(dc)?;
        if row < height && col < width {
            Some((row, col))
        } else {
            None
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_char())
    }
}

/// Directions taken along a path of adjacent positions.
///
/// Panics if two consecutive positions are not a unit step apart; paths
/// produced by the BFS never are.
pub fn path_directions(path: &[Pos]) -> Vec<Direction> {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| {
            let delta = (
                to.0 as isize - from.0 as isize,
                to.1 as isize - from.1 as isize,
            );
            Direction::from_delta(delta)
                .unwrap_or_else(|| panic!("not a unit step: {:?} -> {:?}", from, to))
        })
        .collect()
}

/// Encodes a path as a move string, one character per step.
pub fn path_to_moves(path: &[Pos]) -> String {
    path_directions(path).into_iter().map(Direction::as_char).collect()
}
