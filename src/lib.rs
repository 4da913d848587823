//! Solver for the sliding fifteen puzzle on boards of any size from 2x2 up.
//!
//! [`Puzzle::solve_puzzle`] places tiles row by row, each step confined to
//! the part of the board not yet solved, and returns the blank's moves as a
//! string of `u`/`d`/`l`/`r`. [`Puzzle::solve_optimal`] runs an A* search
//! instead, which only scales to very small boards.

mod error;
pub mod grid;
pub mod moves;
pub mod optimal;
pub mod path;
pub mod puzzle;
pub mod solver;

pub use error::{ConfigError, Phase, SolveError};
pub use grid::Grid;
pub use moves::{path_to_moves, Direction};
pub use path::{build_path_graph, find_path, NodeId, PathGraph};
pub use puzzle::{parse_puzzle, Puzzle};

/// `(row, col)`, rows growing downward and columns to the right.
pub type Pos = (usize, usize);
