use thiserror::Error;

use crate::Pos;

/// Rejected initial configurations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Puzzle must be at least 2x2, got {height}x{width}")]
    TooSmall { height: usize, width: usize },
    #[error("Expected {expected} rows but got {found}")]
    RowCount { expected: usize, found: usize },
    #[error("Row {row} has {found} tiles, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Tile {label} out of range, labels must be below {max}")]
    LabelOutOfRange { label: usize, max: usize },
    #[error("Tile {label} appears more than once")]
    DuplicateLabel { label: usize },
    #[error("Line {line}: cannot parse tile {token:?}")]
    Parse { line: usize, token: String },
}

/// Solver steps in which an invariant check can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LowerRow,
    Row1,
    Row0,
}

/// Failures while solving a well-formed puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The configuration has odd parity; the final 2x2 block never lines up.
    #[error("Puzzle has no solution")]
    Unsolvable,
    #[error("No path from {from:?} to {to:?}")]
    Unreachable { from: Pos, to: Pos },
    #[error("{phase:?} invariant does not hold at ({row}, {col})")]
    InvariantViolated { phase: Phase, row: usize, col: usize },
}
