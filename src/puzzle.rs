use std::{
    fmt::{Display, Write},
    ops::Index,
    ops::IndexMut,
};

use itertools::{iproduct, Itertools};

use crate::error::ConfigError;
use crate::moves::Direction;
use crate::Pos;

/// An N x M sliding puzzle. Label 0 is the blank; the solved board holds
/// `col + width * row` at every `(row, col)`, so the blank ends up in the
/// upper-left corner.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Puzzle {
    height: usize,
    width: usize,
    board: Vec<usize>,
}

impl Puzzle {
    /// Builds a puzzle from `initial`, or the solved board when `None`.
    ///
    /// The initial board must be `height` rows of `width` labels forming a
    /// permutation of `0..height * width`.
    pub fn new(
        height: usize,
        width: usize,
        initial: Option<Vec<Vec<usize>>>,
    ) -> Result<Puzzle, ConfigError> {
        if height < 2 || width < 2 {
            return Err(ConfigError::TooSmall { height, width });
        }

        let total = height * width;
        let board = match initial {
            None => (0..total).collect(),
            Some(rows) => {
                if rows.len() != height {
                    return Err(ConfigError::RowCount {
                        expected: height,
                        found: rows.len(),
                    });
                }

                let mut seen = vec![false; total];
                for (row, line) in rows.iter().enumerate() {
                    if line.len() != width {
                        return Err(ConfigError::RowLength {
                            row,
                            expected: width,
                            found: line.len(),
                        });
                    }

                    for &label in line {
                        if label >= total {
                            return Err(ConfigError::LabelOutOfRange { label, max: total });
                        }
                        if seen[label] {
                            return Err(ConfigError::DuplicateLabel { label });
                        }
                        seen[label] = true;
                    }
                }

                rows.into_iter().flatten().collect()
            }
        };

        Ok(Puzzle {
            height,
            width,
            board,
        })
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_number(&self, row: usize, col: usize) -> usize {
        self[(row, col)]
    }

    /// Overwrites a single cell. Nothing keeps the board a permutation
    /// afterwards; that is up to the caller.
    pub fn set_number(&mut self, row: usize, col: usize, value: usize) {
        self[(row, col)] = value;
    }

    /// Where the tile labelled `label` currently sits.
    pub fn position_of(&self, label: usize) -> Pos {
        let ix = self
            .board
            .iter()
            .position(|&l| l == label)
            .unwrap_or_else(|| panic!("tile {} not found", label));
        (ix / self.width, ix % self.width)
    }

    /// Where the tile that belongs at `(solved_row, solved_col)` currently sits.
    pub fn current_position(&self, solved_row: usize, solved_col: usize) -> Pos {
        self.position_of(solved_col + self.width * solved_row)
    }

    pub fn blank(&self) -> Pos {
        self.position_of(0)
    }

    fn is_home(&self, pos: Pos) -> bool {
        self[pos] == pos.1 + self.width * pos.0
    }

    pub fn is_solved(&self) -> bool {
        self.board.iter().enumerate().all(|(ix, &label)| ix == label)
    }

    /// Whether the solved board is reachable at all.
    ///
    /// Every move is a transposition with the blank and flips the parity of
    /// the blank's distance to the corner, so the two parities must agree.
    pub fn is_solvable(&self) -> bool {
        let mut seen = vec![false; self.board.len()];
        let mut transpositions = 0;
        for start in 0..self.board.len() {
            let mut len = 0usize;
            let mut ix = start;
            while !seen[ix] {
                seen[ix] = true;
                ix = self.board[ix];
                len += 1;
            }
            transpositions += len.max(1) - 1;
        }

        let (row, col) = self.blank();
        transpositions % 2 == (row + col) % 2
    }

    /// Moves the blank from `blank` one step in `direction`, returning its
    /// new position, or `None` if that would leave the board.
    fn slide(&mut self, blank: Pos, direction: Direction) -> Option<Pos> {
        let next = direction.step(blank, self.height, self.width)?;
        self[blank] = self[next];
        self[next] = 0;
        Some(next)
    }

    /// A copy with the blank moved one step, if the move stays on the board.
    pub fn try_move(&self, direction: Direction) -> Option<Puzzle> {
        let mut next = self.clone();
        next.slide(self.blank(), direction)?;
        Some(next)
    }

    /// Replays a move string against the board.
    ///
    /// Panics on a character that is not a direction or on a move that
    /// would push the blank off the board.
    pub fn apply_move_string(&mut self, moves: &str) {
        let mut blank = self.blank();
        for c in moves.chars() {
            let direction =
                Direction::from_char(c).unwrap_or_else(|| panic!("invalid direction: {:?}", c));
            blank = self
                .slide(blank, direction)
                .unwrap_or_else(|| panic!("move off grid: {}", c));
        }
    }

    /// Blank at `(target_row, target_col)`, every row below it solved and
    /// every tile right of the blank in its row solved.
    pub fn lower_row_invariant(&self, target_row: usize, target_col: usize) -> bool {
        self.blank() == (target_row, target_col)
            && iproduct!(target_row + 1..self.height, 0..self.width).all(|pos| self.is_home(pos))
            && (target_col + 1..self.width).all(|col| self.is_home((target_row, col)))
    }

    fn top_rows_solved_right_of(&self, target_col: usize) -> bool {
        iproduct!(2..self.height, 0..self.width).all(|pos| self.is_home(pos))
            && iproduct!(0..2, target_col + 1..self.width).all(|pos| self.is_home(pos))
    }

    /// Blank at `(1, target_col)`, rows from 2 down solved, and columns right
    /// of `target_col` solved in rows 0 and 1.
    pub fn row1_invariant(&self, target_col: usize) -> bool {
        self.blank() == (1, target_col) && self.top_rows_solved_right_of(target_col)
    }

    /// Like [`Puzzle::row1_invariant`] with the blank at `(0, target_col)`
    /// and the tile below it already solved.
    pub fn row0_invariant(&self, target_col: usize) -> bool {
        self.blank() == (0, target_col)
            && self.top_rows_solved_right_of(target_col)
            && self.is_home((1, target_col))
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pad = (self.board.len() - 1).to_string().len();
        let mut first = true;
        for line in self.board.chunks(self.width) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            write!(
                f,
                "{}",
                line.iter().map(|n| format!("{:>pad$}", n, pad = pad)).join(" ")
            )?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Puzzle {
    type Output = usize;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(index.1 < self.width, "column {} out of bounds", index.1);
        &self.board[index.0 * self.width + index.1]
    }
}

impl IndexMut<(usize, usize)> for Puzzle {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(index.1 < self.width, "column {} out of bounds", index.1);
        &mut self.board[index.0 * self.width + index.1]
    }
}

/// Reads a board written as one line per row of whitespace-separated labels.
pub fn parse_puzzle(b: &str) -> Result<Puzzle, ConfigError> {
    let rows = b
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(line, row)| {
            row.split_whitespace()
                .map(|token| {
                    token.parse().map_err(|_| ConfigError::Parse {
                        line: line + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<usize>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    Puzzle::new(height, width, Some(rows))
}

#[cfg(test)]
mod test {
    use super::*;

    fn puzzle(rows: &[&[usize]]) -> Puzzle {
        let rows: Vec<Vec<usize>> = rows.iter().map(|r| r.to_vec()).collect();
        Puzzle::new(rows.len(), rows[0].len(), Some(rows)).unwrap()
    }

    fn config1() -> Puzzle {
        puzzle(&[&[2, 4, 6, 5], &[1, 10, 3, 7], &[8, 9, 0, 11], &[12, 13, 14, 15]])
    }

    fn p2_config1() -> Puzzle {
        puzzle(&[&[4, 6, 1, 3], &[5, 2, 0, 7], &[8, 9, 10, 11], &[12, 13, 14, 15]])
    }

    #[test]
    fn defaults_to_solved() {
        let p = Puzzle::new(3, 4, None).unwrap();
        assert!(p.is_solved());
        assert_eq!(p.get_height(), 3);
        assert_eq!(p.get_width(), 4);
        assert_eq!(p.get_number(2, 1), 9);
        assert_eq!(p.current_position(0, 0), (0, 0));
    }

    #[test]
    fn rejects_malformed_boards() {
        assert_eq!(
            Puzzle::new(1, 4, None),
            Err(ConfigError::TooSmall {
                height: 1,
                width: 4
            })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1]])),
            Err(ConfigError::RowCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1], vec![2]])),
            Err(ConfigError::RowLength {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1], vec![2, 4]])),
            Err(ConfigError::LabelOutOfRange { label: 4, max: 4 })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1], vec![1, 3]])),
            Err(ConfigError::DuplicateLabel { label: 1 })
        );
    }

    #[test]
    fn positions() {
        let p = puzzle(&[&[2, 3], &[0, 1]]);
        assert_eq!(p.current_position(0, 0), (1, 0));
        assert_eq!(p.current_position(0, 1), (1, 1));
        assert_eq!(p.current_position(1, 0), (0, 0));
        assert_eq!(p.blank(), (1, 0));
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn missing_tile() {
        let mut p = Puzzle::new(2, 2, None).unwrap();
        p.set_number(1, 1, 0);
        p.position_of(3);
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds() {
        Puzzle::new(2, 2, None).unwrap().get_number(0, 2);
    }

    #[test]
    fn apply_moves() {
        let mut p = Puzzle::new(3, 3, None).unwrap();
        p.apply_move_string("rdd");
        assert_eq!(p.to_string(), "1 4 2\n3 7 5\n6 0 8");
        p.apply_move_string("uul");
        assert!(p.is_solved());
    }

    #[test]
    #[should_panic(expected = "move off grid")]
    fn move_off_grid() {
        Puzzle::new(2, 2, None).unwrap().apply_move_string("u");
    }

    #[test]
    #[should_panic(expected = "invalid direction")]
    fn bad_direction() {
        Puzzle::new(2, 2, None).unwrap().apply_move_string("x");
    }

    #[test]
    fn try_move_leaves_original() {
        let p = Puzzle::new(2, 2, None).unwrap();
        assert!(p.try_move(Direction::Left).is_none());
        let next = p.try_move(Direction::Right).unwrap();
        assert_eq!(next.blank(), (0, 1));
        assert!(p.is_solved());
    }

    #[test]
    fn solvable_parity() {
        assert!(Puzzle::new(4, 4, None).unwrap().is_solvable());
        assert!(config1().is_solvable());

        let mut swapped = Puzzle::new(4, 4, None).unwrap();
        swapped.set_number(3, 2, 15);
        swapped.set_number(3, 3, 14);
        assert!(!swapped.is_solvable());

        let mut moved = Puzzle::new(3, 3, None).unwrap();
        moved.apply_move_string("rdrdlu");
        assert!(moved.is_solvable());
    }

    #[test]
    fn lower_row_invariant() {
        let p = config1();
        assert!(p.lower_row_invariant(2, 2));
        assert!(!p.lower_row_invariant(2, 1));

        let p = puzzle(&[&[4, 1, 7, 2], &[8, 6, 9, 3], &[5, 0, 10, 11], &[12, 13, 14, 15]]);
        assert!(p.lower_row_invariant(2, 1));
        assert!(!p.lower_row_invariant(1, 1));

        let p = puzzle(&[&[1, 2, 6, 3], &[4, 5, 11, 10], &[8, 0, 9, 7], &[12, 13, 14, 15]]);
        assert!(!p.lower_row_invariant(2, 1));
        assert!(!p.lower_row_invariant(2, 3));

        let p = puzzle(&[&[8, 1, 2, 3], &[9, 6, 4, 7], &[5, 11, 10, 0], &[12, 13, 14, 15]]);
        assert!(p.lower_row_invariant(2, 3));
        assert!(!p.lower_row_invariant(2, 2));

        let p = puzzle(&[&[1, 8, 2, 3], &[5, 6, 4, 7], &[0, 9, 10, 11], &[12, 13, 14, 15]]);
        assert!(p.lower_row_invariant(2, 0));
        assert!(!p.lower_row_invariant(2, 1));

        let p = puzzle(&[&[8, 1, 2, 3], &[5, 6, 4, 7], &[15, 9, 10, 11], &[12, 13, 14, 0]]);
        assert!(p.lower_row_invariant(3, 3));
        assert!(!p.lower_row_invariant(2, 1));
    }

    #[test]
    fn row1_invariant() {
        assert!(p2_config1().row1_invariant(2));

        let mut p = p2_config1();
        p.set_number(0, 3, 4);
        p.set_number(0, 0, 3);
        assert!(!p.row1_invariant(2));

        let mut p = p2_config1();
        p.set_number(3, 0, 6);
        p.set_number(0, 1, 12);
        assert!(!p.row1_invariant(2));
    }

    #[test]
    fn row0_invariant() {
        let mut p = p2_config1();
        p.set_number(0, 1, 1);
        p.set_number(0, 2, 0);
        p.set_number(1, 2, 6);
        assert!(p.row0_invariant(2));

        let mut below = p2_config1();
        below.set_number(0, 0, 1);
        below.set_number(0, 2, 0);
        below.set_number(1, 2, 4);
        assert!(!below.row0_invariant(2));

        let mut right = p.clone();
        right.set_number(0, 0, 3);
        right.set_number(0, 3, 4);
        assert!(!right.row0_invariant(2));

        let mut bottom = p;
        bottom.set_number(0, 3, 4);
        bottom.set_number(0, 0, 12);
        assert!(!bottom.row0_invariant(2));
    }

    #[test]
    fn parses_boards() {
        let p = parse_puzzle(
            "
 3 2 1
 6 5 4
 7 0 8
",
        )
        .unwrap();
        assert_eq!(p.get_height(), 3);
        assert_eq!(p.get_number(2, 0), 7);
        assert_eq!(p.blank(), (2, 1));

        assert_eq!(
            parse_puzzle("0 1\n2 x"),
            Err(ConfigError::Parse {
                line: 2,
                token: "x".to_string()
            })
        );
        assert!(matches!(
            parse_puzzle("0 1 2\n3 4"),
            Err(ConfigError::RowLength { row: 1, .. })
        ));
    }

    #[test]
    fn display_pads_labels() {
        let p = Puzzle::new(4, 4, None).unwrap();
        assert_eq!(
            p.to_string(),
            " 0  1  2  3\n 4  5  6  7\n 8  9 10 11\n12 13 14 15"
        );
    }
}
