use pathfinding::directed::astar::astar;
use smallvec::SmallVec;

use crate::moves::{path_to_moves, DIRECTIONS};
use crate::puzzle::Puzzle;

fn successors(p: &Puzzle) -> SmallVec<[(Puzzle, usize); 4]> {
    DIRECTIONS
        .into_iter()
        .filter_map(|d| p.try_move(d))
        .map(|next| (next, 1))
        .collect()
}

// every tile needs at least as many moves as it is away from home
fn manhattan_distance(p: &Puzzle) -> usize {
    let width = p.get_width();
    let mut distance = 0;
    for row in 0..p.get_height() {
        for col in 0..width {
            let label = p.get_number(row, col);
            if label != 0 {
                distance += row.abs_diff(label / width) + col.abs_diff(label % width);
            }
        }
    }

    distance
}

impl Puzzle {
    /// Shortest move string solving the puzzle, found with A*.
    ///
    /// The state space grows factorially, so this is only practical for
    /// boards of about nine cells. Returns `None` for unsolvable boards.
    pub fn solve_optimal(&self) -> Option<String> {
        if !self.is_solvable() {
            return None;
        }

        let (states, _cost) = astar(self, successors, manhattan_distance, Puzzle::is_solved)?;
        let blanks: Vec<_> = states.iter().map(Puzzle::blank).collect();
        Some(path_to_moves(&blanks))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn solved_needs_nothing() {
        let p = Puzzle::new(3, 3, None).unwrap();
        assert_eq!(p.solve_optimal().unwrap(), "");
    }

    #[test]
    fn undoes_a_short_scramble() {
        let mut p = Puzzle::new(3, 3, None).unwrap();
        p.apply_move_string("rddr");
        let moves = p.solve_optimal().unwrap();
        assert_eq!(moves, "luul");

        p.apply_move_string(&moves);
        assert!(p.is_solved());
    }

    #[test]
    fn heuristic_is_zero_when_solved() {
        let mut p = Puzzle::new(2, 3, None).unwrap();
        assert_eq!(manhattan_distance(&p), 0);
        p.apply_move_string("dr");
        assert_eq!(manhattan_distance(&p), 2);
    }

    #[test]
    fn unsolvable_has_no_answer() {
        let mut p = Puzzle::new(2, 2, None).unwrap();
        p.set_number(1, 0, 3);
        p.set_number(1, 1, 2);
        assert_eq!(p.solve_optimal(), None);
    }

    #[test]
    fn never_longer_than_row_solver() {
        let mut p = Puzzle::new(2, 3, None).unwrap();
        p.apply_move_string("rrdllurd");
        let optimal = p.solve_optimal().unwrap();

        let mut q = p.clone();
        let moves = q.solve_puzzle().unwrap();
        assert!(optimal.len() <= moves.len());

        p.apply_move_string(&optimal);
        assert!(p.is_solved());
    }
}
