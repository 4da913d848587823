use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fifteen_solver::{parse_puzzle, Puzzle};

// Format: one row per line, tiles separated by whitespace, 0 is the blank.
// The solved board counts up from the blank in the top-left corner.
const EXAMPLES: &[&str] = &[
    "
 3 2 1
 6 5 4
 7 0 8
",
    "
 2  4  6  5
 1 10  3  7
 8  9  0 11
12 13 14 15
",
    "
15 14 13 12
11 10  9  8
 7  6  5  4
 3  2  1  0
",
    "
12 11 10  9 15
 7  6  5  4  3
 2  1  8 13 14
 0 17 16 18 19
",
];

/// Boards with more cells than this are not handed to the A* search.
const OPTIMAL_MAX_CELLS: usize = 9;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board file to solve instead of the built-in examples
    #[clap(short, long)]
    board: Option<PathBuf>,

    /// Also search for a shortest solution on small boards
    #[clap(long)]
    optimal: bool,

    /// Print the board after every move of the solution
    #[clap(long)]
    replay: bool,
}

fn read_board_file(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn run(source: &str, args: &Args) -> Result<(), String> {
    let puzzle = parse_puzzle(source).map_err(|e| format!("Invalid board: {}", e))?;

    println!("----");
    println!("Source:");
    println!("{}", puzzle);
    println!("----");

    if !puzzle.is_solvable() {
        println!("Parity check: this board cannot be solved");
    }

    let mut solved = puzzle.clone();
    let moves = solved
        .solve_puzzle()
        .map_err(|e| format!("No solution found: {}", e))?;
    println!("Found a solution in {} moves:", moves.len());
    println!("{}", moves);

    if args.replay {
        replay(&puzzle, &moves);
    }

    if args.optimal {
        if puzzle.get_height() * puzzle.get_width() <= OPTIMAL_MAX_CELLS {
            match puzzle.solve_optimal() {
                Some(best) => println!("Shortest solution has {} moves: {}", best.len(), best),
                None => println!("No shortest solution found"),
            }
        } else {
            println!("Board too large for a shortest-solution search");
        }
    }

    println!("----");
    println!();
    Ok(())
}

fn replay(puzzle: &Puzzle, moves: &str) {
    let mut board = puzzle.clone();
    for (i, c) in moves.chars().enumerate() {
        board.apply_move_string(&c.to_string());
        println!("{} {}\n{}\n", i + 1, c, board);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let sources = match &args.board {
        Some(path) => match read_board_file(path) {
            Ok(source) => vec![source],
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => EXAMPLES.iter().map(|s| s.to_string()).collect(),
    };

    let mut status = ExitCode::SUCCESS;
    for source in &sources {
        if let Err(e) = run(source, &args) {
            eprintln!("{}", e);
            status = ExitCode::FAILURE;
        }
    }

    status
}
