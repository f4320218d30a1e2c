//! Search strategies for the n-queens problem.
//!
//! Two strategies share one mutable [`Board`]: exhaustive backtracking, and
//! a Las Vegas hybrid that places a random prefix of queens before handing
//! the remaining rows to backtracking.

pub(crate) mod backtrack;
mod vegas;

pub use vegas::{LasVegas, SearchOutcome};

use crate::Board;

/// Deterministic exhaustive search. Stateless; all search state lives in the
/// board being solved.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Search for a solution starting from row 0.
    ///
    /// On success the solution stays materialized on the board and `true` is
    /// returned; on failure every queen this search placed has been removed
    /// again. Queens already on the board are left untouched either way.
    pub fn solve(&self, board: &mut Board) -> bool {
        backtrack::solve_recursive(board, 0)
    }

    /// Continue the search at `start_row`, assuming rows `0..start_row` are
    /// already placed.
    pub fn solve_from(&self, board: &mut Board, start_row: usize) -> bool {
        backtrack::solve_recursive(board, start_row)
    }
}
