//! Hybrid Las Vegas / backtracking engine for the n-queens problem.
//!
//! A [`Board`] tracks a partial placement with constant-time conflict
//! checks; [`Solver`] searches it exhaustively, and [`LasVegas`] first
//! places a random prefix of queens before handing the remaining rows to
//! backtracking. The number of attempts a Las Vegas episode needs is the
//! quantity the surrounding measurement tooling reports.

mod board;
mod solver;

pub use board::{Board, BoardError};
pub use solver::{LasVegas, SearchOutcome, Solver};
