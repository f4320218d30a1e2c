//! Measurement sweep over every random-prefix length.
//!
//! For a board of a given size, runs a batch of solve-until-success
//! episodes for each prefix length k from `size` down to 0 and reports the
//! mean wall time per episode and the empirical probability that a single
//! attempt succeeds (the reciprocal of the mean trial count).

use std::io::Write;
use std::time::Instant;

use anyhow::{ensure, Result};
use queens_core::{Board, LasVegas};
use serde::Serialize;

/// One measured row of the sweep.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Measurement {
    /// Queens placed randomly before backtracking takes over.
    pub random_queens: usize,
    /// Mean wall time per solved episode, in milliseconds.
    pub mean_time_ms: f64,
    /// Empirical probability that a single attempt succeeds.
    pub success_rate: f64,
}

/// Run `reps` episodes for every prefix length from `size` down to zero.
///
/// One board and one generator stream are reused across the whole sweep.
/// Prefix lengths close to `size` dominate the runtime on larger boards;
/// each finished length is logged at info level.
pub fn sweep(size: usize, reps: u32, seed: Option<u64>) -> Result<Vec<Measurement>> {
    ensure!(reps > 0, "at least one repetition per prefix length is required");

    let mut board = Board::new(size)?;
    let mut vegas = match seed {
        Some(seed) => LasVegas::with_seed(seed),
        None => LasVegas::new(),
    };

    let mut rows = Vec::with_capacity(size + 1);
    for random_queens in (0..=size).rev() {
        let mut total_trials = 0u64;
        let start = Instant::now();
        for _ in 0..reps {
            total_trials += vegas.solve_until_success(&mut board, random_queens);
        }
        let elapsed = start.elapsed();

        let mean_trials = total_trials as f64 / f64::from(reps);
        rows.push(Measurement {
            random_queens,
            mean_time_ms: elapsed.as_secs_f64() * 1000.0 / f64::from(reps),
            success_rate: 1.0 / mean_trials,
        });
        log::info!(
            "k={random_queens}: {total_trials} trials over {reps} reps in {elapsed:?}"
        );
    }
    Ok(rows)
}

/// Write rows in the `k;t;s` CSV layout: prefix length, mean milliseconds,
/// success probability.
pub fn write_csv<W: Write>(out: &mut W, rows: &[Measurement]) -> std::io::Result<()> {
    writeln!(out, "k;t;s")?;
    for row in rows {
        writeln!(
            out,
            "{};{:.5};{:.5}",
            row.random_queens, row.mean_time_ms, row.success_rate
        )?;
    }
    Ok(())
}
