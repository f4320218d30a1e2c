mod stats;

use std::io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use queens_core::{Board, LasVegas, SearchOutcome};

#[derive(Parser)]
#[command(
    name = "nqueens",
    about = "Solve the n-queens problem with a Las Vegas / backtracking hybrid",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find one solution and print it as a column list.
    Solve {
        /// Board dimension and queen count.
        #[arg(short = 'n', long, default_value_t = 8)]
        size: usize,
        /// Queens to place randomly before backtracking takes over.
        #[arg(short = 'k', long, default_value_t = 0)]
        random_queens: usize,
        /// Fixed generator seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
        /// Give up after this many failed attempts instead of retrying
        /// forever.
        #[arg(long)]
        max_trials: Option<u64>,
    },
    /// Measure success probability and runtime for every prefix length.
    Stats {
        /// Board dimension and queen count.
        #[arg(short = 'n', long, default_value_t = 8)]
        size: usize,
        /// Solve-until-success episodes per prefix length.
        #[arg(short, long, default_value_t = 1000)]
        reps: u32,
        /// Fixed generator seed for a reproducible sweep.
        #[arg(long)]
        seed: Option<u64>,
        /// Emit JSON rows instead of CSV.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    match Cli::parse().command {
        Command::Solve {
            size,
            random_queens,
            seed,
            max_trials,
        } => run_solve(size, random_queens, seed, max_trials),
        Command::Stats {
            size,
            reps,
            seed,
            json,
        } => run_stats(size, reps, seed, json),
    }
}

fn run_solve(
    size: usize,
    random_queens: usize,
    seed: Option<u64>,
    max_trials: Option<u64>,
) -> Result<()> {
    if random_queens > size {
        bail!("--random-queens ({random_queens}) must not exceed --size ({size})");
    }
    let mut board = Board::new(size).context("invalid board size")?;
    let mut vegas = match seed {
        Some(seed) => LasVegas::with_seed(seed),
        None => LasVegas::new(),
    };

    let trials = match max_trials {
        Some(cap) => match vegas.solve_capped(&mut board, random_queens, cap) {
            SearchOutcome::Solved { trials } => trials,
            SearchOutcome::Exhausted { trials } => {
                bail!("no solution found within {trials} trials")
            }
        },
        None => vegas.solve_until_success(&mut board, random_queens),
    };
    log::info!("solved {size}-queens with k={random_queens} in {trials} trial(s)");

    let columns = board
        .solution()
        .context("search reported success without a complete board")?;
    println!("{}", format_solution(&columns));
    Ok(())
}

fn run_stats(size: usize, reps: u32, seed: Option<u64>, json: bool) -> Result<()> {
    let rows = stats::sweep(size, reps, seed)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &rows)?;
        println!();
    } else {
        stats::write_csv(&mut out, &rows)?;
    }
    Ok(())
}

/// Render a solution as the column of each row's queen, bracketed and
/// comma separated.
fn format_solution(columns: &[usize]) -> String {
    let inner: Vec<String> = columns.iter().map(usize::to_string).collect();
    format!("[{}]", inner.join(","))
}
