use std::num::NonZero;

use anyhow::{bail, Context, Result};
use archipelago::{Connectivity, Generator, GeneratorConfig, Outcome, Puzzle, SolveOptions, Status, Strategy};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "archipelago")]
#[command(about = "Solve and generate Hashiwokakero puzzles with a SAT solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve puzzles given by ID, e.g. 3x3m2:2a2c2a2
    Solve {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Variable scheme: graph or grid
        #[arg(short, long, default_value_t = Strategy::Graph)]
        strategy: Strategy,

        /// Connectivity constraint: rooted or all-pairs
        #[arg(short, long, default_value_t = Connectivity::Rooted)]
        connectivity: Connectivity,

        /// Also check that the solution is the only one
        #[arg(short, long)]
        unique: bool,
    },
    /// Generate a puzzle with exactly one solution and print its ID
    Generate {
        #[arg(short = 'n', long, default_value_t = 7)]
        size: usize,

        #[arg(short, long, default_value_t = 8)]
        islands: usize,

        /// Random seed; drawn at random if absent
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value_t = Strategy::Graph)]
        strategy: Strategy,

        /// Print the solution grid too
        #[arg(long)]
        show: bool,
    },
}

fn solve(id: &str, options: SolveOptions, unique: bool) -> Result<()> {
    let puzzle: Puzzle = id.parse().with_context(|| format!("could not read {id:?}"))?;

    let solved = match puzzle.solve(options)? {
        Outcome::Solved(solved) => solved,
        Outcome::NoSolution => bail!("{id} has no solution"),
    };

    println!("{id}");
    print!("{solved}");
    if unique {
        let verdict = if solved.is_unique(options)? { "unique" } else { "not unique" };
        println!("{verdict}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Solve { ids, strategy, connectivity, unique } => {
            let options = SolveOptions::default()
                .with_strategy(strategy)
                .with_connectivity(connectivity);
            for id in ids {
                solve(&id, options, unique)?;
            }
        }
        Command::Generate { size, islands, seed, strategy, show } => {
            let size = NonZero::new(size).context("size must be positive")?;
            let seed = seed.unwrap_or_else(rand::random);
            let config = GeneratorConfig::default()
                .with_size(size)
                .with_islands(islands)
                .with_strategy(strategy);

            let mut generator = Generator::seeded(config, seed);
            let generated = generator.generate()?;
            info!(seed, attempts = generated.attempts, "done");
            if let Status::Exhausted(reason) = generated.status {
                eprintln!(
                    "stopped at {} of {} islands ({reason:?} limit reached)",
                    generated.puzzle.islands().len(),
                    generator.config().islands,
                );
            }

            println!("{}", generated.puzzle.to_id());
            if show {
                print!("{}", generated.solution);
            }
        }
    }

    Ok(())
}
