// --- File: main.rs ---
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use lifebench::bench::{self, Verdict};
use lifebench::config::{GridSource, RunConfig, VisualizerConfig};
use lifebench::constants::{DEFAULT_ITERATIONS, DEFAULT_RANDOM_DENSITY};
use lifebench::grid::GridError;
use lifebench::kernel::Strategy;
use lifebench::visualize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "lifebench",
    about = "Conway's Game of Life: check the optimized kernel against the reference and time both"
)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "size"])))]
struct Cli {
    /// Watch the evolution in the terminal instead of benchmarking
    #[arg(short = 'V', long)]
    visualize: bool,

    /// Number of generations to evolve
    #[arg(short = 'I', long = "iter", default_value_t = DEFAULT_ITERATIONS, allow_negative_numbers = true)]
    iterations: i64,

    /// RLE pattern file to load the initial grid from
    #[arg(short = 'F', long)]
    file: Option<PathBuf>,

    /// Height and width of a random initial grid
    #[arg(short = 'S', long, num_args = 2, value_names = ["HEIGHT", "WIDTH"])]
    size: Option<Vec<usize>>,

    /// Seed for the random grid
    #[arg(long)]
    seed: Option<u64>,

    /// Kernel driving the visualizer (reference or optimized)
    #[arg(long, default_value_t = Strategy::Optimized)]
    strategy: Strategy,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig, Box<dyn Error>> {
        let generations = usize::try_from(self.iterations)
            .map_err(|_| GridError::NegativeGenerations(self.iterations))?;
        let source = match (self.file, self.size.as_deref()) {
            (Some(path), _) => GridSource::Pattern(path),
            (None, Some(&[height, width])) => GridSource::Random {
                height,
                width,
                density: DEFAULT_RANDOM_DENSITY,
                seed: self.seed,
            },
            _ => {
                return Err(Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "a grid source is required: --file PATH or --size HEIGHT WIDTH",
                    )
                    .into());
            }
        };
        Ok(RunConfig {
            source,
            generations,
            visualize: self.visualize,
            visualizer: VisualizerConfig::with_strategy(self.strategy),
        })
    }
}

// --- Main Function ---
fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    let config = Cli::parse().into_config()?;
    let grid = config.source.load()?;

    if config.visualize {
        let strategy = config.visualizer.strategy;
        visualize::run(&strategy, grid, config.generations, config.visualizer)?;
        return Ok(ExitCode::SUCCESS);
    }

    match bench::compare(&grid, config.generations) {
        Verdict::WrongAnswer {
            reference,
            optimized,
        } => {
            println!(" final result different");
            println!("Trimmed Optimized:");
            print!("{}", optimized);
            println!("Trimmed Reference:");
            print!("{}", reference);
            println!("WA");
            Ok(ExitCode::FAILURE)
        }
        Verdict::Accepted {
            reference,
            optimized,
        } => {
            println!("AC");
            println!("Reference: {:.4} s", reference.as_secs_f64());
            println!("Optimized: {:.4} s", optimized.as_secs_f64());
            Ok(ExitCode::SUCCESS)
        }
    }
}
