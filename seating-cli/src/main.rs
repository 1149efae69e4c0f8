//! seating-cli: command-line interface for the seating optimization core
//!
//! This CLI lets callers exercise the full solver without a UI.
//!
//! # Commands
//!
//! - `optimize`: run the GA + SA pipeline on a problem file
//! - `validate`: validate a problem file without optimizing
//! - `plan`: decode a solution (from an `optimize` run) into seat labels
//! - `schema`: print example JSON for the input/output formats

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seating_core::models::{Attendee, OptimizerConfig};
use seating_core::solver::Optimizer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seating-cli")]
#[command(version = "0.1.0")]
#[command(about = "Seating optimizer CLI - AI-testable optimization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the optimizer on a problem file
    Optimize {
        /// Input JSON/YAML file path (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// RNG seed for a reproducible run; omit for a thread-local RNG
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a problem file without optimizing
    Validate {
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,
    },

    /// Decode a solution into seat labels (row letter + 1-based column)
    Plan {
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        #[arg(long)]
        pretty: bool,
    },

    /// Print example JSON schemas for input/output formats
    Schema {
        /// Which schema to print: input, output, or all
        #[arg(value_name = "TYPE", default_value = "all")]
        schema_type: String,
    },
}

/// The on-disk problem definition: venue dimensions, attendees, and
/// optional solver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProblemInput {
    rows: usize,
    cols: usize,
    vip_rows: usize,
    attendees: Vec<Attendee>,
    #[serde(default)]
    config: Option<OptimizerConfig>,
}

/// The `plan` subcommand's input: a problem plus the solution to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanInput {
    #[serde(flatten)]
    problem: ProblemInput,
    solution: Vec<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize {
            input,
            stdin,
            output,
            pretty,
            seed,
        } => cmd_optimize(input, stdin, output, pretty, seed),

        Commands::Validate { input, stdin } => cmd_validate(input, stdin),

        Commands::Plan {
            input,
            stdin,
            pretty,
        } => cmd_plan(input, stdin, pretty),

        Commands::Schema { schema_type } => cmd_schema(&schema_type),
    }
}

fn read_input(file: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    if use_stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("failed to read file: {path:?}"))
    } else {
        anyhow::bail!("either provide an input file or use --stdin")
    }
}

fn parse_problem(json_str: &str) -> Result<ProblemInput> {
    if let Ok(problem) = serde_json::from_str(json_str) {
        return Ok(problem);
    }
    serde_yaml::from_str(json_str).context("failed to parse input as JSON or YAML")
}

fn build_optimizer(problem: &ProblemInput) -> Result<Optimizer> {
    let mut optimizer = Optimizer::new();
    optimizer
        .set_venue(problem.rows, problem.cols, problem.vip_rows)
        .map_err(|e| anyhow::anyhow!("venue error: {e}"))?;
    optimizer
        .set_attendees(problem.attendees.clone())
        .map_err(|e| anyhow::anyhow!("attendee error: {e}"))?;
    if let Some(config) = &problem.config {
        optimizer
            .configure(*config)
            .map_err(|e| anyhow::anyhow!("config error: {e}"))?;
    }
    Ok(optimizer)
}

fn cmd_optimize(
    input: Option<PathBuf>,
    stdin: bool,
    output: Option<PathBuf>,
    pretty: bool,
    seed: Option<u64>,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let problem = parse_problem(&json_str)?;
    let mut optimizer = build_optimizer(&problem)?;

    eprintln!("Running optimizer...");
    let result = if let Some(seed) = seed {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        optimizer.optimize_with_rng(None, None, &mut rng)
    } else {
        optimizer.optimize(None, None)
    }
    .map_err(|e| anyhow::anyhow!("optimizer error: {e}"))?;

    let output_json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    if let Some(output_path) = output {
        fs::write(&output_path, &output_json)
            .with_context(|| format!("failed to write output to {output_path:?}"))?;
        eprintln!("Result written to {output_path:?}");
    } else {
        println!("{output_json}");
    }

    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, stdin: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;

    let problem: ProblemInput = match parse_problem(&json_str) {
        Ok(problem) => problem,
        Err(e) => {
            println!(
                "{{\"valid\": false, \"error\": \"{}\"}}",
                format!("{e:?}").replace('"', "\\\"")
            );
            return Ok(());
        }
    };

    match build_optimizer(&problem) {
        Ok(_) => {
            println!("{{\"valid\": true, \"message\": \"problem definition is valid\"}}");
            Ok(())
        }
        Err(e) => {
            println!(
                "{{\"valid\": false, \"error\": \"{}\"}}",
                format!("{e:?}").replace('"', "\\\"")
            );
            Ok(())
        }
    }
}

fn cmd_plan(input: Option<PathBuf>, stdin: bool, pretty: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let plan_input: PlanInput =
        serde_json::from_str(&json_str).context("failed to parse input JSON")?;
    let optimizer = build_optimizer(&plan_input.problem)?;

    let plan = optimizer
        .seating_plan(Some(&plan_input.solution))
        .map_err(|e| anyhow::anyhow!("seating plan error: {e}"))?;

    let output_json = if pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{output_json}");
    Ok(())
}

fn cmd_schema(schema_type: &str) -> Result<()> {
    match schema_type {
        "input" => print_input_schema(),
        "output" => print_output_schema(),
        "all" => {
            println!("=== INPUT SCHEMA ===\n");
            print_input_schema()?;
            println!("\n=== OUTPUT SCHEMA ===\n");
            print_output_schema()?;
            Ok(())
        }
        _ => anyhow::bail!("unknown schema type: {schema_type}. Use: input, output, or all"),
    }
}

fn print_input_schema() -> Result<()> {
    let example = r#"{
  "rows": 10,
  "cols": 12,
  "vip_rows": 2,
  "attendees": [
    {"id": "alice", "type": "vip", "group": "team-a", "preference": "front", "priority": 8},
    {"id": "bob", "type": "regular", "group": "team-a", "preference": "any", "priority": 5}
  ],
  "config": {
    "population_size": 100,
    "generations": 200,
    "mutation_rate": 0.15,
    "crossover_rate": 0.85,
    "elitism_count": 5,
    "tournament_size": 5,
    "initial_temp": 1000.0,
    "cooling_rate": 0.995,
    "min_temp": 1.0,
    "mode": "balanced",
    "weights": {"friend": 1.0, "vip": 1.0, "group": 1.0, "distance": 1.0}
  }
}"#;
    println!("{example}");
    Ok(())
}

fn print_output_schema() -> Result<()> {
    let example = r#"{
  "solution": [4, 17, 2, 9],
  "fitness": {
    "friend_proximity": 0.82,
    "vip_placement": 1.0,
    "group_cohesion": 0.71,
    "stage_distance": 0.65,
    "total": 0.795
  },
  "history": [0.51, 0.58, 0.66, 0.795]
}"#;
    println!("{example}");
    Ok(())
}
