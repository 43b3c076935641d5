use std::io::Read;
use std::path::PathBuf;

use cribsheet_core::{
    Grade, HintEvent, Puzzle, ScoringConfig, Submission, SubmissionGrade, UnitId,
};
use eyre::{Context, Result};
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cribsheet command-line interface
///
/// Puzzles and submissions are read as JSON and results are printed as JSON.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Scoring config file (YAML) layered over the built-in defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Grade a puzzle.
    Grade {
        /// Puzzle file, use '-' for stdin.
        #[arg(value_parser)]
        puzzle_file: clio::Input,
    },
    /// Check one value for one unit of a puzzle.
    Check {
        /// Puzzle file, use '-' for stdin.
        #[arg(value_parser)]
        puzzle_file: clio::Input,
        /// Unit to check (such as `K`, `12`, `m0,1`, or `k3`).
        unit: UnitId,
        /// Value entered for the unit.
        value: String,
    },
    /// Set the answer for one unit and print the updated puzzle.
    Answer {
        /// Puzzle file, use '-' for stdin.
        #[arg(value_parser)]
        puzzle_file: clio::Input,
        /// Unit to answer (such as `K`, `12`, `m0,1`, or `k3`).
        unit: UnitId,
        /// Value to enter, or nothing to clear the unit.
        #[arg(default_value = "")]
        value: String,
    },
    /// Apply hints to a puzzle and print the updated puzzle and what each
    /// hint was.
    Hint {
        /// Puzzle file, use '-' for stdin.
        #[arg(value_parser)]
        puzzle_file: clio::Input,
        /// Seed for reproducible reveals. A random seed is used if omitted.
        #[arg(short, long)]
        seed: Option<String>,
        /// Number of hints to request.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print the point value of a puzzle.
    Points {
        /// Puzzle file, use '-' for stdin.
        #[arg(value_parser)]
        puzzle_file: clio::Input,
        /// Point value that takes priority over the puzzle's own, if positive.
        #[arg(long = "override")]
        override_points: Option<f64>,
    },
    /// Grade every puzzle of a submission.
    Submission {
        /// Submission file, use '-' for stdin.
        #[arg(value_parser)]
        submission_file: clio::Input,
    },
}

#[derive(Serialize, Debug)]
struct GradeReport {
    #[serde(flatten)]
    grade: Grade,
    progress: f64,
    solved: bool,
}

#[derive(Serialize, Debug)]
struct CheckReport {
    unit: UnitId,
    correct: bool,
}

#[derive(Serialize, Debug)]
struct HintReport {
    seed: String,
    events: Vec<HintEvent>,
    puzzle: Puzzle,
}

#[derive(Serialize, Debug)]
struct SubmissionReport {
    #[serde(flatten)]
    grade: SubmissionGrade,
    average_progress: f64,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let config = ScoringConfig::load(args.config.as_deref()).context("error loading scoring config")?;

    match args.subcommand {
        Subcommand::Grade { mut puzzle_file } => {
            let puzzle: Puzzle = read_json_input(&mut puzzle_file, "puzzle")?;
            write_json_output(&GradeReport {
                grade: cribsheet_core::grade_puzzle(&puzzle, &config),
                progress: cribsheet_core::progress(&puzzle, &config),
                solved: cribsheet_core::is_solved(&puzzle, &config),
            })
        }

        Subcommand::Check {
            mut puzzle_file,
            unit,
            value,
        } => {
            let puzzle: Puzzle = read_json_input(&mut puzzle_file, "puzzle")?;
            let correct = cribsheet_core::is_unit_correct(&puzzle, unit, &value);
            write_json_output(&CheckReport { unit, correct })
        }

        Subcommand::Answer {
            mut puzzle_file,
            unit,
            value,
        } => {
            let puzzle: Puzzle = read_json_input(&mut puzzle_file, "puzzle")?;
            write_json_output(&puzzle.apply_answer(unit, &value))
        }

        Subcommand::Hint {
            mut puzzle_file,
            seed,
            count,
        } => {
            let mut puzzle: Puzzle = read_json_input(&mut puzzle_file, "puzzle")?;
            let seed = seed.unwrap_or_else(|| rand::rng().random::<u64>().to_string());
            log::info!("hint seed: {seed}");
            let mut rng = cribsheet_core::hint_rng(&seed);
            let mut events = vec![];
            for _ in 0..count {
                let (next, event) = puzzle.apply_hint(&mut rng, &config);
                puzzle = next;
                let exhausted = event == HintEvent::Exhausted;
                events.push(event);
                if exhausted {
                    break;
                }
            }
            write_json_output(&HintReport { seed, events, puzzle })
        }

        Subcommand::Points {
            mut puzzle_file,
            override_points,
        } => {
            let puzzle: Puzzle = read_json_input(&mut puzzle_file, "puzzle")?;
            write_json_output(&cribsheet_core::resolve_points(&puzzle, override_points, &config))
        }

        Subcommand::Submission {
            mut submission_file,
        } => {
            let submission: Submission = read_json_input(&mut submission_file, "submission")?;
            write_json_output(&SubmissionReport {
                grade: cribsheet_core::grade_submission(&submission, &config),
                average_progress: cribsheet_core::average_progress(&submission.puzzles, &config),
            })
        }
    }
}

fn read_json_input<T: DeserializeOwned>(input: &mut clio::Input, what: &str) -> Result<T> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .with_context(|| format!("error reading {what} file"))?;
    serde_json::from_str(&buffer).with_context(|| format!("error deserializing {what} file"))
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
