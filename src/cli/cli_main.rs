use super::tasks::{BatchOutcome, Mode, TaskError, convert_path, process_path};
use crate::Utils::load_from_file::LoadError;
use crate::settings::CalcConfig;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "porokit")]
#[command(about = "BET and BJH data reduction for Micromeritics TriStar II exports", version)]
pub struct Cli {
    /// Path to JSON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Overwrite existing xlsx files without asking
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate BET surface area and BJH pore size distribution from the isotherm
    Calc {
        /// TriStar export or directory of exports
        path: PathBuf,
        /// Lower pore diameter of the user window, nm
        #[arg(long)]
        start_diameter: Option<f64>,
        /// Upper pore diameter of the user window, nm
        #[arg(long)]
        end_diameter: Option<f64>,
    },
    /// Collect the values and tables computed by the instrument software
    Parse {
        /// TriStar export or directory of exports
        path: PathBuf,
    },
    /// Rewrite legacy exports as UTF-16LE
    Convert {
        /// Export or directory of exports
        path: PathBuf,
        /// Encoding of the legacy files
        #[arg(long, default_value = "windows-1252")]
        from: String,
    },
}

/// Asks the question and reads the answer; only "y" or "yes" confirm.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    writeln!(output, "\x1b[36m{}\x1b[0m", question)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn load_config(path: Option<&Path>) -> Result<CalcConfig, TaskError> {
    match path {
        Some(path) => Ok(CalcConfig::from_json_file(path)?),
        None => Ok(CalcConfig::default()),
    }
}

fn print_outcome(outcome: &BatchOutcome) {
    println!();
    println!("\x1b[33mWritten: {}\x1b[0m", outcome.processed.len());
    for path in &outcome.processed {
        println!("  {}", path.display());
    }
    if let Some(summary) = &outcome.summary_path {
        println!("\x1b[33mSummary: {}\x1b[0m", summary.display());
    }
    if !outcome.failed.is_empty() {
        println!("\x1b[31mFailed: {}\x1b[0m", outcome.failed.len());
        for (path, reason) in &outcome.failed {
            println!("  {}: {}", path.display(), reason);
        }
    }
}

fn run_mode(cli: &Cli, mode: Mode, path: &Path, config: &CalcConfig) -> Result<(), TaskError> {
    if !cli.yes {
        let stdin = io::stdin();
        let confirmed = confirm(mode.question(), &mut stdin.lock(), &mut io::stdout())
            .map_err(|e| LoadError::Io {
                path: "stdin".to_string(),
                source: e,
            })?;
        if !confirmed {
            println!("Aborting");
            return Ok(());
        }
    }
    let outcome = process_path(path, mode, config)?;
    print_outcome(&outcome);
    Ok(())
}

/// Runs the parsed command line, returns the exit code.
pub fn run(cli: Cli) -> i32 {
    let result = load_config(cli.config.as_deref()).and_then(|mut config| {
        match &cli.command {
            Commands::Calc {
                path,
                start_diameter,
                end_diameter,
            } => {
                if let Some(d) = start_diameter {
                    config.diameters.start_diameter = *d;
                }
                if let Some(d) = end_diameter {
                    config.diameters.end_diameter = *d;
                }
                config.validate()?;
                info!(
                    "User pore diameter window {}..{} nm",
                    config.diameters.start_diameter, config.diameters.end_diameter
                );
                run_mode(&cli, Mode::Calc, path, &config)
            }
            Commands::Parse { path } => run_mode(&cli, Mode::Parse, path, &config),
            Commands::Convert { path, from } => {
                let converted = convert_path(path, from, &config.extension)?;
                println!("Converted {} file(s) to UTF-16LE", converted.len());
                Ok(())
            }
        }
    });
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            println!("Error: {}", e);
            1
        }
    }
}
