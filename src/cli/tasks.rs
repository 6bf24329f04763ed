use crate::Reports::report_builder::SampleReport;
use crate::Reports::report_errors::ReportError;
use crate::Reports::sheet_grid::SheetGrid;
use crate::Reports::summary_table::SummaryTable;
use crate::Reports::xlsx_writer::{CALC_SHEET, PARSE_SHEET, write_grid, write_summary};
use crate::Sorption::sample_calc::SampleCalculation;
use crate::Sorption::sorption_errors::SorptionError;
use crate::Sorption::vendor_report::VendorReport;
use crate::Utils::load_from_file::{
    LoadData, LoadError, convert_to_utf16le, encoding_for_label, list_inputs, output_path,
    sample_name,
};
use crate::settings::{CalcConfig, ConfigError};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Sorption(#[from] SorptionError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// calculate BET/BJH from the isotherm or collect the values printed by the instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Calc,
    Parse,
}

impl Mode {
    pub fn output_suffix(&self) -> &'static str {
        match self {
            Mode::Calc => "_calc",
            Mode::Parse => "",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Mode::Calc => CALC_SHEET,
            Mode::Parse => PARSE_SHEET,
        }
    }

    pub fn summary_file(&self) -> &'static str {
        match self {
            Mode::Calc => "summary_calc.xlsx",
            Mode::Parse => "summary.xlsx",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Mode::Calc => "Calculating",
            Mode::Parse => "Parsing",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            Mode::Calc => {
                "The calculation will override all the existing xlsx files. Do you want to continue (y/n)?"
            }
            Mode::Parse => {
                "The parsing will override all the existing xlsx files. Do you want to continue (y/n)?"
            }
        }
    }
}

/// Reads one export and builds its report, nothing is written.
pub fn build_report(path: &Path, mode: Mode, config: &CalcConfig) -> Result<SampleReport, TaskError> {
    let data = LoadData::with_encoding(path, &config.encoding)?;
    let text = data.load_text()?;
    let sample = data.sample_name();
    let report = match mode {
        Mode::Calc => {
            let calc = SampleCalculation::from_text(&text, &config.bet_window, &config.diameters);
            if calc.isotherm.is_empty() {
                return Err(SorptionError::not_found("Adsorption-desorption isotherm").into());
            }
            SampleReport::from_calculation(&sample, &calc, &config.report)
        }
        Mode::Parse => SampleReport::from_vendor(&sample, &VendorReport::from_text(&text)),
    };
    Ok(report)
}

/// Builds the report of one export and writes it next to the input.
/// Nothing is written when the file can not be read.
pub fn process_file(
    path: &Path,
    mode: Mode,
    config: &CalcConfig,
) -> Result<(SampleReport, PathBuf), TaskError> {
    let report = build_report(path, mode, config)?;
    let out = output_path(path, mode.output_suffix());
    let grid = SheetGrid::from_report(&report, config.report.write_summary);
    write_grid(&grid, &out, mode.sheet_name())?;
    Ok((report, out))
}

/// result of a directory run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub summary_path: Option<PathBuf>,
}

/// Processes every export of the directory. A failed file is reported and the batch goes on;
/// the aggregate summary gets an empty row for it.
pub fn process_dir(dir: &Path, mode: Mode, config: &CalcConfig) -> Result<BatchOutcome, TaskError> {
    let files = list_inputs(dir, &config.extension)?;
    info!("{} file(s) found in '{}'", files.len(), dir.display());
    let mut outcome = BatchOutcome::default();
    let mut table = SummaryTable::new();
    for path in &files {
        println!("\n{} {}...", mode.verb(), path.display());
        match process_file(path, mode, config) {
            Ok((report, out)) => {
                report.print_summary();
                table.add_report(&report);
                outcome.processed.push(out);
                println!("Done!");
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                println!("Error: {}", e);
                table.add_failed(&sample_name(path));
                outcome.failed.push((path.clone(), e.to_string()));
            }
        }
    }

    println!("\nSaving summaries...");
    let summary_path = dir.join(mode.summary_file());
    match write_summary(&table, &summary_path) {
        Ok(()) => outcome.summary_path = Some(summary_path),
        Err(ReportError::EmptyBatch) => warn!("No files with extension '{}' in '{}'", config.extension, dir.display()),
        Err(e) => return Err(e.into()),
    }
    Ok(outcome)
}

/// file or directory
pub fn process_path(path: &Path, mode: Mode, config: &CalcConfig) -> Result<BatchOutcome, TaskError> {
    if path.is_dir() {
        process_dir(path, mode, config)
    } else if path.is_file() {
        let (report, out) = process_file(path, mode, config)?;
        report.print_summary();
        Ok(BatchOutcome {
            processed: vec![out],
            ..BatchOutcome::default()
        })
    } else {
        Err(LoadError::NotFound(path.display().to_string()).into())
    }
}

/// Rewrites every export of the directory (or a single file) as UTF-16LE.
/// Returns the converted files; a file that fails is reported and skipped.
pub fn convert_path(path: &Path, from: &str, extension: &str) -> Result<Vec<PathBuf>, TaskError> {
    let encoding = encoding_for_label(from)?;
    let files = if path.is_dir() {
        list_inputs(path, extension)?
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return Err(LoadError::NotFound(path.display().to_string()).into());
    };
    let mut converted = Vec::new();
    for file in files {
        match convert_to_utf16le(&file, encoding) {
            Ok(()) => converted.push(file),
            Err(e) => {
                error!("{}", e);
                println!("Error: {}", e);
            }
        }
    }
    Ok(converted)
}
