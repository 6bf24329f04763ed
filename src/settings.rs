//! # Settings Module
//!
//! ## Purpose
//! Calculation and report settings of PoroKit. All values have defaults, a JSON file may override any of them.
//! The settings are read once at start and passed by reference to every stage.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "diameters": { "start_diameter": 2.5, "end_diameter": 90.0 },
//!   "bet_window": { "min_pressure": 0.05, "max_pressure": 0.3 },
//!   "encoding": "utf-16le",
//!   "extension": "txt",
//!   "report": {
//!     "summary": ["bet_A", "total_A_user", "total_V_full", "ave_D_user"],
//!     "graphs": ["iso_p", "iso_q", "D", "dV_dD", "dV_dlogD", "V", "dA_dD", "dA_dlogD", "A"],
//!     "write_summary": true
//!   }
//! }
//! ```
//! Unknown fields and unknown quantity keys are rejected.

use crate::Reports::quantities::Quantity;
use crate::Sorption::BET::BetWindow;
use crate::Sorption::BJH::DiameterWindow;
use crate::Utils::load_from_file::encoding_for_label;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// which quantities go to the summary block and to the graph columns of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub summary: Vec<Quantity>,
    pub graphs: Vec<Quantity>,
    /// write the summary block at the top left of each per-file sheet
    pub write_summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        use Quantity::*;
        Self {
            summary: vec![BetArea, TotalAreaUser, TotalVolumeFull, AverageDiameterUser],
            graphs: vec![
                IsoP, IsoQ, Diameter, DvDd, DvDlogd, CumVolume, DaDd, DaDlogd, CumArea,
            ],
            write_summary: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalcConfig {
    pub diameters: DiameterWindow,
    pub bet_window: BetWindow,
    /// encoding label of the input files
    pub encoding: String,
    /// extension of the input files when a directory is processed
    pub extension: String,
    pub report: ReportConfig,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            diameters: DiameterWindow::default(),
            bet_window: BetWindow::default(),
            encoding: "utf-16le".to_string(),
            extension: "txt".to_string(),
            report: ReportConfig::default(),
        }
    }
}

impl CalcConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: CalcConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        info!("Settings loaded from '{}'", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.diameters;
        if !(d.start_diameter > 0.0 && d.start_diameter < d.end_diameter) {
            return Err(ConfigError::Invalid(format!(
                "pore diameter window {}..{} nm is empty",
                d.start_diameter, d.end_diameter
            )));
        }
        let w = &self.bet_window;
        if !(w.min_pressure >= 0.0 && w.min_pressure < w.max_pressure && w.max_pressure <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "BET window {}..{} is not inside 0..1",
                w.min_pressure, w.max_pressure
            )));
        }
        if let Some(q) = self.report.summary.iter().find(|q| !q.is_scalar()) {
            return Err(ConfigError::Invalid(format!(
                "'{}' is a series and can not be a summary value",
                q.key()
            )));
        }
        if let Some(q) = self.report.graphs.iter().find(|q| q.is_scalar()) {
            return Err(ConfigError::Invalid(format!(
                "'{}' is a single value and can not be a graph column",
                q.key()
            )));
        }
        for list in [&self.report.summary, &self.report.graphs] {
            let mut seen = HashSet::new();
            if let Some(q) = list.iter().find(|q| !seen.insert(**q)) {
                return Err(ConfigError::Invalid(format!("'{}' is listed twice", q.key())));
            }
        }
        encoding_for_label(&self.encoding).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}
