//! # Vendor report
//!
//! The TriStar software prints its own results into the export: a summary block
//! ("BET Surface Area: 245.1234 m²/g", "Sample Mass: 0.1032 g", ...) and BJH tables for both branches.
//! This module collects those numbers as they are, without recalculation, so that they can be compared
//! with the values calculated by `BET` and `BJH` or simply gathered into one spreadsheet.
use crate::Sorption::isotherm::{Branch, Isotherm};
use crate::Sorption::sorption_errors::SorptionError;
use crate::Sorption::table_scanner::{TableAnchor, find_table, parse_number};
use log::{info, warn};
use regex::Regex;

/// summary values searched in the export
pub const SUMMARY_VALUES: [&str; 8] = [
    "BET surface area",
    "BJH Adsorption cumulative surface area of pores",
    "BJH Desorption cumulative surface area of pores",
    "BJH Adsorption cumulative volume of pores",
    "BJH Desorption cumulative volume of pores",
    "BJH Adsorption average pore",
    "BJH Desorption average pore",
    "Sample Mass",
];

/// Finds "<name> <description>: <value> <unit>" and returns value and unit.
/// The description may span several lines, e.g. "BJH Desorption average pore width (4V/A):".
pub fn parse_summary_value(text: &str, name: &str) -> Option<(f64, String)> {
    let pattern = format!(
        r"(?i){}[ \w.,\n\r()/]*: +(\d+(?:[.,]+[\de-]+)?),?\s+(\S+)",
        regex::escape(name)
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("invalid summary pattern for {}: {}", name, e);
            return None;
        }
    };
    let caps = re.captures(text)?;
    let value = parse_number(caps.get(1)?.as_str())?;
    let unit = caps.get(2)?.as_str().to_string();
    Some((value, unit))
}

/// BJH tables printed by the instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorTable {
    DvDlogwPoreVolume(Branch),
    CumulativePoreVolume(Branch),
    DaDlogwPoreArea(Branch),
    CumulativePoreArea(Branch),
}

const PORE_SIZE: &[&str] = &["pore width (nm)", "pore diameter (nm)"];

impl VendorTable {
    /// tables in the order they are written to the spreadsheet
    pub fn all() -> Vec<VendorTable> {
        use VendorTable::*;
        let mut tables = Vec::new();
        for make in [DvDlogwPoreVolume, CumulativePoreVolume, DaDlogwPoreArea, CumulativePoreArea] {
            tables.push(make(Branch::Desorption));
            tables.push(make(Branch::Adsorption));
        }
        tables
    }

    pub fn branch(&self) -> Branch {
        match self {
            VendorTable::DvDlogwPoreVolume(b)
            | VendorTable::CumulativePoreVolume(b)
            | VendorTable::DaDlogwPoreArea(b)
            | VendorTable::CumulativePoreArea(b) => *b,
        }
    }

    pub fn anchor(&self) -> TableAnchor {
        use Branch::*;
        use VendorTable::*;
        match self {
            DvDlogwPoreVolume(Desorption) => TableAnchor::new(
                "BJH Desorption dV/dlog(w) Pore Volume",
                &[&["bjh desorption dv/dlog"], PORE_SIZE, &["pore volume (cm"]],
            ),
            DvDlogwPoreVolume(Adsorption) => TableAnchor::new(
                "BJH Adsorption dV/dlog(w) Pore Volume",
                &[&["bjh adsorption dv/dlog"], PORE_SIZE, &["pore volume (cm"]],
            ),
            CumulativePoreVolume(Desorption) => TableAnchor::new(
                "BJH Desorption Cumulative Pore Volume",
                &[&["bjh desorption cumulative"], PORE_SIZE, &["pore volume (cm"]],
            ),
            CumulativePoreVolume(Adsorption) => TableAnchor::new(
                "BJH Adsorption Cumulative Pore Volume",
                &[&["bjh adsorption cumulative"], PORE_SIZE, &["pore volume (cm"]],
            ),
            DaDlogwPoreArea(Desorption) => TableAnchor::new(
                "BJH Desorption dA/dlog(w) Pore Area",
                &[&["bjh desorption da/dlog"], PORE_SIZE, &["pore area (m"]],
            ),
            DaDlogwPoreArea(Adsorption) => TableAnchor::new(
                "BJH Adsorption dA/dlog(w) Pore Area",
                &[&["bjh adsorption da/dlog"], PORE_SIZE, &["pore area (m"]],
            ),
            CumulativePoreArea(Desorption) => TableAnchor::new(
                "BJH Desorption Cumulative Pore Area",
                &[&["bjh desorption cumulative"], PORE_SIZE, &["pore area (m"]],
            ),
            CumulativePoreArea(Adsorption) => TableAnchor::new(
                "BJH Adsorption Cumulative Pore Area",
                &[&["bjh adsorption cumulative"], PORE_SIZE, &["pore area (m"]],
            ),
        }
    }

    pub fn title(&self) -> &'static str {
        self.anchor().name
    }

    /// title and unit of the value column
    pub fn value_header(&self) -> (&'static str, &'static str) {
        match self {
            VendorTable::DvDlogwPoreVolume(_) => ("Pore Volume", "dV/dlog(w)"),
            VendorTable::CumulativePoreVolume(_) => ("Pore Volume", "cm³/g"),
            VendorTable::DaDlogwPoreArea(_) => ("Pore Area", "dA/dlog(w)"),
            VendorTable::CumulativePoreArea(_) => ("Pore Area", "m²/g"),
        }
    }

    pub fn parse(&self, text: &str) -> Result<Vec<(f64, f64)>, SorptionError> {
        find_table(text, &self.anchor())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorValue {
    pub name: &'static str,
    pub unit: String,
    pub value: Option<f64>,
}

/// everything the instrument reported about one sample
#[derive(Debug, Clone, PartialEq)]
pub struct VendorReport {
    pub summary: Vec<VendorValue>,
    pub isotherm: Isotherm,
    /// tables in the order of `VendorTable::all()`, empty when not found
    pub tables: Vec<(VendorTable, Vec<(f64, f64)>)>,
}

impl VendorReport {
    pub fn from_text(text: &str) -> Self {
        info!("Searching for summary values...");
        let summary = SUMMARY_VALUES
            .iter()
            .map(|&name| match parse_summary_value(text, name) {
                Some((value, unit)) => VendorValue {
                    name,
                    unit,
                    value: Some(value),
                },
                None => {
                    warn!("No {} was found. Check the TriStar file", name);
                    VendorValue {
                        name,
                        unit: String::new(),
                        value: None,
                    }
                }
            })
            .collect();

        let isotherm = Isotherm::from_text(text);

        let tables = VendorTable::all()
            .into_iter()
            .map(|table| {
                info!("Searching for {} data...", table.title());
                let rows = table.parse(text).unwrap_or_else(|e| {
                    warn!("{}", e);
                    Vec::new()
                });
                (table, rows)
            })
            .collect();

        Self {
            summary,
            isotherm,
            tables,
        }
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.summary
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .and_then(|v| v.value)
    }
}
