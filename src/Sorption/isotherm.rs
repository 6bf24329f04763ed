use crate::Sorption::sorption_errors::SorptionError;
use crate::Sorption::table_scanner::{TableAnchor, find_table};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// one point of the isotherm: relative pressure p/p° and quantity adsorbed, cm³/g STP
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsothermPoint {
    pub pressure: f64,
    pub quantity: f64,
}

impl IsothermPoint {
    pub fn new(pressure: f64, quantity: f64) -> Self {
        Self { pressure, quantity }
    }
}

impl From<(f64, f64)> for IsothermPoint {
    fn from((pressure, quantity): (f64, f64)) -> Self {
        Self { pressure, quantity }
    }
}

/// adsorption or desorption leg of the isotherm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Adsorption,
    Desorption,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Adsorption => "Adsorption",
            Branch::Desorption => "Desorption",
        }
    }

    /// anchor of the isotherm table of this branch: "-  Adsorption" followed by "Relative Pressure"
    pub fn anchor(&self) -> TableAnchor {
        match self {
            Branch::Adsorption => TableAnchor::new(
                "Adsorption isotherm",
                &[&["- adsorption"], &["relative pressure"]],
            )
            .contiguous(),
            Branch::Desorption => TableAnchor::new(
                "Desorption isotherm",
                &[&["- desorption"], &["relative pressure"]],
            )
            .contiguous(),
        }
    }
}

fn by_pressure(a: &IsothermPoint, b: &IsothermPoint) -> Ordering {
    a.pressure.total_cmp(&b.pressure)
}

/// Extracts the raw rows of one branch from the text of the export.
/// Adsorption is returned in ascending pressure order, desorption in descending order.
pub fn parse_branch(text: &str, branch: Branch) -> Result<Vec<IsothermPoint>, SorptionError> {
    let rows = find_table(text, &branch.anchor())?;
    let mut points: Vec<IsothermPoint> = rows.into_iter().map(IsothermPoint::from).collect();
    match branch {
        Branch::Adsorption => points.sort_by(by_pressure),
        Branch::Desorption => points.sort_by(|a, b| by_pressure(b, a)),
    }
    Ok(points)
}

/// Both branches of the isotherm after the merge and split at the maximum pressure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Isotherm {
    /// corrected adsorption branch, descending pressure
    pub adsorption: Vec<IsothermPoint>,
    /// corrected desorption branch, descending pressure
    pub desorption: Vec<IsothermPoint>,
    /// ascending adsorption followed by descending desorption, repeated points removed
    pub merged: Vec<IsothermPoint>,
}

impl Isotherm {
    /// Joins the branches and splits them again at the global pressure maximum.
    /// Needed because the raw branches may end at different maximal pressures:
    /// adsorption gets every point up to the maximum, desorption every point from it,
    /// so the maximum belongs to both.
    pub fn from_branches(adsorption: &[IsothermPoint], desorption: &[IsothermPoint]) -> Self {
        let mut ads = adsorption.to_vec();
        ads.sort_by(by_pressure);
        let mut des = desorption.to_vec();
        des.sort_by(|a, b| by_pressure(b, a));

        // branches that already share the maximum point would otherwise carry it twice,
        // repeated readings inside a branch are kept
        if let (Some(last), Some(first)) = (ads.last(), des.first()) {
            if last == first {
                des.remove(0);
            }
        }
        let mut merged = ads;
        merged.extend(des);
        if merged.is_empty() {
            return Self::default();
        }

        // first index of the maximum
        let max_idx = merged
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| {
                if p.pressure > merged[best].pressure {
                    i
                } else {
                    best
                }
            });

        let mut adsorption: Vec<IsothermPoint> = merged[..=max_idx].to_vec();
        adsorption.reverse();
        let desorption: Vec<IsothermPoint> = merged[max_idx..].to_vec();

        Self {
            adsorption,
            desorption,
            merged,
        }
    }

    /// Parses both branches from the text of the export.
    /// A branch that is not found is reported and replaced by an empty one,
    /// so the calculations for it are skipped further on.
    pub fn from_text(text: &str) -> Self {
        info!("Searching for adsorption-desorption isotherm data...");
        let ads = parse_branch_or_empty(text, Branch::Adsorption);
        let des = parse_branch_or_empty(text, Branch::Desorption);
        Self::from_branches(&ads, &des)
    }

    pub fn branch(&self, branch: Branch) -> &[IsothermPoint] {
        match branch {
            Branch::Adsorption => &self.adsorption,
            Branch::Desorption => &self.desorption,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }
}

fn parse_branch_or_empty(text: &str, branch: Branch) -> Vec<IsothermPoint> {
    match parse_branch(text, branch) {
        Ok(points) => points,
        Err(e) => {
            warn!("{}", e);
            println!("{}", e);
            Vec::new()
        }
    }
}

/// pressures of a sequence of points
pub fn pressures(points: &[IsothermPoint]) -> Vec<f64> {
    points.iter().map(|p| p.pressure).collect()
}

/// quantities adsorbed of a sequence of points
pub fn quantities(points: &[IsothermPoint]) -> Vec<f64> {
    points.iter().map(|p| p.quantity).collect()
}
