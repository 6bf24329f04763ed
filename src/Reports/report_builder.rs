use crate::Reports::quantities::{Quantity, Source};
use crate::Sorption::BET::BetFit;
use crate::Sorption::BJH::BjhResult;
use crate::Sorption::isotherm::{Branch, Isotherm, pressures, quantities};
use crate::Sorption::sample_calc::SampleCalculation;
use crate::Sorption::vendor_report::VendorReport;
use crate::settings::ReportConfig;
use prettytable::{Cell, Row, Table};

/// one value of the summary block
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub title: String,
    pub unit: String,
    /// None when the stage producing it failed or the value is undefined
    pub value: Option<f64>,
}

/// one column of the graph block: title, unit, label and the values below them
#[derive(Debug, Clone, PartialEq)]
pub struct GraphColumn {
    pub title: String,
    pub unit: String,
    /// third header row, usually the sample name
    pub label: String,
    pub values: Vec<f64>,
}

/// everything written about one sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub sample: String,
    pub summary: Vec<SummaryEntry>,
    pub graphs: Vec<GraphColumn>,
}

fn bet_value(fit: &BetFit, q: Quantity) -> Option<f64> {
    match q {
        Quantity::BetArea => Some(fit.surface_area),
        Quantity::BetAreaErr => Some(fit.surface_area_err),
        Quantity::BetR => Some(fit.r_value),
        _ => None,
    }
}

fn bet_series(fit: &BetFit, q: Quantity) -> Option<&[f64]> {
    match q {
        Quantity::BetX => Some(fit.x.as_slice()),
        Quantity::BetY => Some(fit.y.as_slice()),
        Quantity::BetYCalc => Some(fit.y_calc.as_slice()),
        _ => None,
    }
}

fn isotherm_series(isotherm: &Isotherm, q: Quantity) -> Option<Vec<f64>> {
    match q {
        Quantity::IsoP => Some(pressures(&isotherm.merged)),
        Quantity::IsoQ => Some(quantities(&isotherm.merged)),
        Quantity::AdsP => Some(pressures(&isotherm.adsorption)),
        Quantity::AdsQ => Some(quantities(&isotherm.adsorption)),
        Quantity::DesP => Some(pressures(&isotherm.desorption)),
        Quantity::DesQ => Some(quantities(&isotherm.desorption)),
        _ => None,
    }
}

fn bjh_value(result: &BjhResult, q: Quantity) -> Option<f64> {
    let s = &result.summary;
    match q {
        Quantity::TotalVolumeUser => s.total_volume_user,
        Quantity::TotalVolumeFull => Some(s.total_volume_full),
        Quantity::TotalAreaUser => s.total_area_user,
        Quantity::TotalAreaFull => Some(s.total_area_full),
        Quantity::MaxDiameterUser => s.peak_diameter_user,
        Quantity::MaxDiameterFull => Some(s.peak_diameter_full),
        Quantity::AverageDiameterUser => s.average_diameter_user,
        Quantity::AverageDiameterFull => s.average_diameter_full,
        _ => None,
    }
}

fn bjh_series(result: &BjhResult, q: Quantity) -> Option<&[f64]> {
    let s = &result.series;
    match q {
        Quantity::Diameter => Some(s.diameter.as_slice()),
        Quantity::DiffVolume => Some(s.diff_volume.as_slice()),
        Quantity::CumVolume => Some(s.cum_volume.as_slice()),
        Quantity::DvDd => Some(s.dv_dd.as_slice()),
        Quantity::DvDlogd => Some(s.dv_dlogd.as_slice()),
        Quantity::DiffArea => Some(s.diff_area.as_slice()),
        Quantity::CumArea => Some(s.cum_area.as_slice()),
        Quantity::DaDd => Some(s.da_dd.as_slice()),
        Quantity::DaDlogd => Some(s.da_dlogd.as_slice()),
        _ => None,
    }
}

impl SampleReport {
    pub fn new(sample: &str) -> Self {
        Self {
            sample: sample.to_string(),
            summary: Vec::new(),
            graphs: Vec::new(),
        }
    }

    fn push_value(&mut self, prefix: &str, q: Quantity, value: Option<f64>) {
        self.summary.push(SummaryEntry {
            title: format!("{}{}", prefix, q.title()),
            unit: q.unit().to_string(),
            value,
        });
    }

    fn push_series(&mut self, prefix: &str, q: Quantity, values: Vec<f64>) {
        let label = self.sample.clone();
        self.graphs.push(GraphColumn {
            title: format!("{}{}", prefix, q.title()),
            unit: q.unit().to_string(),
            label,
            values,
        });
    }

    /// Report of the calculated values. Sources are visited in the order BET, isotherm,
    /// BJH desorption, BJH adsorption and inside each source the configured order is kept.
    pub fn from_calculation(sample: &str, calc: &SampleCalculation, config: &ReportConfig) -> Self {
        let mut report = Self::new(sample);
        let of_source = |list: &[Quantity], source: Source| -> Vec<Quantity> {
            list.iter().copied().filter(|q| q.source() == source).collect()
        };

        let bet = calc.bet.as_ref().ok();
        for q in of_source(&config.summary, Source::Bet) {
            report.push_value("", q, bet.and_then(|fit| bet_value(fit, q)));
        }
        if let Some(fit) = bet {
            for q in of_source(&config.graphs, Source::Bet) {
                if let Some(values) = bet_series(fit, q) {
                    report.push_series("", q, values.to_vec());
                }
            }
        }

        if !calc.isotherm.is_empty() {
            for q in of_source(&config.graphs, Source::Isotherm) {
                if let Some(values) = isotherm_series(&calc.isotherm, q) {
                    report.push_series("", q, values);
                }
            }
        }

        for branch in [Branch::Desorption, Branch::Adsorption] {
            let prefix = format!("{} ", branch.as_str());
            let bjh = calc.bjh(branch).as_ref().ok();
            for q in of_source(&config.summary, Source::Bjh) {
                report.push_value(&prefix, q, bjh.and_then(|r| bjh_value(r, q)));
            }
            if let Some(result) = bjh {
                for q in of_source(&config.graphs, Source::Bjh) {
                    if let Some(values) = bjh_series(result, q) {
                        report.push_series(&prefix, q, values.to_vec());
                    }
                }
            }
        }
        report
    }

    /// Report of the values printed by the instrument: the summary values, the isotherm
    /// and pairs of columns (pore width, value) for every BJH table that was found.
    pub fn from_vendor(sample: &str, vendor: &VendorReport) -> Self {
        let mut report = Self::new(sample);
        report.summary = vendor
            .summary
            .iter()
            .map(|v| SummaryEntry {
                title: v.name.to_string(),
                unit: v.unit.clone(),
                value: v.value,
            })
            .collect();

        if !vendor.isotherm.is_empty() {
            report.graphs.push(GraphColumn {
                title: Quantity::IsoP.title().to_string(),
                unit: Quantity::IsoP.unit().to_string(),
                label: "Adsorption-desorption isotherm".to_string(),
                values: pressures(&vendor.isotherm.merged),
            });
            report.graphs.push(GraphColumn {
                title: Quantity::IsoQ.title().to_string(),
                unit: Quantity::IsoQ.unit().to_string(),
                label: sample.to_string(),
                values: quantities(&vendor.isotherm.merged),
            });
        }

        for (table, rows) in vendor.tables.iter().filter(|(_, rows)| !rows.is_empty()) {
            let (title, unit) = table.value_header();
            report.graphs.push(GraphColumn {
                title: Quantity::Diameter.title().to_string(),
                unit: Quantity::Diameter.unit().to_string(),
                label: table.title().to_string(),
                values: rows.iter().map(|r| r.0).collect(),
            });
            report.graphs.push(GraphColumn {
                title: title.to_string(),
                unit: unit.to_string(),
                label: sample.to_string(),
                values: rows.iter().map(|r| r.1).collect(),
            });
        }
        report
    }

    pub fn value(&self, title: &str) -> Option<f64> {
        self.summary
            .iter()
            .find(|e| e.title == title)
            .and_then(|e| e.value)
    }

    pub fn graph(&self, title: &str) -> Option<&GraphColumn> {
        self.graphs.iter().find(|g| g.title == title)
    }

    /// summary block as a terminal table
    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new(&self.sample),
            Cell::new("Value"),
            Cell::new("Unit"),
        ]));
        for entry in &self.summary {
            let value = match entry.value {
                Some(v) => format!("{:.4}", v),
                None => "-".to_string(),
            };
            table.add_row(Row::new(vec![
                Cell::new(&entry.title),
                Cell::new(&value),
                Cell::new(&entry.unit),
            ]));
        }
        table
    }

    pub fn print_summary(&self) {
        if !self.summary.is_empty() {
            self.summary_table().printstd();
        }
    }
}
