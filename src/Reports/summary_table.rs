use crate::Reports::report_builder::SampleReport;
use crate::Reports::sheet_grid::{Cell, SheetGrid};
use log::info;

/// Summary values of a batch of samples, one row per sample.
/// Columns are the union of the summary titles in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    /// (title, unit)
    pub columns: Vec<(String, String)>,
    /// sample name and values by column index, shorter rows are null-padded
    pub rows: Vec<(String, Vec<Option<f64>>)>,
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn column_index(&mut self, title: &str, unit: &str) -> usize {
        match self.columns.iter().position(|(t, _)| t == title) {
            Some(i) => i,
            None => {
                self.columns.push((title.to_string(), unit.to_string()));
                self.columns.len() - 1
            }
        }
    }

    pub fn add_report(&mut self, report: &SampleReport) {
        let mut values: Vec<Option<f64>> = Vec::new();
        for entry in &report.summary {
            let i = self.column_index(&entry.title, &entry.unit);
            if values.len() <= i {
                values.resize(i + 1, None);
            }
            values[i] = entry.value;
        }
        self.rows.push((report.sample.clone(), values));
    }

    /// a sample that failed entirely still gets its row
    pub fn add_failed(&mut self, sample: &str) {
        info!("{} has no summary values", sample);
        self.rows.push((sample.to_string(), Vec::new()));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// row 0: "Sample" and titles, row 1: units, then one row per sample
    pub fn to_grid(&self) -> SheetGrid {
        let mut grid = SheetGrid::new();
        grid.set(0, 0, Cell::text("Sample"));
        grid.set(1, 0, Cell::text(""));
        for (col, (title, unit)) in self.columns.iter().enumerate() {
            grid.set(0, col + 1, Cell::text(title));
            grid.set(1, col + 1, Cell::text(unit));
        }
        for (row, (sample, values)) in self.rows.iter().enumerate() {
            grid.set(row + 2, 0, Cell::text(sample));
            for col in 0..self.columns.len() {
                let value = values.get(col).copied().flatten();
                grid.set(row + 2, col + 1, Cell::optional(value));
            }
        }
        grid
    }
}
