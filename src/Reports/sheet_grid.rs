use crate::Reports::report_builder::SampleReport;

/// content of one spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }

    /// NaN and infinities can not be stored as xlsx numbers, they are kept as text
    pub fn number(v: f64) -> Self {
        if v.is_finite() {
            Cell::Number(v)
        } else {
            Cell::Text(v.to_string())
        }
    }

    pub fn optional(v: Option<f64>) -> Self {
        v.map(Cell::number).unwrap_or(Cell::Empty)
    }
}

static EMPTY: Cell = Cell::Empty;

/// Column-major grid of cells. Columns may have different lengths, a missing cell reads as `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    columns: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.columns.len() <= col {
            self.columns.resize(col + 1, Vec::new());
        }
        let column = &mut self.columns[col];
        if column.len() <= row {
            column.resize(row + 1, Cell::Empty);
        }
        column[row] = cell;
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.columns
            .get(col)
            .and_then(|column| column.get(row))
            .unwrap_or(&EMPTY)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn columns(&self) -> &[Vec<Cell>] {
        &self.columns
    }

    /// rows padded to the full width
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        (0..self.n_rows())
            .map(|row| (0..self.n_cols()).map(|col| self.get(row, col).clone()).collect())
            .collect()
    }

    /// Sheet layout of one sample.
    /// With the summary block: A1 "Sample", A3 sample name, then one column per summary value
    /// (title, unit, value) and a blank column. Graph columns follow: title, unit, label, values.
    pub fn from_report(report: &SampleReport, with_summary: bool) -> Self {
        let mut grid = Self::new();
        let mut col = 0;
        if with_summary {
            grid.set(0, 0, Cell::text("Sample"));
            grid.set(2, 0, Cell::text(&report.sample));
            col = 1;
            for entry in &report.summary {
                grid.set(0, col, Cell::text(&entry.title));
                grid.set(1, col, Cell::text(&entry.unit));
                grid.set(2, col, Cell::optional(entry.value));
                col += 1;
            }
            // separator
            col += 1;
        }
        for graph in &report.graphs {
            grid.set(0, col, Cell::text(&graph.title));
            grid.set(1, col, Cell::text(&graph.unit));
            grid.set(2, col, Cell::text(&graph.label));
            for (i, v) in graph.values.iter().enumerate() {
                grid.set(3 + i, col, Cell::number(*v));
            }
            col += 1;
        }
        grid
    }
}
