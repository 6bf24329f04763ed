use crate::Reports::report_errors::ReportError;
use crate::Reports::sheet_grid::{Cell, SheetGrid};
use crate::Reports::summary_table::SummaryTable;
use log::info;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const CALC_SHEET: &str = "Calculated";
pub const PARSE_SHEET: &str = "Parsed";
pub const SUMMARY_SHEET: &str = "Summary";

/// worksheet coordinates of a grid cell
pub fn cell_index(row: usize, col: usize) -> Result<(u32, u16), ReportError> {
    match (u32::try_from(row), u16::try_from(col)) {
        (Ok(r), Ok(c)) => Ok((r, c)),
        _ => Err(ReportError::CellOutOfRange { row, col }),
    }
}

fn fill_workbook(grid: &SheetGrid, sheet_name: &str) -> Result<Workbook, ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;
    for (col, column) in grid.columns().iter().enumerate() {
        for (row, cell) in column.iter().enumerate() {
            let (r, c) = cell_index(row, col)?;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(r, c, text)?;
                }
                Cell::Number(v) => {
                    worksheet.write_number(r, c, *v)?;
                }
            }
        }
    }
    Ok(workbook)
}

/// Writes the grid to a new workbook with one sheet. An existing file is replaced.
pub fn write_grid(grid: &SheetGrid, path: &Path, sheet_name: &str) -> Result<(), ReportError> {
    let mut workbook = fill_workbook(grid, sheet_name)?;
    workbook.save(path)?;
    info!("Saved '{}'", path.display());
    Ok(())
}

/// the workbook as bytes, without touching the file system
pub fn grid_to_buffer(grid: &SheetGrid, sheet_name: &str) -> Result<Vec<u8>, ReportError> {
    let mut workbook = fill_workbook(grid, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

pub fn write_summary(table: &SummaryTable, path: &Path) -> Result<(), ReportError> {
    if table.is_empty() {
        return Err(ReportError::EmptyBatch);
    }
    write_grid(&table.to_grid(), path, SUMMARY_SHEET)
}
