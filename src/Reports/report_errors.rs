use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write the workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    /// no sample of the batch produced a report
    #[error("Nothing to write: no sample was processed")]
    EmptyBatch,
    #[error("Cell (row {row}, column {col}) is outside the worksheet")]
    CellOutOfRange { row: usize, col: usize },
}
