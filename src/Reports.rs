/// eng
/// Keys, titles and units of every reportable quantity. The keys are used in the configuration file.
pub mod quantities;
pub mod report_errors;
/// eng
/// Assembles the report of one sample from the calculated values or from the values printed by the instrument:
/// a summary block of single values and a list of graph columns.
pub mod report_builder;
/// eng
/// Spreadsheet layout of a report as a grid of cells; ragged columns are padded with empty cells.
pub mod sheet_grid;
/// eng
/// Aggregate table of the summary values of a batch, one row per sample.
pub mod summary_table;
pub mod xlsx_writer;
