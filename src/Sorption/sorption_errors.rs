use thiserror::Error;

/// error types for the isotherm parsing and the BET/BJH calculations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SorptionError {
    /// anchor of the table was not found in the export or the table had no rows
    #[error("{anchor} was not found. Check the TriStar file")]
    NotFound { anchor: String },
    /// anchor matched but there are too few points for the calculation
    #[error("{stage}: {found} point(s) available, at least {required} required")]
    InsufficientData {
        stage: &'static str,
        found: usize,
        required: usize,
    },
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),
}

impl SorptionError {
    pub fn not_found(anchor: &str) -> Self {
        SorptionError::NotFound {
            anchor: anchor.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SorptionError::NotFound { .. })
    }
}
