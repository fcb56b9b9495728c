use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must have columns: {required:?}. Found: {found:?}")]
    MissingColumns {
        required: Vec<String>,
        found: Vec<String>,
    },
}
