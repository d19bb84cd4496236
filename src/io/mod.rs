pub mod csv_export;
pub mod csv_import;
pub mod file;

pub use file::{default_board_path, load_or_default, load_store, save_store};

use thiserror::Error;

/// Errors crossing the persistence boundary.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}
