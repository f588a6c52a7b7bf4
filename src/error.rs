use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Parse error on row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Dataset is empty: no transactions were loaded")]
    EmptyDataset,

    #[error("Invalid filter: {0}")]
    InvalidFilterRange(String),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn parse(row: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            row,
            message: message.into(),
        }
    }

    /// Message suitable for a "no data" / error banner in the view.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyDataset => "No data".to_string(),
            AppError::InvalidFilterRange(msg) => msg.clone(),
            AppError::InvalidAmount(msg) => format!("Invalid amount: {}", msg),
            AppError::Parse { row, message } => format!("Row {}: {}", row, message),
            AppError::CsvParse(msg) => format!("Could not read ledger: {}", msg),
            AppError::Config(msg) => msg.clone(),
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Internal error".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                "Could not read ledger file".to_string()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
