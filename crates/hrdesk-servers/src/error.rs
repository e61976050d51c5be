use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatastoreError {
    #[error("Employee '{0}' not found")]
    EmployeeNotFound(String),

    #[error("Number of days must be positive, got {0}")]
    InvalidDays(i64),

    #[error("Insufficient balance: requested {requested} day(s), {available} available")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("Ledger entry for '{employee}' has a negative balance ({balance})")]
    NegativeBalance { employee: String, balance: i64 },

    #[error("Ledger file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DatastoreError>;
