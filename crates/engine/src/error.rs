//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`AccountNotFound`] thrown when an account number is not in storage.
//! - [`InvalidAmount`] thrown when a monetary amount is rejected.
//! - [`DataCorruption`] thrown when a stored row cannot be read back.
//!
//!  [`AccountNotFound`]: EngineError::AccountNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`DataCorruption`]: EngineError::DataCorruption
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("The given account \"{0}\" is invalid!")]
    AccountNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Corrupted data: {0}")]
    DataCorruption(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountNotFound(a), Self::AccountNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::DataCorruption(a), Self::DataCorruption(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
