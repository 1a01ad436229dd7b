//! The module contains the errors the expense store can throw.
//!
//! Validation errors ([`MissingField`], [`TooLong`], [`InvalidAmount`],
//! [`InvalidDate`]) are raised before anything is written, so a failed
//! mutation leaves the stored collection unchanged.
//!
//! [`MissingField`]: StoreError::MissingField
//! [`TooLong`]: StoreError::TooLong
//! [`InvalidAmount`]: StoreError::InvalidAmount
//! [`InvalidDate`]: StoreError::InvalidDate
use sea_orm::DbErr;
use thiserror::Error;

/// Expense store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("\"{0}\" is required")]
    MissingField(&'static str),
    #[error("\"{field}\" must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Expense {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (
                Self::TooLong { field: a, max: am },
                Self::TooLong { field: b, max: bm },
            ) => a == b && am == bm,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
