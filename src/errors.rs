//! Unified application error type.
//! All modules (db, core, state, cli, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Unknown workplace: {0}")]
    UnknownWorkplace(String),

    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("Shift not found: {0}")]
    ShiftNotFound(String),

    #[error("Workplace not found: {0}")]
    WorkplaceNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("A user with email '{0}' already exists")]
    DuplicateUser(String),

    #[error("No active user: run `tiplogger user add <email>` or pass --user <email>")]
    NoActiveUser,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
