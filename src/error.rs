//! Input-shape errors for the rostering core.
//!
//! `solve` never returns `Result` to its caller. Every failure surfaces
//! through `SolverResult::status` and `errorMessage` instead.
//! `RosterError` exists so that validation in
//! `solve::normalise` has one typed, `Display`-friendly surface instead of
//! ad hoc strings, and its `Display` output becomes the `errorMessage`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("oph must be a 7x24 grid, got {rows} rows")]
    WrongRowCount { rows: usize },

    #[error("oph row {day} must have 24 columns, got {cols}")]
    WrongColumnCount { day: usize, cols: usize },

    #[error("oph[{day}][{hour}] must be non-negative, got {value}")]
    NegativeDemand { day: usize, hour: usize, value: i64 },

    #[error("config.productivityRate must be >= 1, got {0}")]
    NonPositiveRate(i64),

    #[error("config.{field} must be in [0, 100], got {value}")]
    CapOutOfRange { field: &'static str, value: i64 },
}
