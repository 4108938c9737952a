//! Earnalytics is the income-series engine behind a dashboard for tracking
//! earnings from content platforms and manually entered income streams.
//!
//! This library owns the data model and the derived analytics: each income
//! source carries a live current-month value plus a trailing monthly
//! history, and every figure the dashboard renders (trend series,
//! month-over-month changes, threshold alerts, totals, growth, variance,
//! best and worst months) is computed here from those records. Persistence,
//! rendering and authentication are the embedding application's concern;
//! the clock is always passed in so results are deterministic.

#![warn(missing_docs)]

mod catalog;
mod change;
mod insights;
mod month;
mod reconcile;
mod source;
mod validation;

pub mod db;
pub mod stores;

pub use catalog::{PlatformTemplate, available_platforms, known_platforms};
pub use change::{
    ALERT_THRESHOLD, MonthlyChange, alerts_due, monthly_change, monthly_changes, revenue_alerts,
};
pub use db::initialize as initialize_db;
pub use insights::{
    InsightsSummary, MonthTotal, SourceConsistency, average_growth, best_month, growth,
    month_totals, most_consistent, percentage_of_total, source_consistencies, std_dev, top_source,
    total_earnings, variance, worst_month,
};
pub use month::{MonthLabel, WINDOW_MONTHS, last_n_months, months_before};
pub use reconcile::{EarningsForm, reconcile};
pub use source::{IncomeSource, MonthlyEarning, SourceId, SourceKind};
pub use validation::{
    Field, FieldError, MAX_INCOME, SourceDraft, ValidationErrors, sanitize, validate_edit,
    validate_new,
};

/// The errors that may occur in the library.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A string did not match any of the twelve canonical month labels.
    #[error("\"{0}\" is not a three-letter month label")]
    InvalidMonthLabel(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
