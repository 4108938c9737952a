//! The income source model: one income-producing entity being tracked, its
//! live current-month value, and its trailing monthly history.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::month::MonthLabel;

/// An opaque identifier for an income source.
///
/// Assigned by the caller at creation time (e.g. time-based or random) and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a source was picked from the platform catalog or entered free-form.
///
/// The kind only affects how fields are pre-filled at creation time and the
/// edit-time tag requirement. The analytics functions never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A source from the fixed catalog of known platform integrations.
    Platform,
    /// A free-form, manually entered income stream.
    Manual,
}

/// One month's earnings for a single source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEarning {
    /// The calendar month the amount belongs to.
    pub month: MonthLabel,
    /// The amount earned in that month.
    pub amount: f64,
}

/// An income source and its trailing monthly history.
///
/// `historical_earnings` covers months strictly before the current calendar
/// month; the current month's value lives solely in `current_income` at rest.
/// The serde renames match the JSON schema the original records were stored
/// under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    /// The source's opaque, immutable identifier.
    pub id: SourceId,

    /// The display name, unique among the currently held sources.
    pub name: String,

    /// The income attributed to the current calendar month.
    #[serde(rename = "income")]
    pub current_income: f64,

    /// Tags describing the source's revenue streams.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Optional display color (hex string). No core semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Optional emoji or image URL. No core semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Optional free-text notes, sanitized before storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether the source is catalog-backed or manually entered.
    #[serde(rename = "type")]
    pub kind: SourceKind,

    /// Per-month earnings for months strictly before the current month,
    /// with unique month labels.
    #[serde(rename = "historicalEarnings", default)]
    pub historical_earnings: Vec<MonthlyEarning>,
}

impl IncomeSource {
    /// Drops duplicate month labels from the history, keeping the last entry
    /// for each label.
    ///
    /// Stored records are expected to hold unique labels; this repairs
    /// records that were persisted before that invariant was enforced.
    pub fn dedup_history(&mut self) {
        let mut seen = Vec::with_capacity(self.historical_earnings.len());

        for entry in self.historical_earnings.iter().rev() {
            if seen.iter().any(|kept: &MonthlyEarning| kept.month == entry.month) {
                tracing::warn!(
                    source = %self.id,
                    month = %entry.month,
                    "dropping duplicate history month"
                );
            } else {
                seen.push(*entry);
            }
        }

        seen.reverse();
        self.historical_earnings = seen;
    }
}
