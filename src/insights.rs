//! Aggregate analytics across the whole set of income sources: totals,
//! shares, growth, consistency, and best/worst months.
//!
//! Every function here consumes reconciled series (never raw stored
//! records), treats an empty source set as a defined case, and keeps
//! division-by-zero out of the results. Percent figures a caller would
//! otherwise have to guard against NaN or infinity resolve to zero.

use time::Date;

use crate::{
    change::{monthly_changes, revenue_alerts},
    month::{MonthLabel, WINDOW_MONTHS, last_n_months},
    reconcile::reconcile,
    source::{IncomeSource, MonthlyEarning},
};

/// The combined earnings of every source for one window month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// The window month.
    pub month: MonthLabel,
    /// The sum of every source's amount for that month.
    pub total: f64,
}

/// How steady one source's reconciled series is.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConsistency {
    /// The source's name.
    pub name: String,
    /// Population variance of the reconciled amounts.
    pub variance: f64,
    /// Standard deviation of the reconciled amounts.
    pub std_dev: f64,
}

/// The sum of every source's current-month income.
pub fn total_earnings(sources: &[IncomeSource]) -> f64 {
    sources.iter().map(|source| source.current_income).sum()
}

/// The share of `income` within `total`, in percent.
///
/// Zero when `total` is zero, so an empty dashboard never renders NaN.
pub fn percentage_of_total(income: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        income / total * 100.0
    }
}

/// First-to-last growth of a reconciled series, in percent rounded to one
/// decimal place.
///
/// Zero when the series has fewer than two points or starts at zero.
pub fn growth(series: &[MonthlyEarning]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }

    let first = series[0].amount;
    let last = series[series.len() - 1].amount;

    if first == 0.0 {
        0.0
    } else {
        ((last - first) / first * 1000.0).round() / 10.0
    }
}

/// The mean of every source's window growth, or zero for an empty set.
pub fn average_growth(sources: &[IncomeSource], window: &[MonthLabel]) -> f64 {
    if sources.is_empty() {
        return 0.0;
    }

    let sum: f64 = sources
        .iter()
        .map(|source| growth(&reconcile(source, window)))
        .sum();

    sum / sources.len() as f64
}

/// Population variance of `values`; zero for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64
}

/// Standard deviation of `values`; zero for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Per-source consistency over the window, in input order.
pub fn source_consistencies(
    sources: &[IncomeSource],
    window: &[MonthLabel],
) -> Vec<SourceConsistency> {
    sources
        .iter()
        .map(|source| {
            let amounts: Vec<f64> = reconcile(source, window)
                .iter()
                .map(|entry| entry.amount)
                .collect();
            let variance = variance(&amounts);

            SourceConsistency {
                name: source.name.clone(),
                variance,
                std_dev: variance.sqrt(),
            }
        })
        .collect()
}

/// The source whose reconciled series has the lowest variance.
///
/// Ties are broken by input order; `None` for an empty set.
pub fn most_consistent(
    sources: &[IncomeSource],
    window: &[MonthLabel],
) -> Option<SourceConsistency> {
    source_consistencies(sources, window)
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.variance < best.variance {
                candidate
            } else {
                best
            }
        })
}

/// The combined earnings of all sources for each window month, in window
/// order.
pub fn month_totals(sources: &[IncomeSource], window: &[MonthLabel]) -> Vec<MonthTotal> {
    let series: Vec<Vec<MonthlyEarning>> = sources
        .iter()
        .map(|source| reconcile(source, window))
        .collect();

    window
        .iter()
        .enumerate()
        .map(|(index, &month)| MonthTotal {
            month,
            total: series.iter().map(|entries| entries[index].amount).sum(),
        })
        .collect()
}

/// The window month with the highest combined earnings.
///
/// Ties are broken by the earliest month in window order; `None` for an
/// empty window.
pub fn best_month(sources: &[IncomeSource], window: &[MonthLabel]) -> Option<MonthTotal> {
    month_totals(sources, window)
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.total > best.total {
                candidate
            } else {
                best
            }
        })
}

/// The window month with the lowest combined earnings.
///
/// Ties are broken by the earliest month in window order; `None` for an
/// empty window.
pub fn worst_month(sources: &[IncomeSource], window: &[MonthLabel]) -> Option<MonthTotal> {
    month_totals(sources, window)
        .into_iter()
        .reduce(|worst, candidate| {
            if candidate.total < worst.total {
                candidate
            } else {
                worst
            }
        })
}

/// The source with the highest current-month income, ties broken by input
/// order.
pub fn top_source(sources: &[IncomeSource]) -> Option<&IncomeSource> {
    sources.iter().reduce(|top, candidate| {
        if candidate.current_income > top.current_income {
            candidate
        } else {
            top
        }
    })
}

/// Everything the insights page renders, computed in one pass over the
/// source set.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsSummary {
    /// The month window the summary covers, oldest first.
    pub window: Vec<MonthLabel>,
    /// The sum of every source's current income.
    pub total_earnings: f64,
    /// The mean first-to-last window growth across sources.
    pub average_growth: f64,
    /// Combined earnings per window month.
    pub month_totals: Vec<MonthTotal>,
    /// The strongest window month, if any.
    pub best_month: Option<MonthTotal>,
    /// The weakest window month, if any.
    pub worst_month: Option<MonthTotal>,
    /// The steadiest source, if any.
    pub most_consistent: Option<SourceConsistency>,
    /// Per-source consistency figures in input order.
    pub consistencies: Vec<SourceConsistency>,
    /// Threshold alerts for this cycle.
    ///
    /// Alert generation is independent of the rest of the summary; it can
    /// only ever contribute an empty list, never block the other figures.
    pub alerts: Vec<String>,
}

impl InsightsSummary {
    /// Computes the full summary over the standard dashboard window ending
    /// at `reference`.
    pub fn compute(sources: &[IncomeSource], reference: Date) -> Self {
        let window = last_n_months(WINDOW_MONTHS, reference);
        let alerts = revenue_alerts(&monthly_changes(sources, &window));

        Self {
            total_earnings: total_earnings(sources),
            average_growth: average_growth(sources, &window),
            month_totals: month_totals(sources, &window),
            best_month: best_month(sources, &window),
            worst_month: worst_month(sources, &window),
            most_consistent: most_consistent(sources, &window),
            consistencies: source_consistencies(sources, &window),
            alerts,
            window,
        }
    }
}
