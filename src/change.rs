//! Month-over-month change analytics and threshold alerts.

use time::Date;

use crate::{
    month::MonthLabel,
    reconcile::reconcile,
    source::{IncomeSource, MonthlyEarning},
};

/// The absolute percent change at which an alert is generated.
pub const ALERT_THRESHOLD: f64 = 20.0;

/// The month-over-month movement of one source's income.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyChange {
    /// The name of the source the change belongs to.
    pub name: String,
    /// The current month's income.
    pub current_month: f64,
    /// The previous month's income.
    pub previous_month: f64,
    /// The absolute change from the previous month.
    pub change: f64,
    /// The relative change in percent, rounded to one decimal place.
    ///
    /// Zero when the previous month's income was zero, so a zero baseline
    /// never produces an infinite or NaN figure.
    pub percent_change: f64,
}

/// Rounds to one decimal place, halves away from zero.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes the month-over-month change from a reconciled series.
///
/// The series' last point is the current month and the second-to-last is the
/// previous month; either falls back to zero when the series is too short.
pub fn monthly_change(name: impl Into<String>, series: &[MonthlyEarning]) -> MonthlyChange {
    let current_month = series.last().map_or(0.0, |entry| entry.amount);
    let previous_month = match series.len() {
        0 | 1 => 0.0,
        n => series[n - 2].amount,
    };

    let change = current_month - previous_month;
    let percent_change = if previous_month == 0.0 {
        0.0
    } else {
        round_to_tenth(change / previous_month * 100.0)
    };

    MonthlyChange {
        name: name.into(),
        current_month,
        previous_month,
        change,
        percent_change,
    }
}

/// Computes the monthly change of every source over a shared window.
pub fn monthly_changes(sources: &[IncomeSource], window: &[MonthLabel]) -> Vec<MonthlyChange> {
    sources
        .iter()
        .map(|source| monthly_change(source.name.clone(), &reconcile(source, window)))
        .collect()
}

/// Generates a human-readable alert for every change whose magnitude reaches
/// [ALERT_THRESHOLD] percent.
///
/// The direction of the message follows the sign of the rounded percent
/// change.
pub fn revenue_alerts(changes: &[MonthlyChange]) -> Vec<String> {
    let mut alerts = Vec::new();

    for change in changes {
        let magnitude = change.percent_change.abs();
        if magnitude < ALERT_THRESHOLD {
            continue;
        }

        if change.percent_change < 0.0 {
            alerts.push(format!(
                "Your {} income dropped {}% compared to last month.",
                change.name, magnitude
            ));
        } else {
            alerts.push(format!(
                "Your {} income grew {}% this month, keep it up!",
                change.name, magnitude
            ));
        }
    }

    tracing::debug!(count = alerts.len(), "generated revenue alerts");

    alerts
}

/// Decides whether threshold alerts are due to be shown.
///
/// Alerts are surfaced at most once per calendar month: they are due when no
/// previous check is recorded, or when the last check's month or year
/// differs from `now`. Returns the timestamp the caller should persist as
/// the new last check; the caller owns that storage.
pub fn alerts_due(last_check: Option<Date>, now: Date) -> (bool, Date) {
    let due = match last_check {
        None => true,
        Some(last) => last.month() != now.month() || last.year() != now.year(),
    };

    (due, now)
}


#[cfg(test)]
mod revenue_alert_tests {
    use crate::change::{MonthlyChange, revenue_alerts};

    fn change_with_percent(name: &str, percent_change: f64) -> MonthlyChange {
        MonthlyChange {
            name: name.to_string(),
            current_month: 0.0,
            previous_month: 0.0,
            change: 0.0,
            percent_change,
        }
    }

    #[test]
    fn no_alert_below_threshold() {
        let alerts = revenue_alerts(&[change_with_percent("YouTube", 19.9)]);

        assert!(alerts.is_empty());
    }

    #[test]
    fn growth_alert_at_exact_threshold() {
        let alerts = revenue_alerts(&[change_with_percent("YouTube", 20.0)]);

        assert_eq!(
            alerts,
            vec!["Your YouTube income grew 20% this month, keep it up!"]
        );
    }

    #[test]
    fn drop_alert_at_exact_negative_threshold() {
        let alerts = revenue_alerts(&[change_with_percent("Twitch", -20.0)]);

        assert_eq!(
            alerts,
            vec!["Your Twitch income dropped 20% compared to last month."]
        );
    }

    #[test]
    fn fractional_percentages_keep_one_decimal() {
        let alerts = revenue_alerts(&[change_with_percent("TikTok", -23.5)]);

        assert_eq!(
            alerts,
            vec!["Your TikTok income dropped 23.5% compared to last month."]
        );
    }

    #[test]
    fn one_alert_per_crossing_source() {
        let alerts = revenue_alerts(&[
            change_with_percent("A", 25.0),
            change_with_percent("B", 5.0),
            change_with_percent("C", -30.0),
        ]);

        assert_eq!(alerts.len(), 2);
    }
}
