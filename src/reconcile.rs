//! The reconciliation engine: maps a source's stored history and live
//! current-month value onto a shared month window.
//!
//! Display and aggregation always go through [reconcile], which zero-fills
//! gaps. Form editing goes through [EarningsForm], which deliberately
//! defaults missing prior months to the source's current income instead of
//! zero so that unset months are not surfaced as $0 while editing.

use std::collections::HashMap;

use time::Date;

use crate::{
    month::{MonthLabel, WINDOW_MONTHS, months_before},
    source::{IncomeSource, MonthlyEarning},
};

/// Maps `source`'s earnings onto `window`, producing one point per window
/// month.
///
/// The window's last month always takes the source's `current_income`,
/// overriding any stale stored entry under that label. Other months take the
/// stored amount, or zero when the month is absent from the stored history.
pub fn reconcile(source: &IncomeSource, window: &[MonthLabel]) -> Vec<MonthlyEarning> {
    let amounts: HashMap<MonthLabel, f64> = source
        .historical_earnings
        .iter()
        .map(|entry| (entry.month, entry.amount))
        .collect();

    let current_month = window.last().copied();

    window
        .iter()
        .map(|&month| {
            let amount = if Some(month) == current_month {
                source.current_income
            } else {
                amounts.get(&month).copied().unwrap_or(0.0)
            };

            MonthlyEarning { month, amount }
        })
        .collect()
}

/// The working state of an add or edit form: the current month's income and
/// the editable prior window months, held as separate fields.
///
/// Keeping the current month out of the prior-month list means no label
/// matching is needed while the form is being edited; the current month is
/// only reintroduced as `current_income` when the record is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsForm {
    /// The value attributed to the current calendar month.
    pub current_income: f64,
    /// The editable months strictly before the current month, oldest first.
    pub prior_months: Vec<MonthlyEarning>,
}

impl EarningsForm {
    /// An empty form for the add flow: prior window months zeroed, no
    /// current income yet.
    pub fn new(reference: Date) -> Self {
        Self {
            current_income: 0.0,
            prior_months: months_before(WINDOW_MONTHS - 1, reference)
                .into_iter()
                .map(|month| MonthlyEarning { month, amount: 0.0 })
                .collect(),
        }
    }

    /// Seeds a form from a persisted record for the edit flow.
    ///
    /// If the stored history happens to contain an entry under the current
    /// month's label (left over from an earlier save), that entry seeds the
    /// income field and the record's `current_income` is only the fallback.
    /// Prior window months absent from the stored history are pre-filled
    /// with the record's `current_income`, not zero.
    pub fn from_source(source: &IncomeSource, reference: Date) -> Self {
        let amounts: HashMap<MonthLabel, f64> = source
            .historical_earnings
            .iter()
            .map(|entry| (entry.month, entry.amount))
            .collect();

        let current_month = MonthLabel::from_date(reference);
        let current_income = amounts
            .get(&current_month)
            .copied()
            .unwrap_or(source.current_income);

        let prior_months = months_before(WINDOW_MONTHS - 1, reference)
            .into_iter()
            .map(|month| MonthlyEarning {
                month,
                amount: amounts.get(&month).copied().unwrap_or(source.current_income),
            })
            .collect();

        Self {
            current_income,
            prior_months,
        }
    }

    /// The prior months as they are persisted: any entry under the current
    /// month's label is stripped, since the current month is represented
    /// solely by `current_income` at rest.
    pub fn prior_months_at_rest(&self, current_month: MonthLabel) -> Vec<MonthlyEarning> {
        self.prior_months
            .iter()
            .filter(|entry| entry.month != current_month)
            .copied()
            .collect()
    }

    /// Writes the form back onto `source`, replacing its income and history.
    pub fn apply(&self, source: &mut IncomeSource, reference: Date) {
        source.current_income = self.current_income;
        source.historical_earnings = self.prior_months_at_rest(MonthLabel::from_date(reference));
    }
}


#[cfg(test)]
mod earnings_form_tests {
    use time::macros::date;

    use crate::{
        month::MonthLabel,
        reconcile::EarningsForm,
        source::{IncomeSource, MonthlyEarning, SourceId, SourceKind},
    };

    fn create_test_source(
        current_income: f64,
        history: Vec<(MonthLabel, f64)>,
    ) -> IncomeSource {
        IncomeSource {
            id: SourceId::new("test-1"),
            name: "TikTok".to_string(),
            current_income,
            tags: vec!["Creator Fund".to_string()],
            color: None,
            logo: None,
            notes: None,
            kind: SourceKind::Platform,
            historical_earnings: history
                .into_iter()
                .map(|(month, amount)| MonthlyEarning { month, amount })
                .collect(),
        }
    }

    #[test]
    fn new_form_zeroes_prior_window_months() {
        let form = EarningsForm::new(date!(2024 - 06 - 15));

        assert_eq!(form.current_income, 0.0);
        assert_eq!(form.prior_months.len(), 5);
        assert_eq!(form.prior_months[0].month, MonthLabel::Jan);
        assert_eq!(form.prior_months[4].month, MonthLabel::May);
        assert!(form.prior_months.iter().all(|entry| entry.amount == 0.0));
    }

    #[test]
    fn from_source_seeds_current_income_from_record() {
        let source = create_test_source(3200.0, vec![(MonthLabel::May, 3150.0)]);

        let form = EarningsForm::from_source(&source, date!(2024 - 06 - 15));

        assert_eq!(form.current_income, 3200.0);
    }

    #[test]
    fn from_source_prefers_stale_current_month_entry() {
        let source = create_test_source(
            3200.0,
            vec![(MonthLabel::May, 3150.0), (MonthLabel::Jun, 3100.0)],
        );

        let form = EarningsForm::from_source(&source, date!(2024 - 06 - 15));

        assert_eq!(form.current_income, 3100.0);
    }

    #[test]
    fn from_source_defaults_missing_prior_months_to_current_income() {
        // Editing must not surface unset historical months as zero, so the
        // fallback here is the record's income, unlike display zero-fill.
        let source = create_test_source(3200.0, vec![(MonthLabel::Apr, 3100.0)]);

        let form = EarningsForm::from_source(&source, date!(2024 - 06 - 15));

        let amounts: Vec<f64> = form.prior_months.iter().map(|entry| entry.amount).collect();
        assert_eq!(amounts, vec![3200.0, 3200.0, 3200.0, 3100.0, 3200.0]);
    }

    #[test]
    fn prior_months_at_rest_strips_current_month_entry() {
        let form = EarningsForm {
            current_income: 3200.0,
            prior_months: vec![
                MonthlyEarning {
                    month: MonthLabel::May,
                    amount: 3150.0,
                },
                MonthlyEarning {
                    month: MonthLabel::Jun,
                    amount: 3100.0,
                },
            ],
        };

        let at_rest = form.prior_months_at_rest(MonthLabel::Jun);

        assert_eq!(
            at_rest,
            vec![MonthlyEarning {
                month: MonthLabel::May,
                amount: 3150.0,
            }]
        );
    }

    #[test]
    fn unchanged_edit_round_trips_record() {
        let reference = date!(2024 - 06 - 15);
        let source = create_test_source(
            3200.0,
            vec![
                (MonthLabel::Jan, 2800.0),
                (MonthLabel::Feb, 2900.0),
                (MonthLabel::Mar, 3000.0),
                (MonthLabel::Apr, 3100.0),
                (MonthLabel::May, 3150.0),
            ],
        );

        let form = EarningsForm::from_source(&source, reference);
        let mut edited = source.clone();
        form.apply(&mut edited, reference);

        assert_eq!(edited, source);
    }

    #[test]
    fn apply_replaces_income_and_history() {
        let reference = date!(2024 - 06 - 15);
        let mut source = create_test_source(3200.0, vec![(MonthLabel::May, 3150.0)]);

        let form = EarningsForm {
            current_income: 4000.0,
            prior_months: vec![MonthlyEarning {
                month: MonthLabel::May,
                amount: 3500.0,
            }],
        };
        form.apply(&mut source, reference);

        assert_eq!(source.current_income, 4000.0);
        assert_eq!(
            source.historical_earnings,
            vec![MonthlyEarning {
                month: MonthLabel::May,
                amount: 3500.0,
            }]
        );
    }
}
