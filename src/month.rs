//! Canonical month labels and the trailing-window utilities used to align
//! income sources onto a common timeline.
//!
//! Every consumer of the reconciliation engine matches months by exact label
//! equality, so the labels are a fixed enumeration of the twelve English
//! three-letter abbreviations rather than anything locale-sensitive.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The number of months shown in the dashboard window, including the current
/// month.
pub const WINDOW_MONTHS: usize = 6;

/// A calendar month as its fixed English three-letter label.
///
/// The label doubles as the key stored in each source's historical earnings,
/// so serialization uses the exact three-letter string (e.g. `"Jan"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum MonthLabel {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthLabel {
    const LABELS: [MonthLabel; 12] = [
        MonthLabel::Jan,
        MonthLabel::Feb,
        MonthLabel::Mar,
        MonthLabel::Apr,
        MonthLabel::May,
        MonthLabel::Jun,
        MonthLabel::Jul,
        MonthLabel::Aug,
        MonthLabel::Sep,
        MonthLabel::Oct,
        MonthLabel::Nov,
        MonthLabel::Dec,
    ];

    /// The label for `index` months after January, wrapping modulo twelve so
    /// that offset arithmetic over year boundaries stays valid.
    pub fn from_index(index: usize) -> Self {
        Self::LABELS[index % 12]
    }

    /// The zero-based index of the month within the calendar year.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The label for the calendar month containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self::from_index(date.month() as usize - 1)
    }

    /// The three-letter label as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            MonthLabel::Jan => "Jan",
            MonthLabel::Feb => "Feb",
            MonthLabel::Mar => "Mar",
            MonthLabel::Apr => "Apr",
            MonthLabel::May => "May",
            MonthLabel::Jun => "Jun",
            MonthLabel::Jul => "Jul",
            MonthLabel::Aug => "Aug",
            MonthLabel::Sep => "Sep",
            MonthLabel::Oct => "Oct",
            MonthLabel::Nov => "Nov",
            MonthLabel::Dec => "Dec",
        }
    }
}

impl Display for MonthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MonthLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LABELS
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| Error::InvalidMonthLabel(s.to_string()))
    }
}

/// Returns the labels of the `n` consecutive calendar months ending at
/// `reference`'s month, oldest first.
///
/// The last element is always the reference month, making this the window
/// used for display and aggregation.
pub fn last_n_months(n: usize, reference: Date) -> Vec<MonthLabel> {
    let current = reference.month() as isize - 1;

    (0..n)
        .rev()
        .map(|offset| MonthLabel::from_index((current - offset as isize).rem_euclid(12) as usize))
        .collect()
}

/// Returns the labels of the `n` calendar months strictly before
/// `reference`'s month, oldest first.
///
/// This is the variant used to lay out the editable prior-month fields on
/// add and edit forms, which handle the current month separately.
pub fn months_before(n: usize, reference: Date) -> Vec<MonthLabel> {
    let current = reference.month() as isize - 1;

    (1..=n)
        .rev()
        .map(|offset| MonthLabel::from_index((current - offset as isize).rem_euclid(12) as usize))
        .collect()
}

#[cfg(test)]
mod month_label_tests {
    use std::str::FromStr;

    use time::macros::date;

    use crate::{Error, month::MonthLabel};

    #[test]
    fn from_date_maps_calendar_months() {
        assert_eq!(MonthLabel::from_date(date!(2024 - 01 - 15)), MonthLabel::Jan);
        assert_eq!(MonthLabel::from_date(date!(2024 - 12 - 31)), MonthLabel::Dec);
    }

    #[test]
    fn from_index_wraps_modulo_twelve() {
        assert_eq!(MonthLabel::from_index(0), MonthLabel::Jan);
        assert_eq!(MonthLabel::from_index(12), MonthLabel::Jan);
        assert_eq!(MonthLabel::from_index(13), MonthLabel::Feb);
    }

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!(MonthLabel::from_str("Sep"), Ok(MonthLabel::Sep));
        assert_eq!(
            MonthLabel::from_str("September"),
            Err(Error::InvalidMonthLabel("September".to_string()))
        );
        assert_eq!(
            MonthLabel::from_str("sep"),
            Err(Error::InvalidMonthLabel("sep".to_string()))
        );
    }

    #[test]
    fn serializes_as_three_letter_string() {
        assert_eq!(
            serde_json::to_string(&MonthLabel::Mar).unwrap(),
            "\"Mar\""
        );
        assert_eq!(
            serde_json::from_str::<MonthLabel>("\"Nov\"").unwrap(),
            MonthLabel::Nov
        );
    }
}

#[cfg(test)]
mod window_tests {
    use time::macros::date;

    use crate::month::{MonthLabel, last_n_months, months_before};

    #[test]
    fn last_n_months_ends_at_reference_month() {
        let window = last_n_months(6, date!(2024 - 06 - 15));

        assert_eq!(
            window,
            vec![
                MonthLabel::Jan,
                MonthLabel::Feb,
                MonthLabel::Mar,
                MonthLabel::Apr,
                MonthLabel::May,
                MonthLabel::Jun,
            ]
        );
    }

    #[test]
    fn last_n_months_handles_year_rollover() {
        let window = last_n_months(6, date!(2024 - 02 - 01));

        assert_eq!(
            window,
            vec![
                MonthLabel::Sep,
                MonthLabel::Oct,
                MonthLabel::Nov,
                MonthLabel::Dec,
                MonthLabel::Jan,
                MonthLabel::Feb,
            ]
        );
    }

    #[test]
    fn last_n_months_always_returns_n_elements() {
        for n in 0..=24 {
            let window = last_n_months(n, date!(2023 - 11 - 30));
            assert_eq!(window.len(), n);

            if n > 0 {
                assert_eq!(*window.last().unwrap(), MonthLabel::Nov);
            }
        }
    }

    #[test]
    fn months_before_excludes_reference_month() {
        let months = months_before(5, date!(2024 - 06 - 15));

        assert_eq!(
            months,
            vec![
                MonthLabel::Jan,
                MonthLabel::Feb,
                MonthLabel::Mar,
                MonthLabel::Apr,
                MonthLabel::May,
            ]
        );
    }

    #[test]
    fn months_before_handles_january_rollover() {
        let months = months_before(5, date!(2024 - 01 - 10));

        assert_eq!(
            months,
            vec![
                MonthLabel::Aug,
                MonthLabel::Sep,
                MonthLabel::Oct,
                MonthLabel::Nov,
                MonthLabel::Dec,
            ]
        );
    }
}
