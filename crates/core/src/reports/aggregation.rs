//! Pure aggregation over expense records: sums and weekly windows.
//!
//! Week boundaries are evaluated in UTC. A week starts on Monday at
//! 00:00:00 and ends on the following Sunday at 23:59:59.999999999; both
//! boundary instants belong to the week.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::errors::{Error, Result};
use crate::expenses::Expense;

/// Closed calendar-week interval containing a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    /// The Monday-start week containing `reference`.
    pub fn containing(reference: DateTime<Utc>) -> Self {
        Self::starting_on(reference, Weekday::Mon)
    }

    /// The week containing `reference`, with weeks beginning on `first_day`.
    pub fn starting_on(reference: DateTime<Utc>, first_day: Weekday) -> Self {
        let date = reference.date_naive();
        let days_back = (7 + date.weekday().num_days_from_monday()
            - first_day.num_days_from_monday())
            % 7;
        let start = (date - Duration::days(i64::from(days_back)))
            .and_time(NaiveTime::MIN)
            .and_utc();
        let end = start + Duration::days(7) - Duration::nanoseconds(1);
        WeekWindow { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn formatted_start(&self) -> String {
        self.start_date().format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn formatted_end(&self) -> String {
        self.end_date().format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// Aggregate result for one user's week: the member records in
/// chronological order and their total.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub window: WeekWindow,
    pub expenses: Vec<Expense>,
    pub total: Decimal,
}

/// Sum of amounts. Zero for an empty sequence.
///
/// Fails with `Error::Calculation` if the sum leaves the decimal range.
pub fn total<'a, I>(records: I) -> Result<Decimal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    records.into_iter().try_fold(Decimal::ZERO, |sum, expense| {
        sum.checked_add(expense.amount).ok_or_else(|| {
            Error::Calculation(format!("total overflowed at expense {}", expense.id))
        })
    })
}

/// Records created inside the Monday-start week containing `reference`.
pub fn within_week<'a, I>(records: I, reference: DateTime<Utc>) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    within_window(records, &WeekWindow::containing(reference))
}

/// Records created inside `window`, in input order.
pub fn within_window<'a, I>(records: I, window: &WeekWindow) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    records
        .into_iter()
        .filter(|expense| window.contains(expense.created_at))
        .collect()
}

/// Filters `records` to the week containing `reference` and totals them.
pub fn summarize_week(records: &[Expense], reference: DateTime<Utc>) -> Result<WeekSummary> {
    let window = WeekWindow::containing(reference);
    let mut expenses: Vec<Expense> = within_window(records, &window)
        .into_iter()
        .cloned()
        .collect();
    expenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    let total = total(&expenses)?;
    Ok(WeekSummary {
        window,
        expenses,
        total,
    })
}
