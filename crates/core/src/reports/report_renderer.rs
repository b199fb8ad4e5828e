use rust_decimal::{Decimal, RoundingStrategy};

use super::aggregation::WeekSummary;
use super::report_model::{ReportLine, WeeklyReport};
use crate::constants::{CURRENCY_LABEL, DISPLAY_DECIMAL_PRECISION};
use crate::utils::time_utils::format_date;

/// Formats an amount with the currency label and two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!(
        "{}{:.prec$}",
        CURRENCY_LABEL,
        rounded,
        prec = DISPLAY_DECIMAL_PRECISION as usize
    )
}

/// Builds the in-browser view of a weekly summary.
pub fn render_view(summary: &WeekSummary) -> WeeklyReport {
    let expenses = summary
        .expenses
        .iter()
        .map(|expense| ReportLine {
            id: expense.id.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
            formatted_amount: format_amount(expense.amount),
            formatted_date: format_date(expense.created_at),
        })
        .collect();

    WeeklyReport {
        expenses,
        total: summary.total,
        formatted_total: format_amount(summary.total),
        formatted_start: summary.window.formatted_start(),
        formatted_end: summary.window.formatted_end(),
    }
}
