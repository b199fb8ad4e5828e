/// Label prefixed to every rendered amount.
pub const CURRENCY_LABEL: &str = "$";

/// Decimal places used when displaying amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Calendar date format used in report labels and query parameters.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest description accepted for an expense, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Largest amount accepted for a single expense.
pub const MAX_EXPENSE_AMOUNT: i64 = 1_000_000_000;

/// Most decimal places an amount may carry; matches the display precision.
pub const MAX_AMOUNT_SCALE: u32 = DISPLAY_DECIMAL_PRECISION;
