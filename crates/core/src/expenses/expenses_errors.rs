use thiserror::Error;

use super::expenses_model::ExpenseInput;

/// Failures specific to ledger operations.
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// The submitted fields were rejected; `attempted` is the input as typed.
    #[error("{reason}")]
    Invalid {
        attempted: ExpenseInput,
        reason: String,
    },

    #[error("Expense {0} not found")]
    NotFound(String),

    /// The record exists but belongs to someone else.
    #[error("Expense {0} is not owned by the requesting user")]
    NotOwner(String),
}
