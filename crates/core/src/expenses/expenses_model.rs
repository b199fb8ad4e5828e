//! Expense domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::expenses_errors::ExpenseError;
use crate::constants::{MAX_AMOUNT_SCALE, MAX_DESCRIPTION_LENGTH, MAX_EXPENSE_AMOUNT};
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// What the user typed into the expense form, before validation.
///
/// Kept verbatim so a rejected submission can be shown back to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub description: String,
    pub amount: String,
}

impl ExpenseInput {
    pub fn new(description: impl Into<String>, amount: impl Into<String>) -> Self {
        ExpenseInput {
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// Parses into a trimmed description and a strictly positive amount of at
    /// most two decimal places and no more than `MAX_EXPENSE_AMOUNT`.
    pub fn parse(&self) -> std::result::Result<(String, Decimal), ExpenseError> {
        let reject = |reason: &str| ExpenseError::Invalid {
            attempted: self.clone(),
            reason: reason.to_string(),
        };

        let description = self.description.trim();
        if description.is_empty() {
            return Err(reject("Description is required"));
        }
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(reject("Description is too long"));
        }

        let raw_amount = self.amount.trim();
        let amount = Decimal::from_str(raw_amount)
            .or_else(|_| Decimal::from_scientific(raw_amount))
            .map_err(|_| reject("Amount must be a number"))?;
        if amount <= Decimal::ZERO {
            return Err(reject("Amount must be greater than zero"));
        }
        if amount > Decimal::from(MAX_EXPENSE_AMOUNT) {
            return Err(reject("Amount is too large"));
        }
        if amount.normalize().scale() > MAX_AMOUNT_SCALE {
            return Err(reject("Amount cannot have more than two decimal places"));
        }

        Ok((description.to_string(), amount))
    }
}

/// Input model for storing a new expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        validate_fields(&self.description, self.amount)
    }
}

/// Replacement for the mutable fields of an existing expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.description, self.amount)
    }
}

fn validate_fields(description: &str, amount: Decimal) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Description cannot be empty".to_string(),
        )));
    }
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        )));
    }
    if amount > Decimal::from(MAX_EXPENSE_AMOUNT) || amount.normalize().scale() > MAX_AMOUNT_SCALE
    {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Amount is out of range".to_string(),
        )));
    }
    Ok(())
}

/// All of a user's expenses with their total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLedger {
    pub expenses: Vec<Expense>,
    pub total: Decimal,
}
