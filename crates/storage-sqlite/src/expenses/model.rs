//! Database models for expenses.

use diesel::prelude::*;
use tally_core::expenses::{Expense, NewExpense};

use crate::errors::StorageError;
use crate::utils::{amount_from_text, amount_to_text, timestamp_from_text, timestamp_to_text};

/// Database model for expenses
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: String,
    pub created_at: String,
}

impl ExpenseDB {
    /// Row for a new expense under a freshly assigned id.
    pub fn from_new(id: String, new_expense: NewExpense) -> Self {
        Self {
            id,
            user_id: new_expense.user_id,
            description: new_expense.description,
            amount: amount_to_text(new_expense.amount),
            created_at: timestamp_to_text(new_expense.created_at),
        }
    }
}

impl TryFrom<ExpenseDB> for Expense {
    type Error = StorageError;

    fn try_from(db: ExpenseDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: amount_from_text(&db.amount)?,
            created_at: timestamp_from_text(&db.created_at)?,
            id: db.id,
            user_id: db.user_id,
            description: db.description,
        })
    }
}
