use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;

use super::expenses_errors::ExpenseError;
use super::expenses_model::{Expense, ExpenseInput, ExpenseLedger, ExpenseUpdate, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::errors::{Error, Result};
use crate::reports::{self, ReportDocument, WeekSummary, WeeklyReport};
use crate::utils::Clock;

/// Ledger service: ownership checks, validation, and report assembly on top
/// of an expense repository.
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        ExpenseService { repository, clock }
    }

    /// Loads a record and verifies it belongs to `user_id`.
    fn load_owned(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        let expense = self
            .repository
            .get_by_id(expense_id)
            .map_err(|e| not_found_as_expense_error(e, expense_id))?;
        if expense.user_id != user_id {
            warn!(
                "User {} attempted to access expense {} owned by another user",
                user_id, expense_id
            );
            return Err(ExpenseError::NotOwner(expense_id.to_string()).into());
        }
        Ok(expense)
    }

    fn summarize_week(&self, user_id: &str, reference: DateTime<Utc>) -> Result<WeekSummary> {
        let expenses = self.repository.list_by_user(user_id)?;
        reports::summarize_week(&expenses, reference)
    }
}

fn not_found_as_expense_error(err: Error, expense_id: &str) -> Error {
    if err.is_not_found() {
        ExpenseError::NotFound(expense_id.to_string()).into()
    } else {
        err
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn list_expenses(&self, user_id: &str) -> Result<ExpenseLedger> {
        debug!("Listing expenses for user {}", user_id);
        let expenses = self.repository.list_by_user(user_id)?;
        let total = reports::total(&expenses)?;
        Ok(ExpenseLedger { expenses, total })
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        self.load_owned(user_id, expense_id)
    }

    async fn add_expense(&self, user_id: &str, input: ExpenseInput) -> Result<Expense> {
        let (description, amount) = input.parse()?;
        debug!("Adding expense for user {}: {} {}", user_id, description, amount);
        self.repository
            .create(NewExpense {
                user_id: user_id.to_string(),
                description,
                amount,
                created_at: self.clock.now(),
            })
            .await
    }

    async fn edit_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        input: ExpenseInput,
    ) -> Result<Expense> {
        let existing = self.load_owned(user_id, expense_id)?;
        let (description, amount) = input.parse()?;
        debug!("Updating expense {} for user {}", existing.id, user_id);
        self.repository
            .update(ExpenseUpdate {
                id: existing.id,
                description,
                amount,
            })
            .await
            .map_err(|e| not_found_as_expense_error(e, expense_id))
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        let existing = self.load_owned(user_id, expense_id)?;
        debug!("Deleting expense {} for user {}", existing.id, user_id);
        self.repository
            .delete(&existing.id)
            .await
            .map_err(|e| not_found_as_expense_error(e, expense_id))?;
        Ok(())
    }

    fn weekly_report(&self, user_id: &str, reference: DateTime<Utc>) -> Result<WeeklyReport> {
        let summary = self.summarize_week(user_id, reference)?;
        Ok(reports::render_view(&summary))
    }

    fn weekly_report_document(
        &self,
        user_id: &str,
        reference: DateTime<Utc>,
    ) -> Result<ReportDocument> {
        let summary = self.summarize_week(user_id, reference)?;
        debug!(
            "Rendering weekly document for user {}: {} expenses, total {}",
            user_id,
            summary.expenses.len(),
            summary.total
        );
        Ok(ReportDocument::new(&summary))
    }
}
