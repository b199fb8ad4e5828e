use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::expenses_model::{Expense, ExpenseInput, ExpenseLedger, ExpenseUpdate, NewExpense};
use crate::errors::Result;
use crate::reports::{ReportDocument, WeeklyReport};

/// Trait for expense persistence.
///
/// `get_by_id`, `update` and `delete` are not scoped by user; ownership is
/// checked by the service before any of them is exposed to a caller.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Expense>>;
    fn get_by_id(&self, expense_id: &str) -> Result<Expense>;
    async fn create(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    async fn delete(&self, expense_id: &str) -> Result<usize>;
}

/// Trait for ledger operations invoked on behalf of an authenticated user
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn list_expenses(&self, user_id: &str) -> Result<ExpenseLedger>;
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
    async fn add_expense(&self, user_id: &str, input: ExpenseInput) -> Result<Expense>;
    async fn edit_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        input: ExpenseInput,
    ) -> Result<Expense>;
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
    fn weekly_report(&self, user_id: &str, reference: DateTime<Utc>) -> Result<WeeklyReport>;
    fn weekly_report_document(
        &self,
        user_id: &str,
        reference: DateTime<Utc>,
    ) -> Result<ReportDocument>;
}
