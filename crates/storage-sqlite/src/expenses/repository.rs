use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use tally_core::errors::{DatabaseError, Error, Result};
use tally_core::expenses::{Expense, ExpenseRepositoryTrait, ExpenseUpdate, NewExpense};

use super::model::ExpenseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::expenses;
use crate::utils::amount_to_text;

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

fn to_domain(rows: Vec<ExpenseDB>) -> Result<Vec<Expense>> {
    rows.into_iter()
        .map(|row| Expense::try_from(row).map_err(Error::from))
        .collect()
}

fn missing(expense_id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!("expense {expense_id}")))
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .order((expenses::created_at.asc(), expenses::id.asc()))
            .select(ExpenseDB::as_select())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    fn get_by_id(&self, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        let row = expenses::table
            .find(expense_id)
            .select(ExpenseDB::as_select())
            .first::<ExpenseDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| missing(expense_id))?;
        Ok(Expense::try_from(row)?)
    }

    async fn create(&self, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let row = ExpenseDB::from_new(Uuid::new_v4().to_string(), new_expense);
                let inserted = diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted expense {}", inserted.id);
                Ok(Expense::try_from(inserted)?)
            })
            .await
    }

    async fn update(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        expense_update.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let updated = diesel::update(expenses::table.find(&expense_update.id))
                    .set((
                        expenses::description.eq(&expense_update.description),
                        expenses::amount.eq(amount_to_text(expense_update.amount)),
                    ))
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| missing(&expense_update.id))?;
                Ok(Expense::try_from(updated)?)
            })
            .await
    }

    async fn delete(&self, expense_id: &str) -> Result<usize> {
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(expenses::table.find(&expense_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(missing(&expense_id));
                }
                Ok(deleted)
            })
            .await
    }
}
