use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use tally_core::errors::{DatabaseError, Error, Result};
use tally_core::users::{NewUser, User, UserRepositoryTrait};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = UserDB::from_new(Uuid::new_v4().to_string(), new_user);
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::try_from(inserted)?)
            })
            .await
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(|row| User::try_from(row).map_err(Error::from))
            .transpose()
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("user {user_id}"))))?;
        Ok(User::try_from(row)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use chrono::{TimeZone, Utc};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_and_look_up() {
        let db = TestDb::new();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

        let user = repo.create(new_user("ada", "ada@example.com")).await.unwrap();
        assert_eq!(repo.get_by_id(&user.id).unwrap(), user);
        assert_eq!(
            repo.find_by_email("ada@example.com").unwrap(),
            Some(user.clone())
        );
        assert_eq!(user.password_hash, "$argon2id$stub");
    }

    #[tokio::test]
    async fn unknown_users_are_absent() {
        let db = TestDb::new();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        assert!(repo.find_by_email("who@example.com").unwrap().is_none());
        assert!(repo.get_by_id("ghost").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_email_or_username_is_a_unique_violation() {
        let db = TestDb::new();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        repo.create(new_user("ada", "ada@example.com")).await.unwrap();

        let same_email = repo
            .create(new_user("other", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(same_email.is_unique_violation());

        let same_name = repo
            .create(new_user("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert!(same_name.is_unique_violation());
    }
}
