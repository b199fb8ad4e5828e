//! Database models for users.

use diesel::prelude::*;
use tally_core::users::{NewUser, User};

use crate::errors::StorageError;
use crate::utils::{timestamp_from_text, timestamp_to_text};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

impl UserDB {
    pub fn from_new(id: String, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: timestamp_to_text(new_user.created_at),
        }
    }
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: timestamp_from_text(&db.created_at)?,
            id: db.id,
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
        })
    }
}
