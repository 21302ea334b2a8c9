use sqlx::PgConnection;

use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::prelude::Result;

pub struct UserSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserSelector { pool }
    }

    pub async fn get_by_id(&mut self, user_id: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            "SELECT user_id, name, last_name, email, password, location, role, created_at, updated_at
             FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            "SELECT user_id, name, last_name, email, password, location, role, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn count(&mut self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM users")
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }
}
