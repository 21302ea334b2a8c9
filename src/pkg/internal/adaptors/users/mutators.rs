use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::internal::auth::Role;
use crate::pkg::server::handlers::auth::RegisterInput;
use crate::pkg::server::handlers::users::UpdateUserInput;
use crate::prelude::Result;

pub struct UserMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserMutator { pool }
    }

    pub async fn create(
        &mut self,
        input: &RegisterInput,
        password_hash: &str,
        role: Role,
    ) -> Result<UserEntry> {
        let row = sqlx::query_as::<_, UserEntry>(
            r#"
            INSERT INTO users (user_id, name, last_name, email, password, location, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING user_id, name, last_name, email, password, location, role, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&input.name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(password_hash)
        .bind(&input.location)
        .bind(role)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_profile(
        &mut self,
        user_id: &str,
        input: &UpdateUserInput,
    ) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            r#"
            UPDATE users
            SET name = $2, last_name = $3, email = $4, location = $5, updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING user_id, name, last_name, email, password, location, role, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.location)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
