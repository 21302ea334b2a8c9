use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use standard_error::{StandardError, Status};

use crate::prelude::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub role: Role,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn from_token(token: &str, secret: &str) -> Result<Self> {
        let claims = verify_jwt(token, secret)?;
        Ok(CurrentUser {
            user_id: claims.user_id,
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn create_jwt(user_id: &str, role: Role, secret: &str, lifetime_hours: i64) -> Result<String> {
    let exp = (Utc::now() + chrono::Duration::hours(lifetime_hours)).timestamp();
    let claims = Claims {
        user_id: user_id.to_string(),
        role,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| StandardError::new(&format!("ERR-AUTH-004: {}", e)))
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED))
}

// bcrypt is CPU-bound, keep it off the async workers
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| StandardError::new(&format!("ERR-AUTH-005: {}", e)))?
        .map_err(|e| StandardError::new(&format!("ERR-AUTH-005: {}", e)))
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| StandardError::new(&format!("ERR-AUTH-005: {}", e)))?
        .map_err(|e| StandardError::new(&format!("ERR-AUTH-005: {}", e)))
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn test_jwt_round_trip() -> Result<()> {
        let token = create_jwt("user-1", Role::User, "sekret", 1)?;
        let claims = verify_jwt(&token, "sekret")?;
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.role, Role::User);
        Ok(())
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let token = create_jwt("user-1", Role::Admin, "sekret", 1).unwrap();
        assert!(verify_jwt(&token, "other").is_err());
    }

    #[test]
    fn test_jwt_rejects_garbage() {
        assert!(verify_jwt("not-a-token", "sekret").is_err());
    }

    #[traced_test]
    #[tokio::test]
    async fn test_password_hash_and_verify() -> Result<()> {
        let hash = hash_password("correct horse battery").await?;
        assert!(verify_password("correct horse battery", &hash).await?);
        assert!(!verify_password("wrong password", &hash).await?);
        Ok(())
    }
}
