use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
};
use serde::Deserialize;
use serde_json::{Value, json};
use standard_error::{StandardError, Status};
use validator::Validate;

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::users::{mutators::UserMutator, selectors::UserSelector},
            auth::{self, Role},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be 8 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Value>)> {
    input.validate().map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION: {}", e)).code(StatusCode::BAD_REQUEST)
    })?;
    let mut tx = state.db_pool.begin_txn().await?;
    if UserSelector::new(&mut tx)
        .get_by_email(&input.email)
        .await?
        .is_some()
    {
        return Err(
            StandardError::new("ERR-AUTH-006: email already exists").code(StatusCode::BAD_REQUEST)
        );
    }
    // first account becomes admin
    let role = if UserSelector::new(&mut tx).count().await? == 0 {
        Role::Admin
    } else {
        Role::User
    };
    let password_hash = auth::hash_password(&input.password).await?;
    let user = UserMutator::new(&mut tx)
        .create(&input, &password_hash, role)
        .await?;
    tx.commit().await?;
    tracing::info!("user {} registered", &user.email);
    Ok((StatusCode::CREATED, Json(json!({"msg": "user created"}))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<(HeaderMap, Json<Value>)> {
    input.validate().map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION: {}", e)).code(StatusCode::BAD_REQUEST)
    })?;
    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserSelector::new(&mut tx)
        .get_by_email(&input.email)
        .await?
        .ok_or_else(invalid_credentials)?;
    if !auth::verify_password(&input.password, &user.password).await? {
        return Err(invalid_credentials());
    }
    let token = auth::create_jwt(
        &user.user_id,
        user.role,
        &settings.jwt_secret,
        settings.jwt_lifetime_hours,
    )?;
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&format!(
            "token={}; HttpOnly; Path=/; Max-Age={}",
            token,
            settings.jwt_lifetime_hours * 3600
        ))?,
    );
    tracing::info!("user {} logged in", &user.email);
    Ok((headers, Json(json!({"msg": "user logged in"}))))
}

pub async fn logout() -> Result<(HeaderMap, Json<Value>)> {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str("token=logout; HttpOnly; Path=/; Max-Age=0")?,
    );
    Ok((headers, Json(json!({"msg": "user logged out"}))))
}

fn invalid_credentials() -> StandardError {
    StandardError::new("ERR-AUTH-003: invalid credentials").code(StatusCode::UNAUTHORIZED)
}
