use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use standard_error::{StandardError, Status};
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::{
                jobs::selectors::JobSelector,
                users::{mutators::UserMutator, selectors::UserSelector, spec::UserEntry},
            },
            auth::CurrentUser,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: UserEntry,
}

#[derive(Serialize)]
pub struct AppStats {
    pub users: i64,
    pub jobs: i64,
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
) -> Result<Json<UserResponse>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserSelector::new(&mut tx)
        .get_by_id(&user.user_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-001").code(StatusCode::NOT_FOUND))?;
    Ok(Json(UserResponse { user }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<Value>> {
    input.validate().map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION: {}", e)).code(StatusCode::BAD_REQUEST)
    })?;
    let mut tx = state.db_pool.begin_txn().await?;
    if let Some(existing) = UserSelector::new(&mut tx).get_by_email(&input.email).await? {
        if existing.user_id != user.user_id {
            return Err(StandardError::new("ERR-AUTH-006: email already exists")
                .code(StatusCode::BAD_REQUEST));
        }
    }
    UserMutator::new(&mut tx)
        .update_profile(&user.user_id, &input)
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-001").code(StatusCode::NOT_FOUND))?;
    tx.commit().await?;
    Ok(Json(json!({"msg": "user updated"})))
}

pub async fn app_stats(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<CurrentUser>>,
) -> Result<Json<AppStats>> {
    if !user.is_admin() {
        return Err(StandardError::new("ERR-AUTH-007: unauthorized to access this route")
            .code(StatusCode::FORBIDDEN));
    }
    let mut tx = state.db_pool.begin_txn().await?;
    let users = UserSelector::new(&mut tx).count().await?;
    let jobs = JobSelector::new(&mut tx).count_all().await?;
    Ok(Json(AppStats { users, jobs }))
}
