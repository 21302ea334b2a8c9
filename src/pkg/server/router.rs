use axum::middleware::from_fn;
use axum::routing::{patch, post};
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::auth::{login, logout, register};
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route(
            "/api/v1/jobs",
            get(handlers::jobs::list).post(handlers::jobs::create),
        )
        .route("/api/v1/jobs/stats", get(handlers::jobs::stats))
        .route(
            "/api/v1/jobs/{id}",
            get(handlers::jobs::get_single)
                .patch(handlers::jobs::update)
                .delete(handlers::jobs::remove),
        )
        .route("/api/v1/users/current-user", get(handlers::users::current_user))
        .route("/api/v1/users/update-user", patch(handlers::users::update_user))
        .route("/api/v1/users/admin/app-stats", get(handlers::users::app_stats))
        .layer(from_fn(authn::authenticate))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", get(logout))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
