use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use standard_error::{StandardError, Status};

use crate::{conf::settings, pkg::internal::auth::CurrentUser, prelude::Result};

pub async fn authenticate(headers: HeaderMap, mut request: Request, next: Next) -> Result<Response> {
    let jar = CookieJar::from_headers(&headers);
    if let Some(cookie) = jar.get("token").filter(|c| !c.value().is_empty()) {
        match CurrentUser::from_token(cookie.value(), &settings.jwt_secret) {
            Ok(user) => {
                request.extensions_mut().insert(Arc::new(user));
                return Ok(next.run(request).await);
            }
            Err(err) => {
                tracing::warn!("token rejected: {}", err);
            }
        }
    } else {
        tracing::warn!("token missing, authentication denied");
    }
    Err(StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED))
}
