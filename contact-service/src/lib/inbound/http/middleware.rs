use auth::AuthenticatedContext;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl From<AuthenticatedContext> for AuthenticatedUser {
    fn from(context: AuthenticatedContext) -> Self {
        Self {
            user_id: UserId(context.user_id),
            email: context.email,
        }
    }
}

/// Middleware that verifies the bearer token and adds the caller to request
/// extensions. The 401 body never says why a token was rejected; the token
/// failure kind is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let context = state.gate.authenticate(header_value).map_err(|e| {
        match e.token_error() {
            Some(reason) => tracing::warn!(reason = %reason, "Token verification failed"),
            None => tracing::debug!("Request without bearer credential"),
        }
        ApiError::from(e)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser::from(context));

    Ok(next.run(req).await)
}
