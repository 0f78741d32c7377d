use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Tokens are stateless; logging out is the client discarding its token.
pub async fn logout(Extension(auth_user): Extension<AuthenticatedUser>) -> ApiSuccess<MessageData> {
    tracing::info!(user_id = %auth_user.user_id, "User logged out");

    ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out"))
}
