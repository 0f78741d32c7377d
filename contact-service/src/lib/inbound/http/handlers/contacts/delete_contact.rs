use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(contact_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let contact_id = ContactId::from_string(&contact_id).map_err(ContactError::from)?;

    state
        .contact_service
        .delete_contact(&auth_user.user_id, &contact_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Contact deleted"),
    ))
}
