use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ContactData;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ListContactsQuery>,
) -> Result<ApiSuccess<ListContactsResponseData>, ApiError> {
    let contacts = state
        .contact_service
        .list_contacts(&auth_user.user_id, query.search.as_deref())
        .await?;

    let contacts: Vec<ContactData> = contacts.iter().map(ContactData::from).collect();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListContactsResponseData {
            count: contacts.len(),
            contacts,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListContactsQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListContactsResponseData {
    pub contacts: Vec<ContactData>,
    pub count: usize,
}
