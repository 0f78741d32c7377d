use serde::Serialize;

use super::UserData;
use crate::domain::user::models::Session;

pub mod login;
pub mod logout;
pub mod me;
pub mod register;

/// Response for register and login: the user and a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub token: String,
    pub user: UserData,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            user: (&session.user).into(),
        }
    }
}
