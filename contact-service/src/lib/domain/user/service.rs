use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IdentityClaims;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Password hashing and verification are moved to the blocking pool so
/// they do not stall request handling on the async executor.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

fn claims_for(user: &User) -> IdentityClaims {
    IdentityClaims::new(user.id.0, user.email.as_str())
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let record =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                password: record,
            })
            .await?;

        let token = self.authenticator.issue_token(&claims_for(&user))?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(Session { user, token })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::info!("Login rejected: unknown email");
                return Err(UserError::InvalidCredentials);
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let record = user.password.clone();
        let claims = claims_for(&user);
        let password = command.password;
        let result =
            tokio::task::spawn_blocking(move || authenticator.login(&password, &record, &claims))
                .await
                .map_err(|e| {
                    UserError::Unknown(format!("Password verification task failed: {}", e))
                })?;

        let token = result.map_err(|e| {
            tracing::info!(user_id = %user.id, error = %e, "Login rejected");
            UserError::from(e)
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session { user, token })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(*id))
    }
}
