use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::contact::ports::ContactServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for contact operations.
pub struct ContactService<CR>
where
    CR: ContactRepository,
{
    repository: Arc<CR>,
}

impl<CR> ContactService<CR>
where
    CR: ContactRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ContactServicePort for ContactService<CR>
where
    CR: ContactRepository,
{
    async fn create_contact(
        &self,
        owner: &UserId,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError> {
        if self
            .repository
            .find_by_email(owner, &command.email)
            .await?
            .is_some()
        {
            return Err(ContactError::EmailAlreadyExists(command.email.to_string()));
        }

        let contact = self
            .repository
            .create(NewContact {
                user_id: *owner,
                kind: command.kind,
                email: command.email,
            })
            .await?;

        tracing::info!(
            user_id = %owner,
            contact_id = %contact.id,
            contact_type = contact.kind.contact_type().as_str(),
            "Contact created"
        );

        Ok(contact)
    }

    async fn list_contacts(
        &self,
        owner: &UserId,
        search: Option<&str>,
    ) -> Result<Vec<Contact>, ContactError> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        self.repository.list(owner, search).await
    }

    async fn get_contact(&self, owner: &UserId, id: &ContactId) -> Result<Contact, ContactError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(ContactError::NotFound(*id))
    }

    async fn update_contact(
        &self,
        owner: &UserId,
        id: &ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError> {
        let existing = self
            .repository
            .find_by_id(owner, id)
            .await?
            .ok_or(ContactError::NotFound(*id))?;

        let (kind, email) = command.merge(&existing)?;

        let updated = self
            .repository
            .update(Contact {
                kind,
                email,
                updated_at: Utc::now(),
                ..existing
            })
            .await?;

        tracing::info!(user_id = %owner, contact_id = %updated.id, "Contact updated");

        Ok(updated)
    }

    async fn delete_contact(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError> {
        self.repository.delete(owner, id).await?;

        tracing::info!(user_id = %owner, contact_id = %id, "Contact deleted");

        Ok(())
    }
}
