use async_trait::async_trait;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Port for contact domain service operations.
///
/// Every operation is scoped to `owner`, the authenticated user. Contacts
/// belonging to anyone else behave as if they did not exist.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// Create a contact.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Owner already has a contact with this email
    /// * `DatabaseError` - Database operation failed
    async fn create_contact(
        &self,
        owner: &UserId,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// List the owner's contacts, optionally filtered by a case-insensitive
    /// substring of email, first name, last name or company name.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_contacts(
        &self,
        owner: &UserId,
        search: Option<&str>,
    ) -> Result<Vec<Contact>, ContactError>;

    /// # Errors
    /// * `NotFound` - Contact does not exist for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_contact(&self, owner: &UserId, id: &ContactId) -> Result<Contact, ContactError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist for this owner
    /// * `IncompleteContact` - Required field of the new type is missing
    /// * `EmailAlreadyExists` - Another contact of this owner has the email
    /// * `DatabaseError` - Database operation failed
    async fn update_contact(
        &self,
        owner: &UserId,
        id: &ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// # Errors
    /// * `NotFound` - Contact does not exist for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_contact(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError>;
}

/// Persistence operations for contact aggregate.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// # Errors
    /// * `EmailAlreadyExists` - Owner already has a contact with this email
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, contact: NewContact) -> Result<Contact, ContactError>;

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactError>;

    async fn find_by_email(
        &self,
        owner: &UserId,
        email: &EmailAddress,
    ) -> Result<Option<Contact>, ContactError>;

    /// `search` is a plain substring, not a pattern.
    async fn list(
        &self,
        owner: &UserId,
        search: Option<String>,
    ) -> Result<Vec<Contact>, ContactError>;

    /// Overwrite a contact's fields, scoped by its `user_id`.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist for this owner
    /// * `EmailAlreadyExists` - Another contact of this owner has the email
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// # Errors
    /// * `NotFound` - Contact does not exist for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError>;
}
