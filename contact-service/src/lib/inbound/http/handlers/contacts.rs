use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::CompanyName;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactKind;
use crate::domain::contact::models::ContactType;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::PersonName;
use crate::domain::contact::models::SirenNumber;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::user::models::EmailAddress;

pub mod create_contact;
pub mod delete_contact;
pub mod get_contact;
pub mod list_contacts;
pub mod update_contact;

/// Request DTO for creating a contact
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CreateContactRequest {
    Individual {
        first_name: String,
        last_name: String,
        email: String,
    },
    Professional {
        company_name: String,
        siren_number: String,
        email: String,
    },
}

impl CreateContactRequest {
    fn try_into_command(self) -> Result<CreateContactCommand, ContactError> {
        let (kind, email) = match self {
            CreateContactRequest::Individual {
                first_name,
                last_name,
                email,
            } => (
                ContactKind::Individual {
                    first_name: PersonName::new(first_name, "first_name")?,
                    last_name: PersonName::new(last_name, "last_name")?,
                },
                email,
            ),
            CreateContactRequest::Professional {
                company_name,
                siren_number,
                email,
            } => (
                ContactKind::Professional {
                    company_name: CompanyName::new(company_name)?,
                    siren_number: SirenNumber::new(siren_number)?,
                },
                email,
            ),
        };

        Ok(CreateContactCommand {
            kind,
            email: EmailAddress::new(email)?,
        })
    }
}

/// Request DTO for updating a contact; `type` is required, the rest optional
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateContactRequest {
    Individual {
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    },
    Professional {
        company_name: Option<String>,
        siren_number: Option<String>,
        email: Option<String>,
    },
}

impl UpdateContactRequest {
    fn try_into_command(self) -> Result<UpdateContactCommand, ContactError> {
        let command = match self {
            UpdateContactRequest::Individual {
                first_name,
                last_name,
                email,
            } => UpdateContactCommand {
                contact_type: ContactType::Individual,
                first_name: first_name
                    .map(|name| PersonName::new(name, "first_name"))
                    .transpose()?,
                last_name: last_name
                    .map(|name| PersonName::new(name, "last_name"))
                    .transpose()?,
                company_name: None,
                siren_number: None,
                email: email.map(EmailAddress::new).transpose()?,
            },
            UpdateContactRequest::Professional {
                company_name,
                siren_number,
                email,
            } => UpdateContactCommand {
                contact_type: ContactType::Professional,
                first_name: None,
                last_name: None,
                company_name: company_name.map(CompanyName::new).transpose()?,
                siren_number: siren_number.map(SirenNumber::new).transpose()?,
                email: email.map(EmailAddress::new).transpose()?,
            },
        };

        Ok(command)
    }
}

/// Response DTO for a contact; fields of the other type are null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactData {
    pub id: i64,
    #[serde(rename = "type")]
    pub contact_type: &'static str,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub siren_number: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Contact> for ContactData {
    fn from(contact: &Contact) -> Self {
        let (first_name, last_name, company_name, siren_number) = match &contact.kind {
            ContactKind::Individual {
                first_name,
                last_name,
            } => (
                Some(first_name.as_str().to_string()),
                Some(last_name.as_str().to_string()),
                None,
                None,
            ),
            ContactKind::Professional {
                company_name,
                siren_number,
            } => (
                None,
                None,
                Some(company_name.as_str().to_string()),
                Some(siren_number.as_str().to_string()),
            ),
        };

        Self {
            id: contact.id.0,
            contact_type: contact.kind.contact_type().as_str(),
            first_name,
            last_name,
            company_name,
            siren_number,
            email: contact.email.as_str().to_string(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}
