use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::errors::ContactIdError;
use crate::domain::contact::errors::NameError;
use crate::domain::contact::errors::SirenError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Contact unique identifier type (database serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub i64);

impl ContactId {
    /// Parse a contact ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, ContactIdError> {
        s.parse::<i64>()
            .map(ContactId)
            .map_err(|_| ContactIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Contact aggregate, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub user_id: UserId,
    pub kind: ContactKind,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Type-specific contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactKind {
    Individual {
        first_name: PersonName,
        last_name: PersonName,
    },
    Professional {
        company_name: CompanyName,
        siren_number: SirenNumber,
    },
}

impl ContactKind {
    pub fn contact_type(&self) -> ContactType {
        match self {
            ContactKind::Individual { .. } => ContactType::Individual,
            ContactKind::Professional { .. } => ContactType::Professional,
        }
    }
}

/// Discriminant of `ContactKind`, as stored and as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Individual,
    Professional,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Individual => "individual",
            ContactType::Professional => "professional",
        }
    }
}

impl FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(ContactType::Individual),
            "professional" => Ok(ContactType::Professional),
            other => Err(format!("unknown contact type: {}", other)),
        }
    }
}

fn bounded_text(value: String, field: &'static str, max: usize) -> Result<String, NameError> {
    let length = value.chars().count();
    if value.trim().is_empty() {
        Err(NameError::Empty { field })
    } else if length > max {
        Err(NameError::TooLong {
            field,
            max,
            actual: length,
        })
    } else {
        Ok(value)
    }
}

/// First or last name of an individual: 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String, field: &'static str) -> Result<Self, NameError> {
        bounded_text(name, field, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Company name: 1-255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, NameError> {
        bounded_text(name, "company_name", Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// French company registry number: exactly nine ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SirenNumber(String);

impl SirenNumber {
    pub fn new(siren: String) -> Result<Self, SirenError> {
        if siren.len() == 9 && siren.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(siren))
        } else {
            Err(SirenError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact to be persisted; id and timestamps are assigned by storage.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub user_id: UserId,
    pub kind: ContactKind,
    pub email: EmailAddress,
}

/// Command to create a contact with validated fields
#[derive(Debug, Clone)]
pub struct CreateContactCommand {
    pub kind: ContactKind,
    pub email: EmailAddress,
}

/// Command to update a contact.
///
/// The type is mandatory; every other field is optional and falls back to
/// the existing contact's value when the type is unchanged.
#[derive(Debug, Clone)]
pub struct UpdateContactCommand {
    pub contact_type: ContactType,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub company_name: Option<CompanyName>,
    pub siren_number: Option<SirenNumber>,
    pub email: Option<EmailAddress>,
}

impl UpdateContactCommand {
    /// Merge this update into `existing`, returning the new kind and email.
    ///
    /// Fields belonging to the other type are dropped.
    ///
    /// # Errors
    /// * `IncompleteContact` - A required field of the new type is neither
    ///   supplied nor present on the existing contact
    pub fn merge(self, existing: &Contact) -> Result<(ContactKind, EmailAddress), ContactError> {
        let kind = match self.contact_type {
            ContactType::Individual => {
                let (current_first, current_last) = match &existing.kind {
                    ContactKind::Individual {
                        first_name,
                        last_name,
                    } => (Some(first_name.clone()), Some(last_name.clone())),
                    ContactKind::Professional { .. } => (None, None),
                };

                ContactKind::Individual {
                    first_name: self
                        .first_name
                        .or(current_first)
                        .ok_or(ContactError::IncompleteContact("first_name"))?,
                    last_name: self
                        .last_name
                        .or(current_last)
                        .ok_or(ContactError::IncompleteContact("last_name"))?,
                }
            }
            ContactType::Professional => {
                let (current_company, current_siren) = match &existing.kind {
                    ContactKind::Professional {
                        company_name,
                        siren_number,
                    } => (Some(company_name.clone()), Some(siren_number.clone())),
                    ContactKind::Individual { .. } => (None, None),
                };

                ContactKind::Professional {
                    company_name: self
                        .company_name
                        .or(current_company)
                        .ok_or(ContactError::IncompleteContact("company_name"))?,
                    siren_number: self
                        .siren_number
                        .or(current_siren)
                        .ok_or(ContactError::IncompleteContact("siren_number"))?,
                }
            }
        };

        let email = self.email.unwrap_or_else(|| existing.email.clone());

        Ok((kind, email))
    }
}
