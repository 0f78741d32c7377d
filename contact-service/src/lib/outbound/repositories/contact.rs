use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::CompanyName;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::ContactKind;
use crate::domain::contact::models::ContactType;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::PersonName;
use crate::domain::contact::models::SirenNumber;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

const UNIQUE_EMAIL_CONSTRAINT: &str = "contacts_user_id_email_key";

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i64,
    user_id: i64,
    contact_type: String,
    first_name: Option<String>,
    last_name: Option<String>,
    company_name: Option<String>,
    siren_number: Option<String>,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn required(value: Option<String>, column: &str, id: i64) -> Result<String, ContactError> {
    value.ok_or_else(|| ContactError::DatabaseError(format!("contact {} has no {}", id, column)))
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let contact_type = row
            .contact_type
            .parse::<ContactType>()
            .map_err(ContactError::DatabaseError)?;

        let kind = match contact_type {
            ContactType::Individual => ContactKind::Individual {
                first_name: PersonName::new(
                    required(row.first_name, "first_name", row.id)?,
                    "first_name",
                )?,
                last_name: PersonName::new(
                    required(row.last_name, "last_name", row.id)?,
                    "last_name",
                )?,
            },
            ContactType::Professional => ContactKind::Professional {
                company_name: CompanyName::new(required(row.company_name, "company_name", row.id)?)?,
                siren_number: SirenNumber::new(required(row.siren_number, "siren_number", row.id)?)?,
            },
        };

        Ok(Contact {
            id: ContactId(row.id),
            user_id: UserId(row.user_id),
            kind,
            email: EmailAddress::new(row.email)
                .map_err(|e| ContactError::DatabaseError(format!("contact {}: {}", row.id, e)))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Column values for a contact kind: (first_name, last_name, company_name, siren_number).
fn kind_columns(
    kind: &ContactKind,
) -> (Option<&str>, Option<&str>, Option<&str>, Option<&str>) {
    match kind {
        ContactKind::Individual {
            first_name,
            last_name,
        } => (Some(first_name.as_str()), Some(last_name.as_str()), None, None),
        ContactKind::Professional {
            company_name,
            siren_number,
        } => (None, None, Some(company_name.as_str()), Some(siren_number.as_str())),
    }
}

fn write_error(e: sqlx::Error, email: &EmailAddress) -> ContactError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(UNIQUE_EMAIL_CONSTRAINT) {
            return ContactError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    ContactError::DatabaseError(e.to_string())
}

/// Escape LIKE metacharacters so user input matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, contact: NewContact) -> Result<Contact, ContactError> {
        let (first_name, last_name, company_name, siren_number) = kind_columns(&contact.kind);

        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (user_id, type, first_name, last_name, company_name, siren_number, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, type AS contact_type, first_name, last_name,
                      company_name, siren_number, email, created_at, updated_at
            "#,
        )
        .bind(contact.user_id.0)
        .bind(contact.kind.contact_type().as_str())
        .bind(first_name)
        .bind(last_name)
        .bind(company_name)
        .bind(siren_number)
        .bind(contact.email.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &contact.email))?;

        row.try_into()
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, type AS contact_type, first_name, last_name,
                   company_name, siren_number, email, created_at, updated_at
            FROM contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        row.map(Contact::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        owner: &UserId,
        email: &EmailAddress,
    ) -> Result<Option<Contact>, ContactError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, type AS contact_type, first_name, last_name,
                   company_name, siren_number, email, created_at, updated_at
            FROM contacts
            WHERE user_id = $1 AND email = $2
            "#,
        )
        .bind(owner.0)
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        row.map(Contact::try_from).transpose()
    }

    async fn list(
        &self,
        owner: &UserId,
        search: Option<String>,
    ) -> Result<Vec<Contact>, ContactError> {
        let pattern = search.as_deref().map(like_pattern);

        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, type AS contact_type, first_name, last_name,
                   company_name, siren_number, email, created_at, updated_at
            FROM contacts
            WHERE user_id = $1
              AND ($2::TEXT IS NULL
                   OR email ILIKE $2
                   OR first_name ILIKE $2
                   OR last_name ILIKE $2
                   OR company_name ILIKE $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner.0)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let (first_name, last_name, company_name, siren_number) = kind_columns(&contact.kind);

        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            UPDATE contacts
            SET type = $3, first_name = $4, last_name = $5, company_name = $6,
                siren_number = $7, email = $8, updated_at = $9
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, type AS contact_type, first_name, last_name,
                      company_name, siren_number, email, created_at, updated_at
            "#,
        )
        .bind(contact.id.0)
        .bind(contact.user_id.0)
        .bind(contact.kind.contact_type().as_str())
        .bind(first_name)
        .bind(last_name)
        .bind(company_name)
        .bind(siren_number)
        .bind(contact.email.as_str())
        .bind(contact.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &contact.email))?;

        row.ok_or(ContactError::NotFound(contact.id))?.try_into()
    }

    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(*id));
        }

        Ok(())
    }
}
