use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenSecret;
use auth::TokenService;
use chrono::Utc;
use contact_service::domain::contact::errors::ContactError;
use contact_service::domain::contact::models::Contact;
use contact_service::domain::contact::models::ContactId;
use contact_service::domain::contact::models::ContactKind;
use contact_service::domain::contact::models::NewContact;
use contact_service::domain::contact::ports::ContactRepository;
use contact_service::domain::contact::service::ContactService;
use contact_service::domain::user::errors::UserError;
use contact_service::domain::user::models::EmailAddress;
use contact_service::domain::user::models::NewUser;
use contact_service::domain::user::models::User;
use contact_service::domain::user::models::UserId;
use contact_service::domain::user::ports::UserRepository;
use contact_service::domain::user::service::UserService;
use contact_service::inbound::http::router::create_router;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-token-signing";
pub const TEST_PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Signs tokens with the server's secret, for crafting edge cases.
    pub tokens: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            fast_hasher(),
            token_service(TEST_SECRET),
        ));
        let gate = authenticator.gate();

        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            authenticator,
        ));
        let contact_service = Arc::new(ContactService::new(Arc::new(
            InMemoryContactRepository::default(),
        )));

        let router = create_router(user_service, contact_service, gate);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            tokens: token_service(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its token
    pub async fn register(&self, email: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&json!({ "email": email, "password": TEST_PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Create an individual contact and return its id
    pub async fn create_individual(&self, token: &str, first: &str, last: &str, email: &str) -> i64 {
        let response = self
            .post_authenticated("/api/contacts", token)
            .json(&json!({
                "type": "individual",
                "first_name": first,
                "last_name": last,
                "email": email
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing contact id")
    }
}

pub fn token_service(secret: &str) -> TokenService {
    let secret = TokenSecret::new(secret).expect("Invalid test secret");
    TokenService::new(&secret, chrono::Duration::hours(5))
}

fn fast_hasher() -> PasswordHasher {
    PasswordHasher::with_params(1024, 1, 1).expect("Invalid test hasher params")
}

#[derive(Default)]
struct UserStore {
    next_id: i64,
    users: Vec<User>,
}

/// User repository backed by a vector
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<UserStore>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut store = self.store.lock().unwrap();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        store.next_id += 1;
        let created = User {
            id: UserId(store.next_id),
            email: user.email,
            password: user.password,
            created_at: Utc::now(),
        };
        store.users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email == *email).cloned())
    }
}

#[derive(Default)]
struct ContactStore {
    next_id: i64,
    contacts: Vec<Contact>,
}

/// Contact repository backed by a vector
#[derive(Default)]
pub struct InMemoryContactRepository {
    store: Mutex<ContactStore>,
}

fn matches_search(contact: &Contact, needle: &str) -> bool {
    let mut fields = vec![contact.email.as_str()];
    match &contact.kind {
        ContactKind::Individual {
            first_name,
            last_name,
        } => {
            fields.push(first_name.as_str());
            fields.push(last_name.as_str());
        }
        ContactKind::Professional { company_name, .. } => fields.push(company_name.as_str()),
    }

    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: NewContact) -> Result<Contact, ContactError> {
        let mut store = self.store.lock().unwrap();
        if store
            .contacts
            .iter()
            .any(|c| c.user_id == contact.user_id && c.email == contact.email)
        {
            return Err(ContactError::EmailAlreadyExists(contact.email.to_string()));
        }

        store.next_id += 1;
        let now = Utc::now();
        let created = Contact {
            id: ContactId(store.next_id),
            user_id: contact.user_id,
            kind: contact.kind,
            email: contact.email,
            created_at: now,
            updated_at: now,
        };
        store.contacts.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .contacts
            .iter()
            .find(|c| c.user_id == *owner && c.id == *id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        owner: &UserId,
        email: &EmailAddress,
    ) -> Result<Option<Contact>, ContactError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .contacts
            .iter()
            .find(|c| c.user_id == *owner && c.email == *email)
            .cloned())
    }

    async fn list(
        &self,
        owner: &UserId,
        search: Option<String>,
    ) -> Result<Vec<Contact>, ContactError> {
        let store = self.store.lock().unwrap();
        let needle = search.map(|s| s.to_lowercase());

        let mut contacts: Vec<Contact> = store
            .contacts
            .iter()
            .filter(|c| c.user_id == *owner)
            .filter(|c| needle.as_deref().map_or(true, |n| matches_search(c, n)))
            .cloned()
            .collect();
        contacts.sort_by(|a, b| b.id.0.cmp(&a.id.0));

        Ok(contacts)
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let mut store = self.store.lock().unwrap();
        if store.contacts.iter().any(|c| {
            c.user_id == contact.user_id && c.id != contact.id && c.email == contact.email
        }) {
            return Err(ContactError::EmailAlreadyExists(contact.email.to_string()));
        }

        let slot = store
            .contacts
            .iter_mut()
            .find(|c| c.user_id == contact.user_id && c.id == contact.id)
            .ok_or(ContactError::NotFound(contact.id))?;
        *slot = contact.clone();

        Ok(contact)
    }

    async fn delete(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError> {
        let mut store = self.store.lock().unwrap();
        let before = store.contacts.len();
        store
            .contacts
            .retain(|c| !(c.user_id == *owner && c.id == *id));

        if store.contacts.len() == before {
            return Err(ContactError::NotFound(*id));
        }

        Ok(())
    }
}
