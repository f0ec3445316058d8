//! In-memory identity service and document store (demo mode and tests).

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::{AuthError, FetchError},
    identity::{IdentityService, SessionHub, SessionSubscription, UserIdentity},
    store::{RecordLookup, RecordStore},
};

const DEMO_FIXTURE: &str = include_str!("../fixtures/demo_users.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub uid: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    documents: HashMap<String, Value>,
}

#[derive(Clone, Default)]
pub struct MemoryBackend {
    accounts: Rc<RefCell<Vec<Account>>>,
    documents: Rc<RefCell<HashMap<String, Value>>>,
    session: SessionHub,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with the bundled demo account.
    pub fn demo() -> Result<Self, FetchError> {
        Self::from_fixture(DEMO_FIXTURE)
    }

    /// Build from a JSON fixture `{ "accounts": [...], "documents": { uid: doc } }`.
    pub fn from_fixture(raw: &str) -> Result<Self, FetchError> {
        let fixture: Fixture = serde_json::from_str(raw)?;
        let backend = Self::new();
        *backend.accounts.borrow_mut() = fixture.accounts;
        *backend.documents.borrow_mut() = fixture.documents;
        Ok(backend)
    }

    pub fn with_account(self, account: Account) -> Self {
        self.accounts.borrow_mut().push(account);
        self
    }

    pub fn with_document(self, uid: impl Into<String>, document: Value) -> Self {
        self.documents.borrow_mut().insert(uid.into(), document);
        self
    }

    /// `(email, password)` of the first seeded account, for the login hint.
    pub fn demo_credentials(&self) -> Option<(String, String)> {
        self.accounts
            .borrow()
            .first()
            .map(|a| (a.email.clone(), a.password.clone()))
    }
}

impl IdentityService for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }

        let account = self
            .accounts
            .borrow()
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(AuthError::UserNotFound)?;

        if account.disabled {
            return Err(AuthError::UserDisabled);
        }
        if account.password != password {
            return Err(AuthError::WrongPassword);
        }

        let identity = UserIdentity::new(account.uid, account.email);
        tracing::info!(uid = %identity.uid, "signed in (memory backend)");
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.session.set(None);
        Ok(())
    }

    fn current_user(&self) -> Option<UserIdentity> {
        self.session.current()
    }

    fn on_session_change(
        &self,
        callback: impl Fn(Option<UserIdentity>) + 'static,
    ) -> SessionSubscription {
        self.session.subscribe(callback)
    }

    fn unsubscribe(&self, subscription: SessionSubscription) {
        self.session.unsubscribe(subscription);
    }
}

impl RecordStore for MemoryBackend {
    async fn fetch_user_record(&self, uid: &str) -> Result<RecordLookup, FetchError> {
        if self.session.current().is_none() {
            return Err(FetchError::NotSignedIn);
        }

        match self.documents.borrow().get(uid) {
            None => Ok(RecordLookup::NotFound),
            Some(Value::Object(document)) => Ok(RecordLookup::Found(document.clone())),
            Some(_) => Ok(RecordLookup::Found(Map::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::extract_stats;
    use futures::executor::block_on;
    use serde_json::json;

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_account(Account {
                uid: "u1".into(),
                email: "typist@example.com".into(),
                password: "secret".into(),
                disabled: false,
            })
            .with_document("u1", json!({ "stats": { "averageWpm": 55 } }))
    }

    #[test]
    fn wrong_password_is_rejected() {
        let b = backend();
        let err = block_on(b.sign_in("typist@example.com", "nope")).unwrap_err();
        assert_eq!(err, AuthError::WrongPassword);
        assert!(b.current_user().is_none());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = block_on(backend().sign_in("typist", "secret")).unwrap_err();
        assert_eq!(err.code(), "auth/invalid-email");
    }

    #[test]
    fn sign_in_then_fetch_returns_document() {
        let b = backend();
        let user = block_on(b.sign_in("Typist@Example.com", "secret")).unwrap();
        assert_eq!(user.uid, "u1");

        let RecordLookup::Found(document) = block_on(b.fetch_user_record("u1")).unwrap() else {
            panic!("expected a document");
        };
        assert_eq!(extract_stats(&document).unwrap()["averageWpm"], json!(55));

        assert_eq!(
            block_on(b.fetch_user_record("someone-else")).unwrap(),
            RecordLookup::NotFound
        );
    }

    #[test]
    fn fetch_requires_session() {
        let err = block_on(backend().fetch_user_record("u1")).unwrap_err();
        assert!(matches!(err, FetchError::NotSignedIn));
    }

    #[test]
    fn sign_out_notifies_listeners() {
        let b = backend();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        b.on_session_change(move |user| sink.borrow_mut().push(user.is_some()));

        block_on(b.sign_in("typist@example.com", "secret")).unwrap();
        block_on(b.sign_out()).unwrap();

        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[test]
    fn demo_fixture_loads() {
        let b = MemoryBackend::demo().unwrap();
        assert_eq!(
            b.demo_credentials(),
            Some(("demo@fingerfit.app".to_string(), "fingerfit-demo".to_string()))
        );
    }
}
