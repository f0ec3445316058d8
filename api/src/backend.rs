//! Runtime-selected collaborator: the hosted Firebase project when configured,
//! otherwise the in-memory demo backend.

use crate::{
    config::FirebaseConfig,
    error::{AuthError, FetchError},
    firebase::FirebaseBackend,
    identity::{IdentityService, SessionSubscription, UserIdentity},
    memory::MemoryBackend,
    store::{RecordLookup, RecordStore},
};

#[derive(Clone)]
pub enum Backend {
    Firebase(FirebaseBackend),
    Memory(MemoryBackend),
}

impl Backend {
    /// Pick the Firebase backend if its configuration is present, falling
    /// back to the demo data set.
    pub fn from_env() -> Self {
        match FirebaseConfig::from_env() {
            Ok(config) => {
                tracing::info!(project = %config.project_id, "using firebase backend");
                Self::Firebase(FirebaseBackend::new(config))
            }
            Err(err) => {
                tracing::warn!(%err, "firebase not configured; using demo backend");
                match MemoryBackend::demo() {
                    Ok(memory) => Self::Memory(memory),
                    Err(err) => {
                        tracing::warn!(%err, "demo fixture unreadable; starting empty");
                        Self::Memory(MemoryBackend::new())
                    }
                }
            }
        }
    }

    /// Sign-in hint shown on the login form in demo mode.
    pub fn demo_credentials(&self) -> Option<(String, String)> {
        match self {
            Self::Firebase(_) => None,
            Self::Memory(memory) => memory.demo_credentials(),
        }
    }
}

impl IdentityService for Backend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        match self {
            Self::Firebase(inner) => inner.sign_in(email, password).await,
            Self::Memory(inner) => inner.sign_in(email, password).await,
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        match self {
            Self::Firebase(inner) => inner.sign_out().await,
            Self::Memory(inner) => inner.sign_out().await,
        }
    }

    fn current_user(&self) -> Option<UserIdentity> {
        match self {
            Self::Firebase(inner) => inner.current_user(),
            Self::Memory(inner) => inner.current_user(),
        }
    }

    fn on_session_change(
        &self,
        callback: impl Fn(Option<UserIdentity>) + 'static,
    ) -> SessionSubscription {
        match self {
            Self::Firebase(inner) => inner.on_session_change(callback),
            Self::Memory(inner) => inner.on_session_change(callback),
        }
    }

    fn unsubscribe(&self, subscription: SessionSubscription) {
        match self {
            Self::Firebase(inner) => inner.unsubscribe(subscription),
            Self::Memory(inner) => inner.unsubscribe(subscription),
        }
    }
}

impl RecordStore for Backend {
    async fn fetch_user_record(&self, uid: &str) -> Result<RecordLookup, FetchError> {
        match self {
            Self::Firebase(inner) => inner.fetch_user_record(uid).await,
            Self::Memory(inner) => inner.fetch_user_record(uid).await,
        }
    }
}
