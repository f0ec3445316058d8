//! Identity collaborator: sign-in, sign-out and session-change notification.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The signed-in user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: Some(email.into()),
        }
    }

    /// Text shown next to the sign-out button.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(self.uid.as_str())
    }
}

/// Handle returned by [`IdentityService::on_session_change`]; pass it back to
/// [`IdentityService::unsubscribe`] to stop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSubscription(u64);

type SessionCallback = Rc<dyn Fn(Option<UserIdentity>)>;

/// Single-threaded session state plus its listeners. Shared by the concrete
/// backends so notification semantics stay identical across them.
#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Rc<RefCell<HubState>>,
}

#[derive(Default)]
struct HubState {
    current: Option<UserIdentity>,
    next_id: u64,
    listeners: Vec<(SessionSubscription, SessionCallback)>,
}

impl SessionHub {
    pub fn current(&self) -> Option<UserIdentity> {
        self.inner.borrow().current.clone()
    }

    /// Register a listener and fire it immediately with the current state.
    pub fn subscribe(&self, callback: impl Fn(Option<UserIdentity>) + 'static) -> SessionSubscription {
        let callback: SessionCallback = Rc::new(callback);
        let (id, current) = {
            let mut state = self.inner.borrow_mut();
            state.next_id += 1;
            let id = SessionSubscription(state.next_id);
            state.listeners.push((id, callback.clone()));
            (id, state.current.clone())
        };
        callback(current);
        id
    }

    pub fn unsubscribe(&self, subscription: SessionSubscription) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != subscription);
    }

    /// Replace the session and notify every listener. Listeners are invoked
    /// outside the borrow so they may call back into the hub.
    pub fn set(&self, identity: Option<UserIdentity>) {
        let listeners: Vec<SessionCallback> = {
            let mut state = self.inner.borrow_mut();
            state.current = identity.clone();
            state.listeners.iter().map(|(_, cb)| cb.clone()).collect()
        };
        tracing::debug!(
            signed_in = identity.is_some(),
            listeners = listeners.len(),
            "session changed"
        );
        for listener in listeners {
            listener(identity.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Contract the dashboard needs from an identity provider.
#[allow(async_fn_in_trait)]
pub trait IdentityService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn current_user(&self) -> Option<UserIdentity>;

    /// Notified with the current state on registration and on every change.
    fn on_session_change(
        &self,
        callback: impl Fn(Option<UserIdentity>) + 'static,
    ) -> SessionSubscription;

    fn unsubscribe(&self, subscription: SessionSubscription);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_fires_with_current_state() {
        let hub = SessionHub::default();
        hub.set(Some(UserIdentity::new("u1", "a@b.c")));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        hub.subscribe(move |identity| sink.borrow_mut().push(identity.map(|u| u.uid)));

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string())]);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let hub = SessionHub::default();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let sub = hub.subscribe(move |_| *sink.borrow_mut() += 1);

        hub.set(None);
        hub.unsubscribe(sub);
        hub.set(Some(UserIdentity::new("u2", "x@y.z")));

        assert_eq!(*count.borrow(), 2);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn display_name_prefers_email() {
        let with_email = UserIdentity::new("uid-1", "typist@example.com");
        assert_eq!(with_email.display_name(), "typist@example.com");

        let without = UserIdentity {
            uid: "uid-2".into(),
            email: None,
        };
        assert_eq!(without.display_name(), "uid-2");
    }
}
