//! REST client for the hosted identity service and document store.

use std::{cell::RefCell, rc::Rc};

use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::FirebaseConfig,
    error::{AuthError, FetchError},
    firestore,
    identity::{IdentityService, SessionHub, SessionSubscription, UserIdentity},
    store::{RecordLookup, RecordStore},
};

#[derive(Clone)]
pub struct FirebaseBackend {
    config: FirebaseConfig,
    http: reqwest::Client,
    session: SessionHub,
    tokens: Rc<RefCell<Option<Tokens>>>,
}

/// Id token sent as the bearer credential, plus the refresh token that renews
/// it once it expires (after about an hour).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tokens {
    id_token: String,
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

/// Secure Token endpoint reply; unlike sign-in it uses snake_case fields.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl FirebaseBackend {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: SessionHub::default(),
            tokens: Rc::new(RefCell::new(None)),
        }
    }

    fn id_token(&self) -> Option<String> {
        self.tokens.borrow().as_ref().map(|t| t.id_token.clone())
    }

    /// Trade the refresh token for a fresh id token. `None` when there is no
    /// refresh token or the service refuses it.
    async fn refresh_id_token(&self) -> Result<Option<String>, FetchError> {
        let Some(refresh_token) = self
            .tokens
            .borrow()
            .as_ref()
            .map(|t| t.refresh_token.clone())
            .filter(|t| !t.is_empty())
        else {
            return Ok(None);
        };

        let response = self
            .http
            .post(self.config.token_refresh_url())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "id token refresh rejected");
            return Ok(None);
        }

        let body: RefreshResponse = response.json().await?;
        tracing::debug!("id token refreshed");
        *self.tokens.borrow_mut() = Some(Tokens {
            id_token: body.id_token.clone(),
            refresh_token: body.refresh_token,
        });
        Ok(Some(body.id_token))
    }

    /// Drop credentials and notify listeners so the UI returns to sign-in.
    fn expire_session(&self) {
        self.tokens.borrow_mut().take();
        self.session.set(None);
    }

    async fn get_document(&self, url: &Url, token: &str) -> Result<Response, FetchError> {
        Ok(self.http.get(url.clone()).bearer_auth(token).send().await?)
    }
}

/// The bearer token was rejected; a renewed token may still succeed.
fn needs_reauth(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}

impl IdentityService for FirebaseBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let response = self
            .http
            .post(self.config.sign_in_url())
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            tracing::warn!(%status, code = %message, "sign-in rejected");
            return Err(AuthError::from_rest_message(&message));
        }

        let body: SignInResponse = response.json().await?;
        let identity = UserIdentity {
            uid: body.local_id,
            email: body.email.or_else(|| Some(email.to_string())),
        };
        tracing::info!(uid = %identity.uid, "signed in");

        *self.tokens.borrow_mut() = Some(Tokens {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
        });
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.tokens.borrow_mut().take();
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

impl RecordStore for FirebaseBackend {
    async fn fetch_user_record(&self, uid: &str) -> Result<RecordLookup, FetchError> {
        let token = self.id_token().ok_or(FetchError::NotSignedIn)?;
        let url = self.config.user_document_url(uid)?;

        tracing::info!(uid, "fetching user record");
        let mut response = self.get_document(&url, &token).await?;

        if needs_reauth(response.status()) {
            let renewed = match self.refresh_id_token().await? {
                Some(fresh) => Some(self.get_document(&url, &fresh).await?),
                None => None,
            };
            response = match renewed {
                Some(retry) if !needs_reauth(retry.status()) => retry,
                _ => {
                    tracing::warn!(uid, "id token expired and could not be renewed");
                    self.expire_session();
                    return Err(FetchError::SessionExpired);
                }
            };
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(uid, "user record absent");
            return Ok(RecordLookup::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let document: Value = response.json().await?;
        Ok(RecordLookup::Found(firestore::decode_document(&document)))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use super::*;

    fn backend() -> FirebaseBackend {
        FirebaseBackend::new(FirebaseConfig {
            api_key: "key-123".into(),
            auth_domain: "demo.firebaseapp.com".into(),
            project_id: "demo-project".into(),
        })
    }

    fn signed_in(backend: &FirebaseBackend, refresh_token: &str) {
        *backend.tokens.borrow_mut() = Some(Tokens {
            id_token: "id-1".into(),
            refresh_token: refresh_token.into(),
        });
        backend
            .session
            .set(Some(UserIdentity::new("u1", "typist@example.com")));
    }

    #[test]
    fn only_unauthorized_triggers_reauth() {
        assert!(needs_reauth(StatusCode::UNAUTHORIZED));
        assert!(!needs_reauth(StatusCode::NOT_FOUND));
        assert!(!needs_reauth(StatusCode::FORBIDDEN));
        assert!(!needs_reauth(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn sign_in_reply_keeps_refresh_token() {
        let body: SignInResponse = serde_json::from_str(
            r#"{"localId":"u1","email":"a@b.c","idToken":"id-1","refreshToken":"rt-1"}"#,
        )
        .unwrap();
        assert_eq!(body.refresh_token, "rt-1");

        let bare: SignInResponse =
            serde_json::from_str(r#"{"localId":"u1","idToken":"id-1"}"#).unwrap();
        assert!(bare.refresh_token.is_empty());
    }

    #[test]
    fn refresh_reply_uses_snake_case() {
        let body: RefreshResponse = serde_json::from_str(
            r#"{"id_token":"id-2","refresh_token":"rt-2","expires_in":"3600","user_id":"u1"}"#,
        )
        .unwrap();
        assert_eq!(body.id_token, "id-2");
        assert_eq!(body.refresh_token, "rt-2");
    }

    #[test]
    fn refresh_without_refresh_token_gives_up_offline() {
        let backend = backend();
        signed_in(&backend, "");
        assert_eq!(block_on(backend.refresh_id_token()).unwrap(), None);
        assert_eq!(backend.id_token().as_deref(), Some("id-1"));
    }

    #[test]
    fn expired_session_clears_tokens_and_notifies() {
        let backend = backend();
        signed_in(&backend, "rt-1");

        let signed_out = Rc::new(Cell::new(false));
        let seen = signed_out.clone();
        let sub = backend.on_session_change(move |user| seen.set(user.is_none()));
        assert!(!signed_out.get());

        backend.expire_session();
        assert!(signed_out.get());
        assert_eq!(backend.id_token(), None);
        assert_eq!(backend.current_user(), None);
        backend.unsubscribe(sub);
    }

    #[test]
    fn fetch_without_session_is_not_signed_in() {
        let err = block_on(backend().fetch_user_record("u1")).unwrap_err();
        assert!(matches!(err, FetchError::NotSignedIn));
    }
}
