//! Error types surfaced by the identity and record-store collaborators.

use thiserror::Error;

/// Sign-in / sign-out failures, keyed by the identity service's error codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("account disabled")]
    UserDisabled,

    #[error("no account for this email")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("invalid email or password")]
    InvalidCredential,

    #[error("too many failed attempts")]
    TooManyRequests,

    #[error("network request failed: {0}")]
    Network(String),

    #[error("identity service error: {0}")]
    Other(String),
}

impl AuthError {
    /// Stable code in the `auth/...` namespace used by the identity service SDKs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::UserDisabled => "auth/user-disabled",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::InvalidCredential => "auth/invalid-credential",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::Network(_) => "auth/network-request-failed",
            Self::Other(_) => "auth/internal-error",
        }
    }

    /// Map an Identity Toolkit REST error message (e.g. `"INVALID_PASSWORD"`,
    /// `"TOO_MANY_ATTEMPTS_TRY_LATER : ..."`) onto a typed error.
    pub fn from_rest_message(message: &str) -> Self {
        let code = message
            .split([' ', ':'])
            .next()
            .unwrap_or(message)
            .trim();

        match code {
            "INVALID_EMAIL" | "MISSING_EMAIL" => Self::InvalidEmail,
            "USER_DISABLED" => Self::UserDisabled,
            "EMAIL_NOT_FOUND" => Self::UserNotFound,
            "INVALID_PASSWORD" | "MISSING_PASSWORD" => Self::WrongPassword,
            "INVALID_LOGIN_CREDENTIALS" => Self::InvalidCredential,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyRequests,
            _ => Self::Other(message.to_string()),
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Other(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Failures while retrieving the per-user statistics document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no signed-in session")]
    NotSignedIn,

    #[error("session expired; sign in again")]
    SessionExpired,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("network request failed: {0}")]
    Network(String),

    #[error("document store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed document: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Missing or malformed backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration value `{0}`")]
    Missing(&'static str),

    #[error("configuration value `{name}` is empty")]
    Empty { name: &'static str },

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_messages_map_to_codes() {
        assert_eq!(
            AuthError::from_rest_message("INVALID_PASSWORD"),
            AuthError::WrongPassword
        );
        assert_eq!(
            AuthError::from_rest_message(
                "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"
            ),
            AuthError::TooManyRequests
        );
        assert_eq!(
            AuthError::from_rest_message("EMAIL_NOT_FOUND").code(),
            "auth/user-not-found"
        );
    }

    #[test]
    fn unknown_rest_message_keeps_text() {
        let err = AuthError::from_rest_message("OPERATION_NOT_ALLOWED");
        assert_eq!(err, AuthError::Other("OPERATION_NOT_ALLOWED".into()));
        assert_eq!(err.code(), "auth/internal-error");
    }
}
