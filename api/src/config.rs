//! Backend configuration for the hosted identity service and document store.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "FINGERFIT_API_KEY";
pub const AUTH_DOMAIN_VAR: &str = "FINGERFIT_AUTH_DOMAIN";
pub const PROJECT_ID_VAR: &str = "FINGERFIT_PROJECT_ID";

const FIRESTORE_ROOT: &str = "https://firestore.googleapis.com/";

/// Public web-client configuration of the Firebase project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    pub project_id: String,
}

impl FirebaseConfig {
    /// Read the runtime environment first, then values baked in at compile
    /// time (the only option on wasm).
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            api_key: lookup(API_KEY_VAR, option_env!("FINGERFIT_API_KEY"))?,
            auth_domain: lookup(AUTH_DOMAIN_VAR, option_env!("FINGERFIT_AUTH_DOMAIN"))
                .unwrap_or_default(),
            project_id: lookup(PROJECT_ID_VAR, option_env!("FINGERFIT_PROJECT_ID"))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Empty { name: API_KEY_VAR });
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: PROJECT_ID_VAR,
            });
        }
        Ok(())
    }

    pub fn sign_in_url(&self) -> String {
        format!(
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key={}",
            self.api_key
        )
    }

    /// Secure Token endpoint that trades a refresh token for a new id token.
    pub fn token_refresh_url(&self) -> String {
        format!(
            "https://securetoken.googleapis.com/v1/token?key={}",
            self.api_key
        )
    }

    /// `users/{uid}` document; every path segment is percent-encoded.
    pub fn user_document_url(&self, uid: &str) -> Result<Url, ConfigError> {
        let mut url =
            Url::parse(FIRESTORE_ROOT).map_err(|err| ConfigError::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ConfigError::InvalidUrl(FIRESTORE_ROOT.to_string()))?
            .extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                "users",
                uid,
            ]);
        Ok(url)
    }
}

fn lookup(name: &'static str, baked: Option<&'static str>) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .or_else(|| baked.map(str::to_string))
        .ok_or(ConfigError::Missing(name))
}
