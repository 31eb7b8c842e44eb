//! Provider credentials and Basic authentication

use crate::config::ProviderSettings;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

/// Username/password pair for the search-data provider
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credentials from configuration, if both halves are present and non-empty
    pub fn from_settings(settings: &ProviderSettings) -> Option<Self> {
        match (settings.username.as_deref(), settings.password.as_deref()) {
            (Some(user), Some(pass)) => Some(Self::new(user, pass)).filter(Self::is_complete),
            _ => None,
        }
    }

    /// Both username and password are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Value for the `Authorization` header
    pub fn basic_auth(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
