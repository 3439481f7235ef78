//! Signed-in identity handed over by the external identity provider

/// Environment variable carrying the session JWT
pub const JWT_ENV: &str = "APPCO_JWT";
/// Environment variable carrying the Blockstack username
pub const USERNAME_ENV: &str = "APPCO_USERNAME";

/// Read-only session credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub jwt_token: String,
}

impl Session {
    pub fn new(username: &str, jwt_token: &str) -> Self {
        Self {
            username: username.to_string(),
            jwt_token: jwt_token.to_string(),
        }
    }

    /// Whether the session can authorize API calls
    pub fn has_token(&self) -> bool {
        !self.jwt_token.is_empty()
    }

    /// Token to send as a bearer credential, if any
    pub fn bearer_token(&self) -> Option<&str> {
        self.has_token().then_some(self.jwt_token.as_str())
    }

    /// Load the session the identity provider left in the environment
    pub fn from_env() -> Option<Self> {
        Self::from_vars(std::env::var(JWT_ENV).ok(), std::env::var(USERNAME_ENV).ok())
    }

    fn from_vars(jwt: Option<String>, username: Option<String>) -> Option<Self> {
        let jwt_token = jwt.filter(|t| !t.trim().is_empty())?;
        Some(Self {
            username: username.unwrap_or_default(),
            jwt_token,
        })
    }
}
