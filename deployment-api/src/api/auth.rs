use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("invalid credential: {0}")]
pub struct InvalidCredential(String);

/// Attaches credentials to an outgoing request.
pub trait AuthWriter: fmt::Debug + Send + Sync {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// `Authorization: ApiKey <key>`
#[derive(Clone)]
pub struct ApiKey {
    header: HeaderValue,
}

impl ApiKey {
    pub fn new(key: &str) -> Result<Self, InvalidCredential> {
        if key.trim().is_empty() {
            return Err(InvalidCredential("api key cannot be empty".to_string()));
        }

        let mut header = HeaderValue::from_str(&format!("ApiKey {}", key))
            .map_err(|e| InvalidCredential(format!("api key: {}", e)))?;
        header.set_sensitive(true);

        Ok(Self { header })
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

impl AuthWriter for ApiKey {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header.clone())
    }
}

/// HTTP basic authentication.
#[derive(Clone)]
pub struct UserLogin {
    username: String,
    password: String,
}

impl UserLogin {
    pub fn new(username: &str, password: &str) -> Result<Self, InvalidCredential> {
        if username.is_empty() {
            return Err(InvalidCredential("username cannot be empty".to_string()));
        }
        if password.is_empty() {
            return Err(InvalidCredential("password cannot be empty".to_string()));
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLogin")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

impl AuthWriter for UserLogin {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_sets_authorization_header() {
        let auth = ApiKey::new("abc123").unwrap();
        let request = auth
            .authenticate(reqwest::Client::new().get("http://localhost/"))
            .build()
            .unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "ApiKey abc123");
    }

    #[test]
    fn api_key_rejects_blank_and_control_characters() {
        assert!(ApiKey::new("  ").is_err());
        assert!(ApiKey::new("bad\nkey").is_err());
    }

    #[test]
    fn user_login_uses_basic_auth() {
        let auth = UserLogin::new("admin", "s3cret").unwrap();
        let request = auth
            .authenticate(reqwest::Client::new().get("http://localhost/"))
            .build()
            .unwrap();

        let header = request.headers()[AUTHORIZATION].to_str().unwrap();
        assert!(header.starts_with("Basic "));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let key = ApiKey::new("abc123").unwrap();
        let login = UserLogin::new("admin", "s3cret").unwrap();

        assert!(!format!("{:?}", key).contains("abc123"));
        assert!(!format!("{:?}", login).contains("s3cret"));
    }
}
