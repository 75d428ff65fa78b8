use crate::models::user::Claims;
use crate::store::credentials::{CredentialError, CredentialStore};
use crate::utils::auth::verify_password;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad login, or a missing/invalid/expired token. Deliberately carries no
    /// detail about which check failed.
    #[error("unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("token generation failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Login and bearer tokens.
///
/// Tokens are HS256 JWTs carrying only `sub` (the username) and `exp`. Nothing is
/// kept server side, so a token stays valid until it expires.
pub struct AuthService {
    credentials: CredentialStore,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(credentials: CredentialStore, secret: &str, token_ttl: chrono::Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expired means expired. The library default allows 60s of slack.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Checks the username/password against the credentials file and returns a
    /// fresh token.
    ///
    /// Reads the file and runs the password hash, both blocking. Call it from
    /// `spawn_blocking` inside async code.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(hashed) = self.credentials.get(username)? else {
            tracing::debug!(username, "Login for unknown user");
            return Err(AuthError::Unauthorized);
        };

        if !verify_password(password, &hashed) {
            tracing::debug!(username, "Login with wrong password");
            return Err(AuthError::Unauthorized);
        }

        self.issue_token(username)
    }

    /// Issues a token for `username` valid for the configured TTL.
    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        self.issue_token_with_ttl(username, self.token_ttl)
    }

    pub fn issue_token_with_ttl(
        &self,
        username: &str,
        ttl: chrono::Duration,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            exp: (chrono::Utc::now() + ttl).timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Returns the username a token was issued to.
    ///
    /// Fails on a bad signature, another algorithm, an `exp` in the past, or a
    /// missing `sub`.
    pub fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AuthError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::auth::hash_password;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> AuthService {
        let credentials = CredentialStore::new(dir.path().join("credentials.txt"));
        AuthService::new(credentials, "test-secret", chrono::Duration::minutes(30))
    }

    fn with_user(dir: &TempDir, username: &str, password: &str) -> AuthService {
        let auth = service(dir);
        auth.credentials()
            .append(username, &hash_password(password).unwrap())
            .unwrap();
        auth
    }

    #[test]
    fn login_returns_a_token_that_verifies() {
        let dir = TempDir::new().unwrap();
        let auth = with_user(&dir, "user3", "password3");

        let token = auth.login("user3", "password3").unwrap();
        assert_eq!(auth.verify_token(&token).unwrap(), "user3");
    }

    #[test]
    fn wrong_password_or_unknown_user_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let auth = with_user(&dir, "user3", "password3");

        assert!(matches!(
            auth.login("user3", "wrong"),
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            auth.login("ghost", "password3"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn login_without_credentials_file_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let auth = service(&dir);

        assert!(matches!(
            auth.login("user3", "password3"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn broken_credentials_file_is_not_reported_as_bad_login() {
        let dir = TempDir::new().unwrap();
        let auth = service(&dir);
        std::fs::write(auth.credentials().path(), "garbage\n").unwrap();

        assert!(matches!(
            auth.login("user3", "password3"),
            Err(AuthError::Credentials(CredentialError::Malformed { .. }))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let dir = TempDir::new().unwrap();
        let auth = service(&dir);

        let token = auth
            .issue_token_with_ttl("user3", chrono::Duration::minutes(-1))
            .unwrap();
        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let dir = TempDir::new().unwrap();
        let other = AuthService::new(
            CredentialStore::new(dir.path().join("other.txt")),
            "another-secret",
            chrono::Duration::minutes(30),
        );
        let token = other.issue_token("user3").unwrap();

        assert!(matches!(
            service(&dir).verify_token(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn token_without_sub_is_rejected() {
        #[derive(serde::Serialize)]
        struct NoSub {
            exp: i64,
        }

        let dir = TempDir::new().unwrap();
        let auth = service(&dir);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoSub {
                exp: (chrono::Utc::now() + chrono::Duration::minutes(5)).timestamp(),
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(service(&dir).verify_token("not.a.jwt").is_err());
    }
}
