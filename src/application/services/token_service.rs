//! Token Service
//!
//! Issues and verifies JWT access tokens and opaque refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::auth_service::AuthError;
use crate::config::JwtSettings;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID for token revocation tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Parse the subject as a user id.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// Access and refresh token pair handed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

/// HS256 token issuer / verifier.
#[derive(Clone)]
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::days(self.settings.refresh_token_expiry_days)
    }

    /// Sign an access token for `user_id`. Returns the token and its lifetime
    /// in seconds.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<(String, i64), AuthError> {
        let now = Utc::now();
        let lifetime = Duration::minutes(self.settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok((token, lifetime.num_seconds()))
    }

    /// Issue a fresh access token plus a new opaque refresh token.
    pub fn issue_pair(&self, user_id: Uuid) -> Result<AuthTokens, AuthError> {
        let (access_token, expires_in) = self.issue_access_token(user_id)?;
        Ok(AuthTokens {
            access_token,
            refresh_token: generate_refresh_token(),
            expires_in,
            token_type: "Bearer".to_string(),
        })
    }

    /// Decode and fully validate an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_with(token, Validation::new(Algorithm::HS256))
    }

    /// Verify the signature but accept expired tokens.
    ///
    /// Used on refresh, where the access token being replaced is expected to
    /// have run out.
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        self.decode_with(token, validation)
    }

    fn decode_with(&self, token: &str, validation: Validation) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }
}

/// 256 random bits, hex encoded. Carries no user information.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Hash refresh token for storage
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
