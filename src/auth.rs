//! Bearer-token authentication and the admin authorization gate.
//!
//! Token issuance belongs to the external identity provider; this service
//! only verifies HS256 signatures with the shared secret from config. The
//! extractors are pure predicates: they resolve the caller or short-circuit
//! the handler with 401/403, and never mutate state.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api::response::ApiError;

/// Signing/verification keys derived from the shared token secret.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a signed token for the given claims. Used by tests and by
    /// whatever issues credentials out-of-band; there is no login route here.
    pub fn issue(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: String,
    /// Display name, denormalized onto records this user writes.
    pub name: String,
    /// Administrator flag.
    pub admin: bool,
    /// Expiration (unix seconds).
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: &str, name: &str, admin: bool, ttl_secs: i64) -> Self {
        Self {
            sub: user_id.to_string(),
            name: name.to_string(),
            admin,
            exp: Utc::now().timestamp() + ttl_secs,
        }
    }
}

/// Authenticated caller, resolved from the Authorization bearer header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub is_admin: bool,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, ApiError> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let keys = AuthKeys::from_ref(state);
        let claims = keys
            .verify(token)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            id: claims.sub,
            name: claims.name,
            is_admin: claims.admin,
        })
    }
}

/// Authenticated caller confirmed to hold the administrator flag.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AuthKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, ApiError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(ApiError::forbidden("Administrator access required"));
        }
        Ok(AdminUser(user))
    }
}
