//! JWT authentication middleware and extractors.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::web::error::ApiError;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Login username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// User role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

impl JwtClaims {
    /// Check whether the claims carry the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Shared state for JWT verification.
#[derive(Clone)]
pub struct JwtState {
    /// Decoding key for JWT verification.
    pub decoding_key: DecodingKey,
    /// Validation settings.
    pub validation: Validation,
}

impl JwtState {
    /// Create a new JWT state from a secret key.
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Decode and validate a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

/// Extractor for authenticated users.
///
/// The handler receives the JWT claims if the token is valid. The token is
/// taken from the `Authorization: Bearer` header, with a `token` query
/// parameter fallback for WebSocket upgrades (browsers cannot set headers on
/// WebSocket requests).
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Try the Authorization header first
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.to_string());

        // Fall back to the token query parameter
        let token = match token {
            Some(t) => t,
            None => {
                let query = parts.uri.query().unwrap_or("");
                query
                    .split('&')
                    .find_map(|pair| {
                        let mut kv = pair.splitn(2, '=');
                        let key = kv.next()?;
                        let value = kv.next()?;
                        if key == "token" {
                            urlencoding::decode(value).ok().map(|s| s.into_owned())
                        } else {
                            None
                        }
                    })
                    .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?
            }
        };

        // JWT state is injected into request extensions by the middleware
        let jwt_state = parts
            .extensions
            .get::<Arc<JwtState>>()
            .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

        let claims = jwt_state.decode(&token).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser(claims))
    }
}

/// Extractor for authenticated admin users.
///
/// Rejects with 403 when the token is valid but the role is not admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub JwtClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(claims))
    }
}

/// Middleware function to inject JWT state into request extensions.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_claims() -> JwtClaims {
        JwtClaims {
            sub: 1,
            username: "testuser".to_string(),
            name: "Test User".to_string(),
            role: "user".to_string(),
            iat: chrono::Utc::now().timestamp() as u64,
            exp: (chrono::Utc::now().timestamp() + 3600) as u64,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    fn create_test_token(secret: &str, claims: &JwtClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_jwt_state_new() {
        let state = JwtState::new("test-secret");
        assert!(state.validation.validate_exp);
    }

    #[test]
    fn test_create_and_verify_token() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let token = create_test_token(secret, &test_claims());

        let decoded = state.decode(&token).unwrap();
        assert_eq!(decoded.sub, 1);
        assert_eq!(decoded.username, "testuser");
        assert_eq!(decoded.name, "Test User");
        assert_eq!(decoded.role, "user");
    }

    #[test]
    fn test_expired_token() {
        let secret = "test-secret";
        let state = JwtState::new(secret);

        let mut claims = test_claims();
        claims.iat = (chrono::Utc::now().timestamp() - 7200) as u64;
        claims.exp = (chrono::Utc::now().timestamp() - 3600) as u64;

        let token = create_test_token(secret, &claims);
        assert!(state.decode(&token).is_err());
    }

    #[test]
    fn test_invalid_secret() {
        let token = create_test_token("secret1", &test_claims());
        let state = JwtState::new("secret2");
        assert!(state.decode(&token).is_err());
    }

    #[test]
    fn test_is_admin() {
        let mut claims = test_claims();
        assert!(!claims.is_admin());
        claims.role = "admin".to_string();
        assert!(claims.is_admin());
    }
}
