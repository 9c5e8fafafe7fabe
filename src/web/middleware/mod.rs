//! Middleware for the Agora Web API.

mod auth;
mod cors;
mod rate_limit;

pub use auth::{jwt_auth, AdminUser, AuthUser, JwtClaims, JwtState};
pub use cors::create_cors_layer;
pub use rate_limit::{api_rate_limit, login_rate_limit, RateLimitState};
