//! Back-office authentication: argon2 password hashes, HS256 JWTs with a
//! revocation list, and the middleware guarding write routes.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::{AuthContext, TokenBlacklist};
pub use middleware::auth_middleware;
pub use models::{AuthUser, JwtClaims};
