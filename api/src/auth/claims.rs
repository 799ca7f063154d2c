use db::models::user::{self, Role};
use serde::{Deserialize, Serialize};

/// Payload carried by every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

/// Claims decoded from the bearer token, before the user row is resolved.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// The fully resolved requester, loaded from the database by the auth guards
/// and inserted into request extensions for handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);
