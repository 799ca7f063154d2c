pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims, CurrentUser};

use chrono::{Duration, Utc};
use db::models::user::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use util::config;

/// Generates a JWT and its expiry timestamp for a given user.
pub fn generate_jwt(user_id: i64, role: Role) -> (String, String) {
    let expiry = Utc::now() + Duration::minutes(config::jwt_duration_minutes() as i64);
    let claims = Claims {
        sub: user_id,
        role,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: i64,
    exp: usize,
    purpose: String,
}

/// Issues a short-lived password-reset token for the given user.
pub fn generate_reset_token(user_id: i64) -> String {
    let expiry = Utc::now() + Duration::minutes(config::reset_token_expiry_minutes() as i64);
    let claims = ResetClaims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
        purpose: "password-reset".into(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed")
}

/// Validates a password-reset token, returning the user id it was issued for.
pub fn verify_reset_token(token: &str) -> Option<i64> {
    let data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .ok()?;

    (data.claims.purpose == "password-reset").then_some(data.claims.sub)
}
