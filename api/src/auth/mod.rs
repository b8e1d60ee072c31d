pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use services::ActorType;
use util::config;

/// Generates a JWT and its expiry timestamp for a given user.
///
/// # Panics
/// Panics if the token cannot be encoded, which only happens with an unusable key.
pub fn generate_jwt(user_id: i64, user_type: ActorType) -> (String, String) {
    let expiry = Utc::now() + Duration::minutes(config::jwt_duration_minutes() as i64);

    let claims = Claims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
        user_type: Some(user_type.to_string()),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}
