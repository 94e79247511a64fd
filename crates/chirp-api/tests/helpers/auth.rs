use chirp_api::auth::JwtClaims;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Secret the test app verifies bearer tokens with.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Mint a token for `user_id` signed with `secret`, expiring `ttl_seconds` from now.
pub fn create_token(secret: &str, user_id: i32, ttl_seconds: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        sub: user_id,
        exp: now + ttl_seconds,
        iat: Some(now),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: i32) -> String {
    format!("Bearer {}", create_token(TEST_JWT_SECRET, user_id, 3600))
}
