use crate::auth::models::{JwtClaims, UserContext};
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chirp_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;

/// Verifies HS256 bearer tokens signed with the configured secret.
#[derive(Clone)]
pub struct AuthState {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthState {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthenticated(format!("Invalid token: {}", e)))
    }
}

fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthenticated("Invalid authorization header format".to_string())
        })
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match bearer_token(&request).and_then(|token| auth_state.verify(token)) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Authentication failed");
            return HttpAppError(e).into_response();
        }
    };

    request.extensions_mut().insert(UserContext {
        user_id: claims.sub,
    });

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn token(secret: &str, sub: i32, exp_offset: i64) -> String {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = JwtClaims {
            sub,
            exp: now + exp_offset,
            iat: Some(now),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let state = AuthState::new(SECRET);
        let claims = state.verify(&token(SECRET, 7, 3600)).unwrap();
        assert_eq!(claims.sub, 7);
    }

    #[test]
    fn test_verify_rejects_wrong_secret_and_expired() {
        let state = AuthState::new(SECRET);
        assert!(matches!(
            state.verify(&token("another-secret-that-is-also-32-bytes!", 7, 3600)),
            Err(AppError::Unauthenticated(_))
        ));
        assert!(matches!(
            state.verify(&token(SECRET, 7, -3600)),
            Err(AppError::Unauthenticated(_))
        ));
        assert!(state.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def.ghi")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request).unwrap(), "abc.def.ghi");

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(matches!(
            bearer_token(&request),
            Err(AppError::Unauthenticated(_))
        ));

        let request = Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(bearer_token(&request).is_err());
    }
}
