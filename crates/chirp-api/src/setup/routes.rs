//! Route configuration and setup.

use crate::api_doc;
use crate::auth::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chirp_core::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use chirp_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState::new(config.jwt_secret()));

    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    let app = public_routes()
        .merge(protected_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(RequestBodyLimitLayer::new(request_body_limit(config)))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Largest accepted request body: the upload limit plus room for multipart framing.
///
/// The pipeline's own size check stays authoritative for the image itself.
pub fn request_body_limit(config: &Config) -> usize {
    usize::try_from(config.max_upload_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(openapi_json))
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/images", API_PREFIX),
        post(handlers::image_upload::upload_image).delete(handlers::image_delete::delete_image),
    )
}

async fn openapi_json() -> impl IntoResponse {
    Json(api_doc::get_openapi_spec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(extra: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = [
            ("JWT_SECRET", "test-secret-that-is-at-least-32-bytes-long"),
            ("DATABASE_URL", "postgresql://localhost/chirp"),
            ("S3_BUCKET", "chirp-images"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        Config::from_vars(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_request_body_limit_adds_multipart_overhead() {
        let config = config(&[("MAX_UPLOAD_SIZE_BYTES", "1048576")]);
        assert_eq!(request_body_limit(&config), 1_048_576 + 64 * 1024);
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        assert!(setup_cors(&config(&[("CORS_ORIGINS", "https://chirp.example")])).is_ok());
        assert!(setup_cors(&config(&[("CORS_ORIGINS", "bad\norigin")])).is_err());
    }
}
