//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use chirp_core::models;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chirp Image API",
        version = "0.1.0",
        description = "Image attachments for tweets, comments and profile pictures. Uploads are validated by filename, declared type, size and magic bytes before they are stored in S3."
    ),
    paths(
        handlers::image_upload::upload_image,
        handlers::image_delete::delete_image,
        handlers::health::health_check,
    ),
    components(schemas(
        models::ImageUploadResponse,
        models::ImageDeleteResponse,
        models::AssociationKind,
        handlers::health::HealthResponse,
        error::ErrorResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "images", description = "Image upload and deletion"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
