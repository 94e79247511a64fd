use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadRequest;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chirp_core::models::ImageUploadResponse;
use chirp_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/images",
    tag = "images",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Fields: `image` (file), `type` (tweet | comment | user), `tweet_id`, `comment_id`, `user_id`"
    ),
    responses(
        (status = 200, description = "Image uploaded successfully", body = ImageUploadResponse),
        (status = 400, description = "Invalid image or missing association field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "User id does not match the authenticated user", body = ErrorResponse),
        (status = 404, description = "Tweet, comment or user not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Object storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = user.user_id, operation = "upload_image")
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = read_upload_form(multipart, state.config.max_upload_size_bytes()).await?;

    let record = state.upload.upload(user.user_id, request).await?;

    Ok((StatusCode::OK, Json(ImageUploadResponse::from(record))))
}

fn multipart_error(err: MultipartError, max_size: u64) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // The request body limit tripped mid-stream, so the real size is unknown; it is
        // at least the limit.
        return AppError::FileTooLarge {
            size: max_size.saturating_add(1),
            max: max_size,
        };
    }
    AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
}

async fn read_upload_form(
    mut multipart: Multipart,
    max_size: u64,
) -> Result<UploadRequest, AppError> {
    let mut request = UploadRequest::default();
    let mut has_image = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                request.filename = field.file_name().map(String::from);
                request.content_type = field.content_type().map(String::from);
                request.data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_size))?;
                has_image = true;
            }
            "type" | "tweet_id" | "comment_id" | "user_id" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_size))?;
                let slot = match name.as_str() {
                    "type" => &mut request.kind,
                    "tweet_id" => &mut request.tweet_id,
                    "comment_id" => &mut request.comment_id,
                    _ => &mut request.user_id,
                };
                *slot = Some(value);
            }
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown multipart field");
            }
        }
    }

    if !has_image {
        return Err(AppError::InvalidInput("image required".to_string()));
    }

    Ok(request)
}
