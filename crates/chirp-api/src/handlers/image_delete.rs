use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use chirp_core::models::ImageDeleteResponse;
use chirp_core::AppError;
use serde::Deserialize;
use std::sync::Arc;

/// `key` and `id` fields, sent either url-encoded or as multipart form data.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteImageForm {
    pub key: Option<String>,
    pub id: Option<String>,
}

impl DeleteImageForm {
    fn into_parts(self) -> Result<(i32, String), AppError> {
        let key = self
            .key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::InvalidInput("key required".to_string()))?;
        let id = self
            .id
            .ok_or_else(|| AppError::InvalidInput("id required".to_string()))?
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::InvalidInput("invalid image id".to_string()))?;
        Ok((id, key))
    }
}

impl<S> FromRequest<S> for DeleteImageForm
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<DeleteImageForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(format!("Invalid form: {}", e.body_text())))?;
            return Ok(form);
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidInput(format!("Invalid multipart: {}", e.body_text())))?;

        let mut form = DeleteImageForm::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
        })? {
            let name = field.name().unwrap_or("").to_string();
            if name != "key" && name != "id" {
                continue;
            }
            let value = field.text().await.map_err(|e| {
                AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
            })?;
            if name == "key" {
                form.key = Some(value);
            } else {
                form.id = Some(value);
            }
        }
        Ok(form)
    }
}

#[utoipa::path(
    delete,
    path = "/api/images",
    tag = "images",
    request_body(
        content = inline(Object),
        content_type = "application/x-www-form-urlencoded",
        description = "Fields: `key` (storage key), `id` (image id). Multipart form data is accepted too."
    ),
    responses(
        (status = 200, description = "Image deleted", body = ImageDeleteResponse),
        (status = 400, description = "Missing or malformed key/id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Image belongs to another user", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 502, description = "Object storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, form), fields(user_id = user.user_id, operation = "delete_image"))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    form: DeleteImageForm,
) -> Result<impl IntoResponse, HttpAppError> {
    let (id, key) = form.into_parts()?;

    state.upload.delete(user.user_id, id, &key).await?;

    Ok((
        StatusCode::OK,
        Json(ImageDeleteResponse {
            message: "item successfully deleted".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parts() {
        let form = DeleteImageForm {
            key: Some(" abc.png ".to_string()),
            id: Some("12".to_string()),
        };
        assert_eq!(form.into_parts().unwrap(), (12, "abc.png".to_string()));
    }

    #[test]
    fn test_form_parts_rejects_missing_or_bad_fields() {
        let missing_key = DeleteImageForm {
            key: None,
            id: Some("1".to_string()),
        };
        assert!(matches!(missing_key.into_parts(), Err(AppError::InvalidInput(_))));

        let bad_id = DeleteImageForm {
            key: Some("abc.png".to_string()),
            id: Some("one".to_string()),
        };
        assert!(matches!(bad_id.into_parts(), Err(AppError::InvalidInput(ref m)) if m == "invalid image id"));
    }
}
