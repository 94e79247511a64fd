use bytes::Bytes;
use chirp_core::{AppError, Association, AssociationKind};

/// An upload as received from the client, before any check has run.
///
/// Form fields are kept as the raw strings the client sent so that parsing them is part
/// of the pipeline rather than of the HTTP extractor.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub data: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    /// The `type` form field
    pub kind: Option<String>,
    pub tweet_id: Option<String>,
    pub comment_id: Option<String>,
    pub user_id: Option<String>,
}

fn parse_id(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.trim().parse::<i32>().ok())
}

/// Turn the declared association into an [`Association`] the principal may attach to.
///
/// A supplied `user_id` must be numeric and equal to `principal` for every kind; for
/// `user` uploads it is also the required identifier.
pub fn resolve_association(principal: i32, request: &UploadRequest) -> Result<Association, AppError> {
    let kind: AssociationKind = request
        .kind
        .as_deref()
        .and_then(|k| k.parse().ok())
        .ok_or_else(|| AppError::MissingAssociationField("invalid form type".to_string()))?;

    let claimed_user = match request.user_id.as_deref() {
        Some(raw) => {
            let user_id = parse_id(Some(raw))
                .ok_or_else(|| AppError::MissingAssociationField("invalid user id".to_string()))?;
            if user_id != principal {
                return Err(AppError::Unauthorized("unauthorized user id".to_string()));
            }
            Some(user_id)
        }
        None => None,
    };

    match kind {
        AssociationKind::Tweet => parse_id(request.tweet_id.as_deref())
            .map(|tweet_id| Association::Tweet { tweet_id })
            .ok_or_else(|| AppError::MissingAssociationField("tweet id required".to_string())),
        AssociationKind::Comment => parse_id(request.comment_id.as_deref())
            .map(|comment_id| Association::Comment { comment_id })
            .ok_or_else(|| AppError::MissingAssociationField("comment id required".to_string())),
        AssociationKind::User => claimed_user
            .map(|user_id| Association::User { user_id })
            .ok_or_else(|| AppError::MissingAssociationField("invalid user id".to_string())),
    }
}
