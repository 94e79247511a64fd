//! Allow-list checks on client-declared metadata.
//!
//! These only look at what the client claims (extension and MIME type). The real
//! format is established later by [`crate::sniff`].

use crate::validator::ValidationError;

/// Return the lower-cased extension of `filename` if it is allow-listed.
pub fn check_extension(filename: &str, allowed: &[String]) -> Result<String, ValidationError> {
    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(ValidationError::UnsupportedExtension {
                extension: String::new(),
                allowed: allowed.to_vec(),
            })
        }
    };

    if !allowed.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
        return Err(ValidationError::UnsupportedExtension {
            extension,
            allowed: allowed.to_vec(),
        });
    }

    Ok(extension)
}

/// Strip parameters from a MIME type and lower-case it
/// (`"Image/PNG; charset=binary"` becomes `"image/png"`).
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Check the declared MIME type against the allow-list, returning its normalized form.
pub fn check_content_type(
    content_type: Option<&str>,
    allowed: &[String],
) -> Result<String, ValidationError> {
    let declared = content_type.unwrap_or("");
    let normalized = normalize_content_type(declared);

    if normalized.is_empty() || !allowed.iter().any(|a| a.eq_ignore_ascii_case(&normalized)) {
        return Err(ValidationError::UnsupportedMimeType {
            content_type: declared.to_string(),
            allowed: allowed.to_vec(),
        });
    }

    Ok(normalized)
}
