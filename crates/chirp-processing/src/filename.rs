use chirp_core::constants::MAX_FILENAME_LENGTH;

use crate::validator::ValidationError;

/// Reduce a client-supplied filename to a single safe path segment.
///
/// Directory components (either separator style) are dropped, control characters are
/// removed and every other character outside `[A-Za-z0-9._-]` becomes `_`. Leading dots
/// are trimmed so the result can never be `..` or a hidden file. Over-long names are
/// truncated from the stem so the extension survives.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mapped: String = filename_only
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = mapped.trim_start_matches('.');

    if trimmed.chars().all(|c| c == '_' || c == '.') {
        return Err(ValidationError::InvalidFilename(format!(
            "'{}' does not contain a usable file name",
            filename.escape_default()
        )));
    }

    Ok(truncate_preserving_extension(trimmed, MAX_FILENAME_LENGTH))
}

fn truncate_preserving_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    // Sanitized names are pure ASCII, so byte offsets are char boundaries.
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() < max / 2 => {
            let keep = max - ext.len() - 1;
            format!("{}.{}", &stem[..keep.min(stem.len())], ext)
        }
        _ => name[..max].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_accepts_valid_names() {
        assert_eq!(sanitize_filename("image.png").unwrap(), "image.png");
        assert_eq!(sanitize_filename("my-file_1.jpg").unwrap(), "my-file_1.jpg");
    }

    #[test]
    fn sanitize_filename_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("cat photo.jpg").unwrap(), "cat_photo.jpg");
        assert_eq!(sanitize_filename("a;b|c?.gif").unwrap(), "a_b_c_.gif");
        assert_eq!(sanitize_filename("caf\u{e9}.png").unwrap(), "caf_.png");
    }

    #[test]
    fn sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("/etc/passwd.png").unwrap(), "passwd.png");
        assert_eq!(
            sanitize_filename("..\\..\\windows\\evil.webp").unwrap(),
            "evil.webp"
        );
        assert_eq!(sanitize_filename("../../.bashrc.png").unwrap(), "bashrc.png");
    }

    #[test]
    fn sanitize_filename_drops_control_characters() {
        assert_eq!(sanitize_filename("ab\u{0}c\n.png").unwrap(), "abc.png");
    }

    #[test]
    fn sanitize_filename_rejects_empty_results() {
        for input in ["", "..", "....", "/", "dir/", "\u{0}\u{1}", "   ", "._."] {
            assert!(
                matches!(
                    sanitize_filename(input),
                    Err(ValidationError::InvalidFilename(_))
                ),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn sanitize_filename_never_contains_separators() {
        let inputs = [
            "a/b\\c.png",
            "..//..//x.jpg",
            "C:\\Users\\me\\pic.gif",
            "name\\/mixed/\\.png",
            "%2e%2e%2fetc.png",
        ];
        for input in inputs {
            if let Ok(name) = sanitize_filename(input) {
                assert!(!name.contains('/') && !name.contains('\\'), "{}", name);
                assert!(!name.starts_with('.'), "{}", name);
            }
        }
    }

    #[test]
    fn sanitize_filename_truncates_but_keeps_extension() {
        let long = format!("{}.jpeg", "x".repeat(400));
        let name = sanitize_filename(&long).unwrap();
        assert_eq!(name.len(), MAX_FILENAME_LENGTH);
        assert!(name.ends_with(".jpeg"));
    }
}
