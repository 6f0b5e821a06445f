//! Filename and extension resolution for saved images.
//!
//! Resolution order: caller-supplied name (or timestamp fallback), extension
//! from the URL path, provisional `.jpg` default, and finally an override
//! derived from the response content-type when the URL offered no hint.

use chrono::Local;
use url::Url;

use super::constants::FALLBACK_EXTENSION;

/// Generates a timestamp filename stem: 14 digits, `YYYYMMDDHHMMSS`.
///
/// Unique at second granularity for sequential calls.
#[must_use]
pub(crate) fn timestamp_filename() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Extracts an extension candidate (with leading dot) from the URL path.
///
/// Looks at the text after the last `.` in the last path segment. Rejects
/// empty or implausibly long candidates.
pub(crate) fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let dot_index = last_segment.rfind('.')?;
    let ext = &last_segment[dot_index..];
    if ext.len() <= 1 || ext.len() > 12 {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Maps an `image/*` content-type to a file extension (with leading dot).
///
/// Parameters after `;` are ignored. Non-image and unrecognized types map
/// to `None`; the caller keeps whatever extension it already has.
pub(crate) fn extension_from_image_mime(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match mime.as_str() {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/svg+xml" => Some(".svg"),
        "image/bmp" => Some(".bmp"),
        "image/tiff" => Some(".tiff"),
        "image/avif" => Some(".avif"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some(".ico"),
        _ => None,
    }
}

/// Whether the content-type passes the accept filter: `image/*` or the
/// generic `application/octet-stream`. An absent header (empty string) fails.
pub(crate) fn is_image_like(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type.starts_with("application/octet-stream")
}

/// Whether the filename already carries a non-empty extension.
pub(crate) fn has_extension(name: &str) -> bool {
    match name.rfind('.') {
        Some(pos) => pos > 0 && pos + 1 < name.len(),
        None => false,
    }
}

/// Replaces the filename's extension (everything after the last `.`).
pub(crate) fn replace_extension(name: &str, new_ext: &str) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 => format!("{}{new_ext}", &name[..pos]),
        _ => format!("{name}{new_ext}"),
    }
}

/// Resolves the filename to use before the response headers are known.
///
/// Empty caller filenames become a timestamp stem; names without an
/// extension get the URL-derived one, else the provisional `.jpg`.
pub(crate) fn resolve_provisional_filename(filename: &str, url_extension: Option<&str>) -> String {
    let name = if filename.is_empty() {
        timestamp_filename()
    } else {
        sanitize_filename(filename)
    };

    if has_extension(&name) {
        return name;
    }
    format!("{name}{}", url_extension.unwrap_or(FALLBACK_EXTENSION))
}

/// Sanitizes a caller-supplied filename for filesystem safety.
///
/// Replaces path separators and other characters that are invalid on common
/// filesystems, so a hostile filename cannot escape the save directory.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Dot-only names would resolve to the directory itself or its parent.
    if sanitized.chars().all(|c| c == '.' || c == '_') {
        return sanitized.replace('.', "_");
    }

    sanitized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- timestamp_filename ---

    #[test]
    fn test_timestamp_filename_is_fourteen_digits() {
        let name = timestamp_filename();
        assert_eq!(name.len(), 14, "expected 14 chars, got: {name}");
        assert!(
            name.chars().all(|c| c.is_ascii_digit()),
            "expected all digits, got: {name}"
        );
    }

    // --- extension_from_url ---

    #[test]
    fn test_extension_from_url_png() {
        assert_eq!(
            extension_from_url("https://example.com/photo.png"),
            Some(".png".to_string())
        );
    }

    #[test]
    fn test_extension_from_url_no_extension() {
        assert_eq!(extension_from_url("https://example.com/photo"), None);
    }

    #[test]
    fn test_extension_from_url_uses_last_segment() {
        assert_eq!(
            extension_from_url("https://example.com/a.b/photo.jpeg"),
            Some(".jpeg".to_string())
        );
    }

    #[test]
    fn test_extension_from_url_ignores_query_string() {
        assert_eq!(
            extension_from_url("https://example.com/photo.gif?size=large"),
            Some(".gif".to_string())
        );
    }

    #[test]
    fn test_extension_from_url_lowercases() {
        assert_eq!(
            extension_from_url("https://example.com/photo.PNG"),
            Some(".png".to_string())
        );
    }

    #[test]
    fn test_extension_from_url_dot_only_rejected() {
        assert_eq!(extension_from_url("https://example.com/photo."), None);
    }

    #[test]
    fn test_extension_from_url_too_long_rejected() {
        assert_eq!(
            extension_from_url("https://example.com/file.averylongextension"),
            None
        );
    }

    // --- extension_from_image_mime ---

    #[test]
    fn test_extension_from_image_mime_png() {
        assert_eq!(extension_from_image_mime("image/png"), Some(".png"));
    }

    #[test]
    fn test_extension_from_image_mime_jpeg_maps_to_jpg() {
        assert_eq!(extension_from_image_mime("image/jpeg"), Some(".jpg"));
    }

    #[test]
    fn test_extension_from_image_mime_strips_parameters() {
        assert_eq!(
            extension_from_image_mime("image/png; charset=binary"),
            Some(".png")
        );
    }

    #[test]
    fn test_extension_from_image_mime_case_insensitive() {
        assert_eq!(extension_from_image_mime("Image/PNG"), Some(".png"));
    }

    #[test]
    fn test_extension_from_image_mime_non_image_is_none() {
        assert_eq!(extension_from_image_mime("application/octet-stream"), None);
        assert_eq!(extension_from_image_mime("text/html"), None);
        assert_eq!(extension_from_image_mime(""), None);
    }

    // --- is_image_like ---

    #[test]
    fn test_is_image_like_accepts_image_types() {
        assert!(is_image_like("image/png"));
        assert!(is_image_like("image/jpeg; charset=binary"));
    }

    #[test]
    fn test_is_image_like_accepts_octet_stream() {
        assert!(is_image_like("application/octet-stream"));
    }

    #[test]
    fn test_is_image_like_rejects_html_and_absent() {
        assert!(!is_image_like("text/html"));
        assert!(!is_image_like(""));
    }

    // --- has_extension / replace_extension ---

    #[test]
    fn test_has_extension_detects_suffix() {
        assert!(has_extension("photo.png"));
        assert!(!has_extension("photo"));
        assert!(!has_extension("photo."));
        assert!(!has_extension(".hidden"));
    }

    #[test]
    fn test_replace_extension_swaps_suffix() {
        assert_eq!(replace_extension("photo.jpg", ".png"), "photo.png");
    }

    #[test]
    fn test_replace_extension_appends_when_missing() {
        assert_eq!(replace_extension("photo", ".png"), "photo.png");
    }

    // --- resolve_provisional_filename ---

    #[test]
    fn test_resolve_provisional_keeps_existing_extension() {
        assert_eq!(
            resolve_provisional_filename("cat.webp", Some(".png")),
            "cat.webp"
        );
    }

    #[test]
    fn test_resolve_provisional_appends_url_extension() {
        assert_eq!(resolve_provisional_filename("cat", Some(".png")), "cat.png");
    }

    #[test]
    fn test_resolve_provisional_defaults_to_jpg() {
        assert_eq!(resolve_provisional_filename("cat", None), "cat.jpg");
    }

    #[test]
    fn test_resolve_provisional_empty_name_is_timestamp_jpg() {
        let name = resolve_provisional_filename("", None);
        assert_eq!(name.len(), 18, "expected 14 digits + .jpg, got: {name}");
        assert!(name.ends_with(".jpg"));
        assert!(name[..14].chars().all(|c| c.is_ascii_digit()));
    }

    // --- sanitize_filename ---

    #[test]
    fn test_sanitize_filename_removes_separators() {
        assert_eq!(sanitize_filename("a/b.png"), "a_b.png");
        assert_eq!(sanitize_filename("a\\b.png"), "a_b.png");
    }

    #[test]
    fn test_sanitize_filename_rewrites_dot_segments() {
        assert_eq!(sanitize_filename(".."), "__");
        assert_eq!(sanitize_filename("."), "_");
    }

    #[test]
    fn test_sanitize_filename_preserves_valid_names() {
        assert_eq!(sanitize_filename("my-photo_1.png"), "my-photo_1.png");
    }
}
