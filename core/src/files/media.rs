use std::path::Path;

/// Fallback for unknown extensions. Reference images with an unexpected
/// extension are still sent; the collaborator decides whether it can read them.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Media type derived purely from the file extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions_any_case() {
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("dir/b.Jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("c.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("d.gif")), "image/gif");
    }

    #[test]
    fn test_unknown_or_missing_extension_defaults_to_jpeg() {
        assert_eq!(content_type_for(Path::new("scan.tiff")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("noext")), DEFAULT_CONTENT_TYPE);
    }
}
