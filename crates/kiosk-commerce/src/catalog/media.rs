//! Image URL resolution against the catalog origin.

/// Resolve an upstream image reference to an absolute URL.
///
/// The upstream stores images in several shapes; this maps all of them
/// onto the catalog origin:
///
/// - already absolute (`http://`/`https://`) kept as-is
/// - protocol-relative `//host/...` gets `https:`
/// - rooted `/path` joined to the origin
/// - `uploads/...` joined to the origin
/// - a bare file name is assumed to live under `/uploads/`
///
/// An empty or whitespace-only reference resolves to the empty string.
pub fn resolve_image_url(origin: &str, value: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        return String::new();
    }

    let lower = v.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return v.to_string();
    }
    if v.starts_with("//") {
        return format!("https:{v}");
    }

    let origin = origin.trim_end_matches('/');
    if v.starts_with('/') {
        return format!("{origin}{v}");
    }
    if v.starts_with("uploads/") {
        return format!("{origin}/{v}");
    }
    format!("{origin}/uploads/{v}")
}
