use url::Url;

/// Resolve `href` against `base` into an absolute URL.
///
/// - empty href: empty string
/// - `http://` / `https://`: unchanged
/// - `//host/path`: `https:` prefixed
/// - `/path`: appended to the scheme and host of `base`
/// - anything else: joined against the full `base` path
///
/// Total: when `base` itself is not a valid URL the trimmed href is returned.
pub fn resolve_url(href: &str, base: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return href.to_string();
    }

    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }

    let Ok(base) = Url::parse(base.trim()) else {
        return href.to_string();
    };

    if href.starts_with('/') {
        if let Some(host) = base.host_str() {
            let mut origin = format!("{}://{}", base.scheme(), host);
            if let Some(port) = base.port() {
                origin.push_str(&format!(":{port}"));
            }
            return format!("{origin}{href}");
        }
    }

    match base.join(href) {
        Ok(joined) => joined.to_string(),
        Err(_) => href.to_string(),
    }
}
