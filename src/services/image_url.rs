use url::Url;

/// Turns whatever the backend stored for an image into a URL the browser can load.
///
/// Absolute `http(s)://`, protocol-relative and `data:` URLs pass through.
/// Relative paths (`uploads/x.jpg`, `/uploads/x.jpg`, `\uploads\x.jpg` from
/// Windows-hosted uploads) are resolved against the backend host. Blank input
/// yields `None` so the renderer can show its placeholder.
pub fn normalize_image_url(host: &Url, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:") {
        return Some(trimmed.to_string());
    }
    if trimmed.starts_with("//") {
        return Some(format!("{}:{}", host.scheme(), trimmed));
    }

    let relative = trimmed.replace('\\', "/");
    let relative = relative.trim_start_matches("./").trim_start_matches('/');
    host.join(relative).ok().map(|url| url.to_string())
}

/// Applies [`normalize_image_url`] to an optional field in place.
pub fn normalize_in_place(host: &Url, field: &mut Option<String>) {
    *field = field
        .as_deref()
        .and_then(|raw| normalize_image_url(host, raw));
}

/// Applies [`normalize_image_url`] to a gallery, dropping blank entries.
pub fn normalize_all(host: &Url, images: &mut Vec<String>) {
    *images = images
        .iter()
        .filter_map(|raw| normalize_image_url(host, raw))
        .collect();
}
