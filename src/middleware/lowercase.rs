use axum::extract::Request;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

/// Prefixes served as-is, whatever their case.
const EXEMPT_PREFIXES: &[&str] = &["/_next", "/api", "/public"];

const STATIC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "avif", "css", "js", "map", "woff",
    "woff2", "ttf", "otf", "txt", "xml", "json", "webmanifest",
];

/// Redirects any path with an uppercase letter or a trailing slash to its
/// canonical form before routing, so the router and the gate see the same
/// path. The query string is kept unchanged.
pub async fn lowercase_redirect(request: Request, next: Next) -> Response {
    if let Some(target) = lowercase_target(request.uri()) {
        debug!("Redirecting '{}' to '{}'", request.uri().path(), target);
        return Redirect::temporary(&target).into_response();
    }
    next.run(request).await
}

/// The redirect target for `uri`, or `None` when it should pass through.
pub fn lowercase_target(uri: &Uri) -> Option<String> {
    let path = uri.path();
    if is_exempt(path) {
        return None;
    }
    let lower = path.to_lowercase();
    let trimmed = lower.trim_end_matches('/');
    let canonical = if trimmed.is_empty() { "/" } else { trimmed };
    if canonical == path {
        return None;
    }
    Some(match uri.query() {
        Some(query) => format!("{}?{}", canonical, query),
        None => canonical.to_string(),
    })
}

fn is_exempt(path: &str) -> bool {
    let under_prefix = EXEMPT_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)));
    under_prefix || has_static_extension(path)
}

fn has_static_extension(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => STATIC_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known)),
        _ => false,
    }
}
