use url::form_urlencoded;

const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Resolve the CSRF token the way the web client does: an explicit meta value
/// wins, otherwise the `csrftoken` cookie (URL-decoded).
pub fn resolve_csrf_token(meta: Option<&str>, cookie_header: Option<&str>) -> Option<String> {
    if let Some(token) = meta.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    cookie_header?
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .flat_map(|pair| form_urlencoded::parse(pair.as_bytes()))
        .find(|(name, _)| name == CSRF_COOKIE_NAME)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
