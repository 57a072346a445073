use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use tracing::warn;

/// Pairs from every `Cookie` header on the request, in order.
pub fn parse_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().trim_matches('"').to_string()))
        })
        .collect()
}

/// `Set-Cookie` value that stores `value` under `name` for the whole site.
pub fn set_cookie(name: &str, value: &str, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes `name`.
pub fn remove_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => warn!("Dropping cookie that is not a valid header value: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_pairs_and_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("token=abc; theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("isOnboardingDone=\"true\""));
        let cookies = parse_cookies(&headers);
        assert_eq!(
            cookies,
            vec![
                ("token".to_string(), "abc".to_string()),
                ("theme".to_string(), "dark".to_string()),
                ("isOnboardingDone".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn removal_expires_immediately() {
        assert!(remove_cookie("token", false).contains("Max-Age=0"));
        assert!(set_cookie("token", "abc", true).ends_with("; Secure"));
    }
}
