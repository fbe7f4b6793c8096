//! Cookie helpers for the session and notice cookies.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::{Config, FLASH_COOKIE, FLASH_TTL_SECONDS, SESSION_COOKIE};

/// Attributes of one cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: &'static str,
    pub secure: bool,
    pub path: &'static str,
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, value);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite=Lax; Path={}", self.path));
        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path={}; Max-Age=0",
            self.name, self.path
        )
    }

    pub fn set_header(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value)).ok()
    }

    pub fn delete_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie()).ok()
    }
}

/// The two cookies this application sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub session: CookieConfig,
    pub flash: CookieConfig,
}

impl CookieSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            session: CookieConfig {
                name: SESSION_COOKIE,
                secure: config.cookie_secure,
                path: "/",
                max_age_secs: Some(config.session_expiration_hours * 3600),
            },
            flash: CookieConfig {
                name: FLASH_COOKIE,
                secure: config.cookie_secure,
                path: "/",
                max_age_secs: Some(FLASH_TTL_SECONDS),
            },
        }
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CookieConfig {
        CookieConfig {
            name: SESSION_COOKIE,
            secure: false,
            path: "/",
            max_age_secs: Some(3600),
        }
    }

    #[test]
    fn test_build_set_cookie() {
        let cookie = session().build_set_cookie("abc");
        assert!(cookie.starts_with("tf_session=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let secure = CookieConfig {
            secure: true,
            ..session()
        };
        assert!(secure.build_set_cookie("abc").contains("; Secure"));
    }

    #[test]
    fn test_delete_cookie_expires() {
        assert!(session().build_delete_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; tf_session=token123; tf_flash="),
        );

        assert_eq!(
            extract_cookie(&headers, "tf_session"),
            Some("token123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "tf_flash"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
