//! Session Cookie Handling
//!
//! Builds the `Set-Cookie` values used for the operator session and parses
//! the incoming `Cookie` header.

use axum::http::{HeaderMap, header};
use std::time::Duration;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by the issuing and clearing cookie
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool, same_site: SameSite) -> Self {
        Self {
            name: name.into(),
            secure,
            same_site,
            path: "/".to_string(),
        }
    }

    /// `Set-Cookie` value carrying `token` for `max_age`
    pub fn issue(&self, token: &str, max_age: Duration) -> String {
        self.render(token, &[format!("Max-Age={}", max_age.as_secs())])
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    pub fn clear(&self) -> String {
        self.render(
            "",
            &[
                "Max-Age=0".to_string(),
                "Expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
            ],
        )
    }

    fn render(&self, value: &str, lifetime: &[String]) -> String {
        let mut parts = vec![
            format!("{}={}", self.name, value),
            "HttpOnly".to_string(),
            format!("Path={}", self.path),
        ];
        parts.extend_from_slice(lifetime);
        if self.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("SameSite={}", self.same_site.as_str()));
        parts.join("; ")
    }

    /// Read this cookie from request headers
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.name)
    }
}

/// Extract a cookie value from headers
///
/// All `Cookie` headers are searched; HTTP/2 clients may send several.
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
