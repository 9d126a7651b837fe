use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use chrono::Duration;

use crate::session::ports::SessionCarrier;

/// Cookie attributes shared by every session cookie the service writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }
}

/// Session carrier backed by an HTTP cookie.
///
/// Reads the session cookie from the request, falling back to an
/// `Authorization: Bearer` header. Writes go out as a `Set-Cookie` header.
#[derive(Debug, Clone)]
pub struct CookieCarrier {
    settings: CookieSettings,
    token: Option<String>,
    outgoing: Option<String>,
}

impl CookieCarrier {
    /// Carrier with no presented token, for responses only.
    pub fn new(settings: &CookieSettings) -> Self {
        Self {
            settings: settings.clone(),
            token: None,
            outgoing: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap, settings: &CookieSettings) -> Self {
        let token = cookie_value(headers, &settings.name).or_else(|| bearer_token(headers));

        Self {
            settings: settings.clone(),
            token,
            outgoing: None,
        }
    }

    /// Headers to attach to the response, empty if nothing was set or cleared.
    pub fn into_headers(self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(cookie) = self.outgoing {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    headers.insert(header::SET_COOKIE, value);
                }
                Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header value"),
            }
        }

        headers
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.settings.name, value, max_age
        );
        if self.settings.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl SessionCarrier for CookieCarrier {
    fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set(&mut self, token: &str, max_age: Duration) {
        self.outgoing = Some(self.cookie(token, max_age.num_seconds().max(0)));
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.outgoing = Some(self.cookie("", 0));
        self.token = None;
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
