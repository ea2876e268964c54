//! Session cookie handling and the logged-in member extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::error::ApiError;
use crate::state::AppState;

/// The member behind a live session cookie. Handlers that take this argument
/// reject requests without a session with 401.
#[derive(Debug, Clone)]
pub struct CurrentMember {
    pub token: String,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentMember {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, state.cookie_name())
            .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()))?;

        let session = state
            .sessions
            .resolve(&token)
            .ok_or_else(|| ApiError::Unauthorized("Session expired".to_string()))?;

        Ok(CurrentMember {
            token: session.token,
            email: session.member_email,
        })
    }
}

/// Value of the `name` cookie, if the request carries one.
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(name: &str, token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, token, max_age_secs
    )
}

pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}
