// ============================================================================
// Member API - Member Handlers
// File: crates/member-api/src/handlers/member.rs
// ============================================================================
//! Member HTTP handlers (register, login, list, detail, update, delete, logout)

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Serialize;
use tracing::info;

use member_core::MemberDto;
use member_shared::MemberId;

use crate::error::ApiError;
use crate::extract::{expired_cookie, session_cookie, session_token, CurrentMember};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Register success response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub email: String,
    pub message: String,
}

/// Register handler - POST /member/save
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<MemberDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    state.directory.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RegisterResponse {
            email: payload.email,
            message: "Registration successful. Please log in.".to_string(),
        })),
    ))
}

/// Login handler - POST /member/login
///
/// Unknown email and wrong password get the same 401. On success any session
/// the request already carries is replaced.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<MemberDto>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .directory
        .authenticate(&payload)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if let Some(token) = session_token(&headers, state.cookie_name()) {
        state.sessions.invalidate(&token);
    }

    let session = state.sessions.create(&member.email)?;
    let cookie = session_cookie(
        state.cookie_name(),
        &session.token,
        state.sessions.ttl().num_seconds(),
    );

    Ok(([(header::SET_COOKIE, cookie)], Json(ApiResponse::success(member))))
}

/// List handler - GET /member/
pub async fn list(
    State(state): State<AppState>,
    _current: CurrentMember,
) -> Result<Json<ApiResponse<Vec<MemberDto>>>, ApiError> {
    let members = state.directory.list_all().await?;
    Ok(Json(ApiResponse::success(members)))
}

/// Detail handler - GET /member/{id}
pub async fn detail(
    State(state): State<AppState>,
    _current: CurrentMember,
    Path(id): Path<MemberId>,
) -> Result<Json<ApiResponse<MemberDto>>, ApiError> {
    let member = state
        .directory
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Member {} not found", id)))?;

    Ok(Json(ApiResponse::success(member)))
}

/// Update form handler - GET /member/update
///
/// Returns the logged-in member so the client can prefill its form.
pub async fn update_form(
    State(state): State<AppState>,
    current: CurrentMember,
) -> Result<Json<ApiResponse<MemberDto>>, ApiError> {
    let member = state
        .directory
        .find_by_email(&current.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("Current member not found".to_string()))?;

    Ok(Json(ApiResponse::success(member)))
}

/// Update handler - POST /member/update
///
/// Redirects to the member's detail page.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentMember,
    Json(payload): Json<MemberDto>,
) -> Result<Redirect, ApiError> {
    let me = state.directory.find_by_email(&current.email).await?;

    state.directory.update(&payload).await?;

    let updated_self = me.is_some_and(|me| me.id.is_some() && me.id == payload.id);
    if updated_self && current.email != payload.email {
        state.sessions.rebind(&current.token, &payload.email);
    }

    let target = match payload.id {
        Some(id) => format!("/member/{}", id),
        None => "/member/".to_string(),
    };
    Ok(Redirect::to(&target))
}

/// Delete handler - GET /member/delete/{id}
pub async fn delete(
    State(state): State<AppState>,
    _current: CurrentMember,
    Path(id): Path<MemberId>,
) -> Result<Redirect, ApiError> {
    state.directory.delete_by_id(id).await?;
    Ok(Redirect::to("/member/"))
}

/// Logout handler - POST /member/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers, state.cookie_name()) {
        if state.sessions.invalidate(&token) {
            info!("Session invalidated");
        }
    }

    (
        [(header::SET_COOKIE, expired_cookie(state.cookie_name()))],
        Json(ApiResponse::success("Logged out successfully")),
    )
}
