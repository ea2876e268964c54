use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{health, member};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/member/save", post(member::register))
        .route("/member/login", post(member::login))
        .route("/member/logout", get(member::logout).post(member::logout));

    // Session-gated routes (CurrentMember extractor)
    let member_routes = Router::new()
        .route("/member/", get(member::list))
        .route("/member/update", get(member::update_form).post(member::update))
        .route("/member/{id}", get(member::detail))
        .route("/member/delete/{id}", get(member::delete));

    Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .with_state(state)
}
