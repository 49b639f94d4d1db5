use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod acronyms;
pub mod auth;
pub mod categories;
pub mod users;
pub mod web;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: open JSON reads, bearer-gated
/// JSON mutations, public HTML pages, and session-gated HTML forms.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    // JSON API, open reads
    let api_open = Router::new()
        .route("/api/acronyms", get(acronyms::list))
        .route("/api/acronyms/search", get(acronyms::search))
        .route("/api/acronyms/:id", get(acronyms::get_one))
        .route("/api/acronyms/:id/creator", get(acronyms::get_creator))
        .route("/api/acronyms/:id/categories", get(acronyms::get_categories))
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", get(users::get_one))
        .route("/api/users/:id/acronyms", get(users::get_acronyms))
        .route("/api/users/login", post(users::login))
        .route("/api/categories", get(categories::list))
        .route("/api/categories/:id", get(categories::get_one))
        .route("/api/categories/:id/acronyms", get(categories::get_acronyms));

    // JSON API, bearer-gated mutations (the category attach included)
    let api_protected = Router::new()
        .route("/api/acronyms", post(acronyms::create))
        .route("/api/acronyms/:id", put(acronyms::update).delete(acronyms::delete))
        .route("/api/acronyms/:id/categories/:category_id", post(acronyms::attach_category))
        .route("/api/categories", post(categories::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer));

    // HTML, public pages
    let web_public = Router::new()
        .route("/", get(web::index))
        .route("/acronyms/:id", get(web::acronym_detail))
        .route("/users", get(web::users_list))
        .route("/users/:id", get(web::user_detail))
        .route("/categories", get(web::categories_list))
        .route("/categories/:id", get(web::category_detail))
        .route("/login", get(web::login_form).post(web::login_post))
        .route("/logout", post(web::logout));

    // HTML, session-gated forms
    let web_protected = Router::new()
        .route("/create-acronym", get(web::create_form).post(web::create_post))
        .route("/acronyms/:id/edit", get(web::edit_form).post(web::edit_post))
        .route("/acronyms/:id/delete", post(web::delete_post))
        .route_layer(middleware::from_fn_with_state(state.clone(), web::require_session));

    Router::new()
        .route("/health", get(health))
        .merge(api_open)
        .merge(api_protected)
        .merge(web_public)
        .merge(web_protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One span per request at INFO, with status and latency on close
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
