use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, Message};

use crate::{openapi::ApiDoc, state::AppState};

pub mod articles;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Greeting", body = crate::openapi::MessageResponse)))]
pub async fn root() -> Json<Message> {
    Json(Message::new("Welcome to the article management system"))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: article CRUD, stored asset files, and API docs.
///
/// `max_upload_bytes` caps the request body, so a form carrying two files must fit in it.
pub fn build_router(state: AppState, cors: CorsLayer, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.articles.assets().root());

    let articles = Router::new()
        .route("/articles", get(articles::list).post(articles::create))
        .route("/articles/", get(articles::list).post(articles::create))
        .route(
            "/articles/:id",
            get(articles::get).put(articles::update).delete(articles::delete),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(articles)
        .nest_service("/uploads", uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
