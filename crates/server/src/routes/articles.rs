use axum::{extract::State, Json};
use common::types::Message;
use service::article::domain::Article;

use crate::{errors::JsonApiError, form::ArticleForm, path::ArticleId, state::AppState};

#[utoipa::path(get, path = "/articles/", tag = "articles", responses((status = 200, description = "All articles", body = [crate::openapi::ArticleDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Article>>, JsonApiError> {
    let articles = state.articles.list().await.map_err(|e| JsonApiError::from_service(e, "list"))?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article", body = crate::openapi::ArticleDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Malformed id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, ArticleId(id): ArticleId) -> Result<Json<Article>, JsonApiError> {
    let article = state.articles.get(id).await.map_err(|e| JsonApiError::from_service(e, "get"))?;
    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/articles/",
    tag = "articles",
    request_body(content = crate::openapi::ArticleFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Created", body = crate::openapi::ArticleDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    form: ArticleForm,
) -> Result<Json<Article>, JsonApiError> {
    let input = form.into_new()?;
    let article = state.articles.create(input).await.map_err(|e| JsonApiError::from_service(e, "create"))?;
    Ok(Json(article))
}

#[utoipa::path(
    put,
    path = "/articles/{id}",
    tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    request_body(content = crate::openapi::ArticleFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ArticleDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
    form: ArticleForm,
) -> Result<Json<Article>, JsonApiError> {
    let input = form.into_update()?;
    let article = state.articles.update(id, input).await.map_err(|e| JsonApiError::from_service(e, "update"))?;
    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/articles/{id}",
    tag = "articles",
    params(("id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ArticleId(id): ArticleId) -> Result<Json<Message>, JsonApiError> {
    state.articles.delete(id).await.map_err(|e| JsonApiError::from_service(e, "delete"))?;
    Ok(Json(Message::new("Article deleted successfully")))
}
