//! OpenAPI document. Schemas here describe the wire shape only.

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

/// An article. Each asset appears either as a stored path (`image`, `author_image`,
/// served under `/uploads/`) or as an external URL (`image_url`, `author_image_url`).
#[derive(ToSchema)]
pub struct ArticleDoc {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub date: String,
    pub author: String,
    pub author_image: Option<String>,
    pub author_image_url: Option<String>,
    pub content: String,
}

/// Create/update form. Send each asset as a file or as a URL, not both.
#[derive(ToSchema)]
pub struct ArticleFormDoc {
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub author: String,
    pub content: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
    pub image_url: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub author_image: Option<Vec<u8>>,
    pub author_image_url: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::articles::list,
        crate::routes::articles::get,
        crate::routes::articles::create,
        crate::routes::articles::update,
        crate::routes::articles::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            ErrorDoc,
            ArticleDoc,
            ArticleFormDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "articles")
    )
)]
pub struct ApiDoc;
