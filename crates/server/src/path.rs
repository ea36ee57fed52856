//! Path parameters with JSON rejections.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::JsonApiError;

/// `{id}` segment of `/articles/{id}`. Non-numeric or out-of-range ids are a 422.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| JsonApiError::validation(e.body_text()))?;
        parse_id(&raw).map(ArticleId)
    }
}

fn parse_id(raw: &str) -> Result<i32, JsonApiError> {
    raw.parse::<i32>()
        .map_err(|e| JsonApiError::validation(format!("id must be an integer within i32 range, got {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn ids_must_be_i32() {
        assert_eq!(parse_id("42").expect("valid"), 42);
        for bad in ["abc", "1.5", "99999999999", ""] {
            let err = parse_id(bad).unwrap_err();
            assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY, "{bad}");
        }
    }
}
