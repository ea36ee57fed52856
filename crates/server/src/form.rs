//! Article form extraction.
//!
//! Accepts `multipart/form-data` (file uploads and/or URL fields) and
//! `application/x-www-form-urlencoded` (URL fields only).

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use service::article::domain::{ArticleFields, ArticleUpdate, AssetInput, AssetKind, NewArticle, Upload};

use crate::errors::JsonApiError;

const TEXT_FIELDS: [&str; 5] = ["title", "category", "excerpt", "author", "content"];

/// Raw submitted form: text fields by name and file parts by name.
#[derive(Debug, Default)]
pub struct ArticleForm {
    pub text: HashMap<String, String>,
    pub files: HashMap<String, Upload>,
}

#[async_trait]
impl<S> FromRequest<S> for ArticleForm
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Ok(Self { text: pairs.into_iter().collect(), files: HashMap::new() })
        } else {
            Err(JsonApiError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Media Type",
                Some("expected multipart/form-data or application/x-www-form-urlencoded".into()),
            ))
        }
    }
}

/// Body-level failures keep the status axum picked (400, 413, ...).
fn rejected(status: StatusCode, detail: String) -> JsonApiError {
    JsonApiError::new(status, status.canonical_reason().unwrap_or("Bad Request"), Some(detail))
}

impl ArticleForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, JsonApiError> {
        let mut form = ArticleForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| rejected(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else { continue };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| rejected(e.status(), e.body_text()))?;
                    // browsers send an empty, unnamed part for an untouched file input
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(name, Upload { file_name, content_type, bytes: bytes.to_vec() });
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| rejected(e.status(), e.body_text()))?;
                    form.text.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    fn fields(&mut self) -> Result<ArticleFields, JsonApiError> {
        // an empty value is what a browser sends for an untouched input
        let missing: Vec<&str> = TEXT_FIELDS
            .iter()
            .copied()
            .filter(|f| self.text.get(*f).map_or(true, |v| v.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(JsonApiError::validation(format!("missing required field(s): {}", missing.join(", "))));
        }
        let mut take = |name: &str| self.text.remove(name).unwrap_or_default();
        Ok(ArticleFields {
            title: take("title"),
            category: take("category"),
            excerpt: take("excerpt"),
            author: take("author"),
            content: take("content"),
        })
    }

    /// The asset supplied for `kind`, if any: a file part named `image`/`author_image`
    /// or a text field named `image_url`/`author_image_url`.
    fn asset(&mut self, kind: AssetKind) -> Result<Option<AssetInput>, JsonApiError> {
        if self.text.contains_key(kind.field()) {
            return Err(JsonApiError::validation(format!(
                "{} must be a file upload; send a URL as {}",
                kind.field(),
                kind.url_field()
            )));
        }
        let file = self.files.remove(kind.field());
        let url = self.text.remove(kind.url_field()).filter(|u| !u.trim().is_empty());
        match (file, url) {
            (Some(_), Some(_)) => Err(JsonApiError::validation(format!(
                "send either {} or {}, not both",
                kind.field(),
                kind.url_field()
            ))),
            (Some(upload), None) => Ok(Some(AssetInput::Upload(upload))),
            (None, Some(url)) => Ok(Some(AssetInput::Url(url))),
            (None, None) => Ok(None),
        }
    }

    fn required_asset(&mut self, kind: AssetKind) -> Result<AssetInput, JsonApiError> {
        self.asset(kind)?.ok_or_else(|| {
            JsonApiError::validation(format!("missing required field: {} or {}", kind.field(), kind.url_field()))
        })
    }

    /// Create input: every text field and both assets are required.
    pub fn into_new(mut self) -> Result<NewArticle, JsonApiError> {
        let fields = self.fields()?;
        let image = self.required_asset(AssetKind::ArticleImage)?;
        let author_image = self.required_asset(AssetKind::AuthorImage)?;
        Ok(NewArticle { fields, image, author_image })
    }

    /// Update input: every text field required, assets optional.
    pub fn into_update(mut self) -> Result<ArticleUpdate, JsonApiError> {
        let fields = self.fields()?;
        let image = self.asset(AssetKind::ArticleImage)?;
        let author_image = self.asset(AssetKind::AuthorImage)?;
        Ok(ArticleUpdate { fields, image, author_image })
    }
}
