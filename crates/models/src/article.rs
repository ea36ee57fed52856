use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{asset::{has_http_scheme, is_http_url}, errors, AssetRef};

pub const TITLE_MAX: usize = 200;
pub const CATEGORY_MAX: usize = 100;
pub const EXCERPT_MAX: usize = 300;
pub const AUTHOR_MAX: usize = 100;
pub const ASSET_MAX: usize = 500;
pub const DATE_MAX: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub image: String,
    pub date: String,
    pub author: String,
    pub author_image: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn image_ref(&self) -> AssetRef {
        AssetRef::from_column(self.image.clone())
    }

    pub fn author_image_ref(&self) -> AssetRef {
        AssetRef::from_column(self.author_image.clone())
    }
}

/// Reject values that would not fit their column.
pub fn validate_len(field: &str, value: &str, max: usize) -> Result<(), errors::ModelError> {
    if value.chars().count() > max {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

/// Empty submissions count as missing.
pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("missing required field: {field}")));
    }
    Ok(())
}

pub fn validate_text_fields(
    title: &str,
    category: &str,
    excerpt: &str,
    author: &str,
    content: &str,
) -> Result<(), errors::ModelError> {
    for (field, value) in [("title", title), ("category", category), ("excerpt", excerpt), ("author", author), ("content", content)] {
        validate_required(field, value)?;
    }
    validate_len("title", title, TITLE_MAX)?;
    validate_len("category", category, CATEGORY_MAX)?;
    validate_len("excerpt", excerpt, EXCERPT_MAX)?;
    validate_len("author", author, AUTHOR_MAX)?;
    Ok(())
}

/// External refs must be absolute http(s) URLs; stored refs must be plain relative paths.
pub fn validate_asset_ref(field: &str, asset: &AssetRef) -> Result<(), errors::ModelError> {
    validate_len(field, asset.as_column(), ASSET_MAX)?;
    match asset {
        AssetRef::External(url) => {
            if !is_http_url(url) {
                return Err(errors::ModelError::Validation(format!("{field} must be an absolute http(s) URL")));
            }
        }
        AssetRef::Stored(path) => {
            if path.is_empty() || has_http_scheme(path) || path.starts_with('/') {
                return Err(errors::ModelError::Validation(format!("{field} must be a relative asset path")));
            }
        }
    }
    Ok(())
}
