use mime::Mime;
use models::AssetRef;
use serde::{Serialize, Serializer};

use crate::errors::ServiceError;

/// Text fields supplied on every create and full update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub author: String,
    pub content: String,
}

impl ArticleFields {
    pub fn validate(&self) -> Result<(), ServiceError> {
        models::article::validate_text_fields(&self.title, &self.category, &self.excerpt, &self.author, &self.content)?;
        Ok(())
    }
}

/// Raw file received from a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Declared content type must be an image (or the generic octet-stream most clients fall back to).
    pub fn validate(&self, field: &str) -> Result<(), ServiceError> {
        let Some(ct) = &self.content_type else { return Ok(()) };
        let parsed: Mime = ct
            .parse()
            .map_err(|_| ServiceError::Validation(format!("{field} has an invalid content type: {ct}")))?;
        let octet_stream = parsed.type_() == mime::APPLICATION && parsed.subtype() == mime::OCTET_STREAM;
        if parsed.subtype().as_str().is_empty() || (parsed.type_() != mime::IMAGE && !octet_stream) {
            return Err(ServiceError::Validation(format!("{field} must be an image, got {}", parsed.essence_str())));
        }
        Ok(())
    }
}

/// How a client supplies an asset: a file to store or a URL to reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetInput {
    Upload(Upload),
    Url(String),
}

impl AssetInput {
    pub fn validate(&self, kind: AssetKind) -> Result<(), ServiceError> {
        match self {
            AssetInput::Upload(upload) => upload.validate(kind.field()),
            AssetInput::Url(url) => {
                models::article::validate_asset_ref(kind.url_field(), &AssetRef::External(url.clone()))?;
                Ok(())
            }
        }
    }
}

/// The two asset slots an article carries; each has its own directory under the asset root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    ArticleImage,
    AuthorImage,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::ArticleImage, AssetKind::AuthorImage];

    pub fn dir(self) -> &'static str {
        match self {
            AssetKind::ArticleImage => "images",
            AssetKind::AuthorImage => "author_images",
        }
    }

    /// Form/JSON field holding a stored path.
    pub fn field(self) -> &'static str {
        match self {
            AssetKind::ArticleImage => "image",
            AssetKind::AuthorImage => "author_image",
        }
    }

    /// Form/JSON field holding an external URL.
    pub fn url_field(self) -> &'static str {
        match self {
            AssetKind::ArticleImage => "image_url",
            AssetKind::AuthorImage => "author_image_url",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewArticle {
    pub fields: ArticleFields,
    pub image: AssetInput,
    pub author_image: AssetInput,
}

/// Full update: text fields always replaced, assets only when supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleUpdate {
    pub fields: ArticleFields,
    pub image: Option<AssetInput>,
    pub author_image: Option<AssetInput>,
}

/// Row ready to insert, assets already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleRecord {
    pub fields: ArticleFields,
    pub date: String,
    pub image: AssetRef,
    pub author_image: AssetRef,
}

/// Values written by a full update. `None` assets keep the current reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleChanges {
    pub fields: ArticleFields,
    pub image: Option<AssetRef>,
    pub author_image: Option<AssetRef>,
}

/// Row state on both sides of a committed update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replaced {
    pub before: Article,
    pub after: Article,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub excerpt: String,
    pub image: AssetRef,
    pub date: String,
    pub author: String,
    pub author_image: AssetRef,
    pub content: String,
}

impl Article {
    pub fn asset(&self, kind: AssetKind) -> &AssetRef {
        match kind {
            AssetKind::ArticleImage => &self.image,
            AssetKind::AuthorImage => &self.author_image,
        }
    }

    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            title: self.title.clone(),
            category: self.category.clone(),
            excerpt: self.excerpt.clone(),
            author: self.author.clone(),
            content: self.content.clone(),
        }
    }
}

impl From<models::article::Model> for Article {
    fn from(m: models::article::Model) -> Self {
        Self {
            id: m.id,
            image: m.image_ref(),
            author_image: m.author_image_ref(),
            title: m.title,
            category: m.category,
            excerpt: m.excerpt,
            date: m.date,
            author: m.author,
            content: m.content,
        }
    }
}

#[derive(Serialize)]
struct ArticleWire<'a> {
    id: i32,
    title: &'a str,
    category: &'a str,
    excerpt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    date: &'a str,
    author: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_image_url: Option<&'a str>,
    content: &'a str,
}

fn split(asset: &AssetRef) -> (Option<&str>, Option<&str>) {
    match asset {
        AssetRef::Stored(p) => (Some(p.as_str()), None),
        AssetRef::External(u) => (None, Some(u.as_str())),
    }
}

/// Stored assets go out as `image`/`author_image`, external ones as `image_url`/`author_image_url`.
impl Serialize for Article {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (image, image_url) = split(&self.image);
        let (author_image, author_image_url) = split(&self.author_image);
        ArticleWire {
            id: self.id,
            title: &self.title,
            category: &self.category,
            excerpt: &self.excerpt,
            image,
            image_url,
            date: &self.date,
            author: &self.author,
            author_image,
            author_image_url,
            content: &self.content,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(image: AssetRef, author_image: AssetRef) -> Article {
        Article {
            id: 7,
            title: "A".into(),
            category: "tech".into(),
            excerpt: "e".into(),
            image,
            date: "2024-05-01".into(),
            author: "Bob".into(),
            author_image,
            content: "body".into(),
        }
    }

    #[test]
    fn external_assets_serialize_as_url_fields() {
        let a = article(AssetRef::External("http://x/y.png".into()), AssetRef::External("http://x/z.png".into()));
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            json!({
                "id": 7, "title": "A", "category": "tech", "excerpt": "e",
                "image_url": "http://x/y.png", "date": "2024-05-01", "author": "Bob",
                "author_image_url": "http://x/z.png", "content": "body"
            })
        );
    }

    #[test]
    fn stored_assets_serialize_as_path_fields() {
        let a = article(AssetRef::Stored("images/a.png".into()), AssetRef::External("http://x/z.png".into()));
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["image"], "images/a.png");
        assert!(v.get("image_url").is_none());
        assert_eq!(v["author_image_url"], "http://x/z.png");
        assert!(v.get("author_image").is_none());
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let f = ArticleFields {
            title: String::new(),
            category: String::new(),
            excerpt: String::new(),
            author: String::new(),
            content: String::new(),
        };
        assert!(f.validate().unwrap_err().is_validation());
    }

    #[test]
    fn upload_content_type_must_be_image() {
        let mut up = Upload { file_name: "a.png".into(), content_type: Some("image/png".into()), bytes: vec![1] };
        assert!(up.validate("image").is_ok());
        up.content_type = None;
        assert!(up.validate("image").is_ok());
        up.content_type = Some("IMAGE/JPEG; charset=binary".into());
        assert!(up.validate("image").is_ok());
        up.content_type = Some("application/octet-stream".into());
        assert!(up.validate("image").is_ok());
        for bad in ["text/html", "image/", "application/octet-streamevil", "application/json", "nonsense"] {
            up.content_type = Some(bad.into());
            assert!(matches!(up.validate("image"), Err(ServiceError::Validation(_))), "{bad} accepted");
        }
    }

    #[test]
    fn url_input_must_be_http() {
        assert!(AssetInput::Url("https://cdn/x.png".into()).validate(AssetKind::ArticleImage).is_ok());
        let err = AssetInput::Url("images/x.png".into()).validate(AssetKind::AuthorImage).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("author_image_url"));
        for bad in ["http://", "https://", "http:// not a url", "http://\0"] {
            assert!(AssetInput::Url(bad.into()).validate(AssetKind::ArticleImage).is_err(), "{bad:?} accepted");
        }
    }
}
