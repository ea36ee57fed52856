//! Reference to an article asset as persisted in an `articles` column.

use url::Url;

/// An article image: either a file under the asset root or an externally hosted URL.
///
/// Both variants share one text column. URLs always carry an `http://` or
/// `https://` scheme and stored paths never do, which keeps
/// [`AssetRef::from_column`] unambiguous.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssetRef {
    /// Path relative to the asset root, e.g. `images/20240101120000_ab12_cover.png`.
    Stored(String),
    /// Externally hosted URL.
    External(String),
}

impl AssetRef {
    pub fn from_column(value: impl Into<String>) -> Self {
        let value = value.into();
        if has_http_scheme(&value) {
            AssetRef::External(value)
        } else {
            AssetRef::Stored(value)
        }
    }

    pub fn as_column(&self) -> &str {
        match self {
            AssetRef::Stored(p) | AssetRef::External(p) => p,
        }
    }

    pub fn into_column(self) -> String {
        match self {
            AssetRef::Stored(p) | AssetRef::External(p) => p,
        }
    }

    /// Relative path when the asset lives on local disk.
    pub fn stored_path(&self) -> Option<&str> {
        match self {
            AssetRef::Stored(p) => Some(p),
            AssetRef::External(_) => None,
        }
    }

}

/// Scheme test used to tell the two variants apart when reading a column.
pub(crate) fn has_http_scheme(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// An absolute `http`/`https` URL with a host, written without whitespace or control characters.
pub fn is_http_url(value: &str) -> bool {
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
