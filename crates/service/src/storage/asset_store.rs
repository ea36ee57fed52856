use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use chrono::Local;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;
use uuid::Uuid;

use crate::article::domain::AssetKind;
use crate::errors::ServiceError;

const MAX_ORIGINAL_NAME: usize = 100;

/// Uploaded asset files kept under one root, one subdirectory per [`AssetKind`].
///
/// Callers only ever see paths relative to the root (`images/<file>`); those are
/// what gets stored on article rows.
#[derive(Debug)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Initialize the store, creating the per-kind directories if missing.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Arc<Self>, ServiceError> {
        let root = root.into();
        for kind in AssetKind::ALL {
            fs::create_dir_all(root.join(kind.dir())).await?;
        }
        Ok(Arc::new(Self { root }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under a fresh, collision-free name and return the relative path.
    pub async fn save(&self, kind: AssetKind, original_name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let relative = format!("{}/{}", kind.dir(), unique_file_name(original_name));
        let path = self.resolve(&relative)?;
        let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        debug!(path = %relative, size = bytes.len(), "asset_saved");
        Ok(relative)
    }

    /// Remove a stored asset. Returns `false` when it was already gone.
    pub async fn remove(&self, relative: &str) -> Result<bool, ServiceError> {
        let path = self.resolve(relative)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %relative, "asset_removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServiceError::Asset(format!("cannot remove {relative}: {e}"))),
        }
    }

    pub async fn exists(&self, relative: &str) -> bool {
        match self.resolve(relative) {
            Ok(path) => fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Absolute path for a relative asset path. Only plain components are accepted.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, ServiceError> {
        let rel = Path::new(relative);
        let plain = !relative.is_empty() && rel.components().all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(ServiceError::Asset(format!("invalid asset path: {relative}")));
        }
        Ok(self.root.join(rel))
    }
}

/// Last path segment of a client file name, restricted to `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(original: &str) -> String {
    let last = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned: String = match cleaned.char_indices().nth(MAX_ORIGINAL_NAME) {
        // keep the extension when cutting long names
        Some(_) => {
            let ext = Path::new(cleaned).extension().and_then(|e| e.to_str()).unwrap_or_default();
            let keep = MAX_ORIGINAL_NAME.saturating_sub(ext.len() + 1);
            if ext.is_empty() || ext.len() >= MAX_ORIGINAL_NAME {
                cleaned[..MAX_ORIGINAL_NAME].to_string()
            } else {
                format!("{}.{}", &cleaned[..keep], ext)
            }
        }
        None => cleaned.to_string(),
    };
    if cleaned.is_empty() { "upload".to_string() } else { cleaned }
}

/// `<YYYYmmddHHMMSS>_<token>_<original>`; the token keeps same-second uploads apart.
pub fn unique_file_name(original: &str) -> String {
    format!(
        "{}_{}_{}",
        Local::now().format("%Y%m%d%H%M%S"),
        Uuid::new_v4().simple(),
        sanitize_file_name(original)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_store() -> (Arc<AssetStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = AssetStore::new(dir.path().join("uploads")).await.expect("store init");
        (store, dir)
    }

    #[tokio::test]
    async fn creates_kind_directories() {
        let (store, _dir) = setup_store().await;
        assert!(store.root().join("images").is_dir());
        assert!(store.root().join("author_images").is_dir());
    }

    #[tokio::test]
    async fn save_exists_remove() {
        let (store, _dir) = setup_store().await;
        let rel = store.save(AssetKind::ArticleImage, "cover.png", b"png").await.expect("save");
        assert!(rel.starts_with("images/"));
        assert!(rel.ends_with("_cover.png"));
        assert!(store.exists(&rel).await);
        assert_eq!(std::fs::read(store.resolve(&rel).unwrap()).unwrap(), b"png");

        assert!(store.remove(&rel).await.expect("remove"));
        assert!(!store.exists(&rel).await);
        // already gone is not an error
        assert!(!store.remove(&rel).await.expect("second remove"));
    }

    #[tokio::test]
    async fn same_name_uploads_do_not_collide() {
        let (store, _dir) = setup_store().await;
        let a = store.save(AssetKind::AuthorImage, "me.jpg", b"a").await.unwrap();
        let b = store.save(AssetKind::AuthorImage, "me.jpg", b"b").await.unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("author_images/"));
        assert_eq!(std::fs::read(store.resolve(&a).unwrap()).unwrap(), b"a");
        assert_eq!(std::fs::read(store.resolve(&b).unwrap()).unwrap(), b"b");
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let (store, _dir) = setup_store().await;
        for bad in ["../secret", "/etc/passwd", "images/../../x", ""] {
            assert!(store.resolve(bad).is_err(), "{bad}");
            assert!(!store.exists(bad).await);
            assert!(matches!(store.remove(bad).await, Err(ServiceError::Asset(_))));
        }
    }

    #[test]
    fn sanitize_strips_dirs_and_odd_chars() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\photo 1.PNG"), "photo_1.PNG");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("عکس.jpg"), "___.jpg");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("dir/"), "upload");
    }

    #[test]
    fn sanitize_caps_length_and_keeps_extension() {
        let long = format!("{}.jpeg", "a".repeat(300));
        let s = sanitize_file_name(&long);
        assert_eq!(s.len(), MAX_ORIGINAL_NAME);
        assert!(s.ends_with(".jpeg"));
    }

    #[test]
    fn unique_names_fit_the_column() {
        let name = unique_file_name(&"x".repeat(1000));
        assert!(name.len() + "author_images/".len() <= models::article::ASSET_MAX);
    }
}
