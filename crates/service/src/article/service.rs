use std::sync::Arc;

use chrono::Local;
use models::AssetRef;
use tracing::{info, instrument, warn};

use super::domain::{
    Article, ArticleChanges, ArticleRecord, ArticleUpdate, AssetInput, AssetKind, NewArticle,
};
use super::repository::ArticleRepository;
use crate::errors::ServiceError;
use crate::storage::AssetStore;

/// Server-local date stamp assigned to new articles.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Article lifecycle: rows through the repository, uploaded files through the asset store.
///
/// New uploads are written before the row transaction; if the transaction fails
/// they are removed again. Files a committed update or delete made stale are
/// removed afterwards on a best-effort basis.
pub struct ArticleService<R: ArticleRepository> {
    repo: Arc<R>,
    assets: Arc<AssetStore>,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: Arc<R>, assets: Arc<AssetStore>) -> Self { Self { repo, assets } }

    pub fn assets(&self) -> &AssetStore { &self.assets }

    pub async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Article, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("article"))
    }

    /// Create an article, storing uploaded assets first.
    ///
    /// # Examples
    /// ```
    /// use service::article::{ArticleService, domain::{ArticleFields, AssetInput, NewArticle}, repository::mock::MockArticleRepository};
    /// use service::storage::AssetStore;
    /// use std::sync::Arc;
    /// let root = std::env::temp_dir().join(format!("article-doc-{}", uuid::Uuid::new_v4()));
    /// let assets = tokio_test::block_on(AssetStore::new(&root)).unwrap();
    /// let svc = ArticleService::new(Arc::new(MockArticleRepository::default()), assets);
    /// let input = NewArticle {
    ///     fields: ArticleFields { title: "A".into(), category: "tech".into(), excerpt: "e".into(), author: "Bob".into(), content: "body".into() },
    ///     image: AssetInput::Url("http://x/y.png".into()),
    ///     author_image: AssetInput::Url("http://x/z.png".into()),
    /// };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.title, "A");
    /// ```
    #[instrument(skip(self, input), fields(title = %input.fields.title))]
    pub async fn create(&self, input: NewArticle) -> Result<Article, ServiceError> {
        input.fields.validate()?;
        input.image.validate(AssetKind::ArticleImage)?;
        input.author_image.validate(AssetKind::AuthorImage)?;

        let mut staged = Vec::new();
        let res = self.create_staged(input, &mut staged).await;
        if res.is_err() {
            self.discard(&staged).await;
        }
        let article = res?;
        info!(id = article.id, "article_created");
        Ok(article)
    }

    async fn create_staged(&self, input: NewArticle, staged: &mut Vec<String>) -> Result<Article, ServiceError> {
        let image = self.stage(AssetKind::ArticleImage, input.image, staged).await?;
        let author_image = self.stage(AssetKind::AuthorImage, input.author_image, staged).await?;
        let record = ArticleRecord { fields: input.fields, date: today(), image, author_image };
        self.repo.insert(record).await
    }

    /// Overwrite all text fields; replace only the assets that were supplied.
    #[instrument(skip(self, input), fields(id = id))]
    pub async fn update(&self, id: i32, input: ArticleUpdate) -> Result<Article, ServiceError> {
        input.fields.validate()?;
        if let Some(image) = &input.image {
            image.validate(AssetKind::ArticleImage)?;
        }
        if let Some(author_image) = &input.author_image {
            author_image.validate(AssetKind::AuthorImage)?;
        }
        // nothing gets written for an id that does not exist
        self.get(id).await?;

        let mut staged = Vec::new();
        let res = self.update_staged(id, input, &mut staged).await;
        let replaced = match res {
            Ok(Some(replaced)) => replaced,
            Ok(None) => {
                self.discard(&staged).await;
                return Err(ServiceError::not_found("article"));
            }
            Err(e) => {
                self.discard(&staged).await;
                return Err(e);
            }
        };

        for kind in AssetKind::ALL {
            let (old, new) = (replaced.before.asset(kind), replaced.after.asset(kind));
            if old != new {
                self.cleanup(id, old).await;
            }
        }
        info!(id, "article_updated");
        Ok(replaced.after)
    }

    async fn update_staged(
        &self,
        id: i32,
        input: ArticleUpdate,
        staged: &mut Vec<String>,
    ) -> Result<Option<super::domain::Replaced>, ServiceError> {
        let image = match input.image {
            Some(i) => Some(self.stage(AssetKind::ArticleImage, i, staged).await?),
            None => None,
        };
        let author_image = match input.author_image {
            Some(i) => Some(self.stage(AssetKind::AuthorImage, i, staged).await?),
            None => None,
        };
        self.repo.replace(id, ArticleChanges { fields: input.fields, image, author_image }).await
    }

    /// Delete the row, then the files it referenced.
    #[instrument(skip(self), fields(id = id))]
    pub async fn delete(&self, id: i32) -> Result<Article, ServiceError> {
        let removed = self.repo.delete(id).await?.ok_or_else(|| ServiceError::not_found("article"))?;
        for kind in AssetKind::ALL {
            self.cleanup(id, removed.asset(kind)).await;
        }
        info!(id, "article_deleted");
        Ok(removed)
    }

    async fn stage(&self, kind: AssetKind, input: AssetInput, staged: &mut Vec<String>) -> Result<AssetRef, ServiceError> {
        match input {
            AssetInput::Url(url) => Ok(AssetRef::External(url)),
            AssetInput::Upload(upload) => {
                let path = self.assets.save(kind, &upload.file_name, &upload.bytes).await?;
                staged.push(path.clone());
                Ok(AssetRef::Stored(path))
            }
        }
    }

    /// Compensating cleanup for files written by a request that did not commit.
    async fn discard(&self, staged: &[String]) {
        for path in staged {
            if let Err(e) = self.assets.remove(path).await {
                warn!(path = %path, error = %e, "staged_asset_cleanup_failed");
            }
        }
    }

    /// Remove a no-longer-referenced stored asset. The row change already committed,
    /// so failures are logged rather than returned.
    async fn cleanup(&self, id: i32, asset: &AssetRef) {
        let Some(path) = asset.stored_path() else { return };
        match self.assets.remove(path).await {
            Ok(true) => {}
            Ok(false) => warn!(id, path = %path, "asset_already_missing"),
            Err(e) => warn!(id, path = %path, error = %e, "asset_cleanup_failed"),
        }
    }
}
