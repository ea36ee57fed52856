use async_trait::async_trait;

use super::domain::{Article, ArticleChanges, ArticleRecord, Replaced};
use crate::errors::ServiceError;

/// Persistence seam for article rows. Each write is atomic on its own.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Article>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError>;
    async fn insert(&self, record: ArticleRecord) -> Result<Article, ServiceError>;
    /// Overwrite a row. `Ok(None)` when the id does not exist.
    async fn replace(&self, id: i32, changes: ArticleChanges) -> Result<Option<Replaced>, ServiceError>;
    /// Delete a row and hand back what it held. `Ok(None)` when the id does not exist.
    async fn delete(&self, id: i32) -> Result<Option<Article>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockArticleRepository {
        rows: Mutex<BTreeMap<i32, Article>>,
        last_id: Mutex<i32>,
        fail_writes: AtomicBool,
        vanish_on_replace: AtomicBool,
    }

    impl MockArticleRepository {
        /// Make every subsequent write fail as if the database rejected it.
        pub fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Make the next `replace` find its row gone, as if a concurrent delete committed
        /// after the caller last read it.
        pub fn set_vanish_on_replace(&self, vanish: bool) {
            self.vanish_on_replace.store(vanish, Ordering::SeqCst);
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("mock write failure".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ArticleRepository for MockArticleRepository {
        async fn list(&self) -> Result<Vec<Article>, ServiceError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, record: ArticleRecord) -> Result<Article, ServiceError> {
            self.check_writable()?;
            let mut last = self.last_id.lock().unwrap();
            *last += 1;
            let f = record.fields;
            let article = Article {
                id: *last,
                title: f.title,
                category: f.category,
                excerpt: f.excerpt,
                image: record.image,
                date: record.date,
                author: f.author,
                author_image: record.author_image,
                content: f.content,
            };
            self.rows.lock().unwrap().insert(article.id, article.clone());
            Ok(article)
        }

        async fn replace(&self, id: i32, changes: ArticleChanges) -> Result<Option<Replaced>, ServiceError> {
            self.check_writable()?;
            let mut rows = self.rows.lock().unwrap();
            if self.vanish_on_replace.swap(false, Ordering::SeqCst) {
                rows.remove(&id);
            }
            let Some(row) = rows.get_mut(&id) else { return Ok(None) };
            let before = row.clone();
            let f = changes.fields;
            row.title = f.title;
            row.category = f.category;
            row.excerpt = f.excerpt;
            row.author = f.author;
            row.content = f.content;
            if let Some(image) = changes.image {
                row.image = image;
            }
            if let Some(author_image) = changes.author_image {
                row.author_image = author_image;
            }
            Ok(Some(Replaced { before, after: row.clone() }))
        }

        async fn delete(&self, id: i32) -> Result<Option<Article>, ServiceError> {
            self.check_writable()?;
            Ok(self.rows.lock().unwrap().remove(&id))
        }
    }
}
