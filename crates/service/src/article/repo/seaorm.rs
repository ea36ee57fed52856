use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::warn;

use models::article;

use crate::article::domain::{Article, ArticleChanges, ArticleRecord, Replaced};
use crate::article::repository::ArticleRepository;
use crate::errors::ServiceError;

pub struct SeaOrmArticleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmArticleRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Commit on success, explicit rollback on failure.
async fn finish<T>(txn: DatabaseTransaction, res: Result<T, DbErr>) -> Result<T, ServiceError> {
    match res {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rb) = txn.rollback().await {
                warn!(error = %rb, "rollback failed");
            }
            Err(e.into())
        }
    }
}

async fn replace_in(
    txn: &DatabaseTransaction,
    id: i32,
    changes: ArticleChanges,
) -> Result<Option<Replaced>, DbErr> {
    let Some(found) = article::Entity::find_by_id(id).one(txn).await? else { return Ok(None) };
    let before = Article::from(found.clone());

    let f = changes.fields;
    let mut am: article::ActiveModel = found.into();
    am.title = Set(f.title);
    am.category = Set(f.category);
    am.excerpt = Set(f.excerpt);
    am.author = Set(f.author);
    am.content = Set(f.content);
    if let Some(image) = changes.image {
        am.image = Set(image.into_column());
    }
    if let Some(author_image) = changes.author_image {
        am.author_image = Set(author_image.into_column());
    }
    let updated = am.update(txn).await?;
    Ok(Some(Replaced { before, after: updated.into() }))
}

async fn delete_in(txn: &DatabaseTransaction, id: i32) -> Result<Option<Article>, DbErr> {
    let Some(found) = article::Entity::find_by_id(id).one(txn).await? else { return Ok(None) };
    article::Entity::delete_by_id(id).exec(txn).await?;
    Ok(Some(found.into()))
}

#[async_trait::async_trait]
impl ArticleRepository for SeaOrmArticleRepository {
    async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        let rows = article::Entity::find()
            .order_by_asc(article::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Article>, ServiceError> {
        let row = article::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Article::from))
    }

    async fn insert(&self, record: ArticleRecord) -> Result<Article, ServiceError> {
        let f = record.fields;
        let am = article::ActiveModel {
            title: Set(f.title),
            category: Set(f.category),
            excerpt: Set(f.excerpt),
            image: Set(record.image.into_column()),
            date: Set(record.date),
            author: Set(f.author),
            author_image: Set(record.author_image.into_column()),
            content: Set(f.content),
            ..Default::default()
        };
        let txn = self.db.begin().await?;
        let res = am.insert(&txn).await;
        finish(txn, res).await.map(Article::from)
    }

    async fn replace(&self, id: i32, changes: ArticleChanges) -> Result<Option<Replaced>, ServiceError> {
        let txn = self.db.begin().await?;
        let res = replace_in(&txn, id, changes).await;
        finish(txn, res).await
    }

    async fn delete(&self, id: i32) -> Result<Option<Article>, ServiceError> {
        let txn = self.db.begin().await?;
        let res = delete_in(&txn, id).await;
        finish(txn, res).await
    }
}
