use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, TransactionTrait};

use super::{sample, setup_test_db};
use crate::article;

#[tokio::test]
async fn test_rollback_discards_insert() -> anyhow::Result<()> {
    let (db, _dir) = setup_test_db().await?;

    let txn = db.begin().await?;
    sample("rolled back").insert(&txn).await?;
    txn.rollback().await?;

    assert_eq!(article::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_commit_persists_insert() -> anyhow::Result<()> {
    let (db, _dir) = setup_test_db().await?;

    let txn = db.begin().await?;
    let m = sample("kept").insert(&txn).await?;
    txn.commit().await?;

    assert!(article::Entity::find_by_id(m.id).one(&db).await?.is_some());
    Ok(())
}
