use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use super::{sample, setup_test_db};
use crate::article;

#[tokio::test]
async fn test_article_crud() -> anyhow::Result<()> {
    let (db, _dir) = setup_test_db().await?;

    // Create
    let created = sample("A").insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.title, "A");

    // Read
    let found = article::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    // Update
    let mut am: article::ActiveModel = created.clone().into();
    am.title = Set("B".into());
    am.image = Set("images/new.png".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.title, "B");
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.image_ref().stored_path(), Some("images/new.png"));

    // Delete
    let res = article::Entity::delete_by_id(created.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(article::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ids_are_unique_and_ordered() -> anyhow::Result<()> {
    let (db, _dir) = setup_test_db().await?;

    let a = sample("first").insert(&db).await?;
    let b = sample("second").insert(&db).await?;
    assert_ne!(a.id, b.id);

    let all = article::Entity::find().order_by_asc(article::Column::Id).all(&db).await?;
    let ids: Vec<i32> = all.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);

    // deleted ids are not handed out again
    article::Entity::delete_by_id(b.id).exec(&db).await?;
    let c = sample("third").insert(&db).await?;
    assert!(c.id > a.id);
    Ok(())
}

#[tokio::test]
async fn test_long_content_round_trips() -> anyhow::Result<()> {
    let (db, _dir) = setup_test_db().await?;
    let mut am = sample("long");
    let body = "lorem ipsum ".repeat(10_000);
    am.content = Set(body.clone());
    let created = am.insert(&db).await?;
    let found = article::Entity::find_by_id(created.id).one(&db).await?.expect("row");
    assert_eq!(found.content, body);
    Ok(())
}
