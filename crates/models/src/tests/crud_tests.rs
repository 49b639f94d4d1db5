use crate::db::connect_from_env;
use crate::{acronym, acronym_category, category, token, user};
use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

/// Connect and migrate, or skip the test when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect_from_env().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn unique_username() -> String {
    format!("user_{}", Uuid::new_v4())
}

#[tokio::test]
async fn user_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let username = unique_username();
    let created = user::create(&db, "Alice", &username, "$argon2id$stub").await?;
    assert_eq!(created.username, username);

    let found = user::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|u| u.id), Some(created.id));

    let by_username = user::Entity::find()
        .filter(user::Column::Username.eq(username.clone()))
        .one(&db)
        .await?;
    assert_eq!(by_username.map(|u| u.id), Some(created.id));

    // Public projection drops the hash field entirely
    let public = user::Public::from(created.clone());
    let json = serde_json::to_value(&public)?;
    assert!(json.get("password_hash").is_none());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn user_rejects_blank_fields() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    assert!(user::create(&db, "", &unique_username(), "hash").await.is_err());
    assert!(user::create(&db, "Bob", "  ", "hash").await.is_err());
    Ok(())
}

#[tokio::test]
async fn acronym_crud_and_creator_relation() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let creator = user::create(&db, "Author", &unique_username(), "hash").await?;
    let created = acronym::create(&db, "LOL", "laugh out loud", creator.id).await?;
    assert_eq!(created.short, "LOL");
    assert_eq!(created.creator_id, creator.id);

    let found = acronym::Entity::find_by_id(created.id).one(&db).await?.unwrap();
    assert_eq!(found.long, "laugh out loud");

    let owner = found.find_related(user::Entity).one(&db).await?.unwrap();
    assert_eq!(owner.id, creator.id);

    // Full overwrite including creator reassignment
    let editor = user::create(&db, "Editor", &unique_username(), "hash").await?;
    let mut am: acronym::ActiveModel = found.into();
    am.short = Set("LOL2".into());
    am.creator_id = Set(editor.id);
    let updated = am.update(&db).await?;
    assert_eq!(updated.short, "LOL2");
    assert_eq!(updated.creator_id, editor.id);

    acronym::Entity::delete_by_id(created.id).exec(&db).await?;
    let gone = acronym::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());

    user::Entity::delete_by_id(creator.id).exec(&db).await?;
    user::Entity::delete_by_id(editor.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn pivot_attach_is_unique_and_cascades() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let creator = user::create(&db, "Author", &unique_username(), "hash").await?;
    let a = acronym::create(&db, "OMG", "oh my god", creator.id).await?;
    let c = category::create(&db, &format!("Slang {}", Uuid::new_v4())).await?;

    acronym_category::attach(&db, a.id, c.id).await?;
    assert!(acronym_category::exists(&db, a.id, c.id).await?);

    // Composite primary key rejects the duplicate row
    assert!(acronym_category::attach(&db, a.id, c.id).await.is_err());

    let cats = a.find_related(category::Entity).all(&db).await?;
    assert_eq!(cats.iter().filter(|m| m.id == c.id).count(), 1);

    // Deleting the acronym removes the join row
    acronym::Entity::delete_by_id(a.id).exec(&db).await?;
    assert!(!acronym_category::exists(&db, a.id, c.id).await?);

    category::Entity::delete_by_id(c.id).exec(&db).await?;
    user::Entity::delete_by_id(creator.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn token_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let owner = user::create(&db, "Owner", &unique_username(), "hash").await?;
    let now = Utc::now();
    let value = format!("tok_{}", Uuid::new_v4().simple());
    let created =
        token::create(&db, owner.id, &value, now.into(), (now + Duration::hours(1)).into())
            .await?;
    assert_eq!(created.user_id, owner.id);

    let found = token::Entity::find()
        .filter(token::Column::Value.eq(value.clone()))
        .one(&db)
        .await?
        .unwrap();
    assert_eq!(found.id, created.id);

    // Short values are rejected before hitting the database
    assert!(token::create(&db, owner.id, "short", now.into(), now.into()).await.is_err());

    // Deleting the user cascades to the token
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    let gone = token::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());
    Ok(())
}
