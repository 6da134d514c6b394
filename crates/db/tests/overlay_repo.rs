//! Integration tests for the overlay repository against a real database.
//!
//! Run with `DATABASE_URL` pointing at a Postgres server:
//! `cargo test -p overlay-db -- --ignored`

use overlay_core::overlay::Size;
use overlay_db::models::overlay::{Overlay, OverlayFields};
use overlay_db::repositories::OverlayRepo;
use overlay_db::stores::{OverlayStore, PgOverlayStore};
use sqlx::PgPool;

fn new_overlay(kind: &str, z_index: i32) -> overlay_db::models::overlay::NewOverlay {
    OverlayFields {
        kind: Some(kind.to_string()),
        z_index: Some(z_index),
        ..OverlayFields::default()
    }
    .into_new_overlay()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_stores_defaults(pool: PgPool) {
    let row = OverlayRepo::create(&pool, &new_overlay("text", 5))
        .await
        .unwrap();

    assert!(row.id > 0);
    assert_eq!(row.overlay_type.as_deref(), Some("text"));
    assert_eq!(row.content.as_deref(), Some(""));
    assert_eq!(row.width, Some(200.0));
    assert_eq!(row.z_index, Some(5));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_orders_by_z_index(pool: PgPool) {
    let text = OverlayRepo::create(&pool, &new_overlay("text", 5)).await.unwrap();
    let logo = OverlayRepo::create(&pool, &new_overlay("logo", 1)).await.unwrap();

    // A bare row with no overlay fields at all.
    let bare_id: i64 = sqlx::query_scalar("INSERT INTO overlays DEFAULT VALUES RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();

    let ids: Vec<i64> = OverlayRepo::list_by_z_index(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![bare_id, logo.id, text.id]);

    let bare = OverlayRepo::find_by_id(&pool, bare_id).await.unwrap().unwrap();
    let overlay = Overlay::from(bare);
    assert_eq!(overlay.kind, "text");
    assert_eq!(overlay.z_index, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_changes_only_supplied_fields(pool: PgPool) {
    let row = OverlayRepo::create(&pool, &new_overlay("text", 2)).await.unwrap();

    let patch = OverlayFields {
        content: Some("hi".to_string()),
        size: Some(Size {
            width: 50.0,
            height: 20.0,
        }),
        ..OverlayFields::default()
    };
    let updated = OverlayRepo::update(&pool, row.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.content.as_deref(), Some("hi"));
    assert_eq!(updated.width, Some(50.0));
    assert_eq!(updated.height, Some(20.0));
    assert_eq!(updated.overlay_type.as_deref(), Some("text"));
    assert_eq!(updated.z_index, Some(2));
    assert!(updated.updated_at >= row.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_missing_returns_none(pool: PgPool) {
    let result = OverlayRepo::update(&pool, 999_999, &OverlayFields::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn delete_twice(pool: PgPool) {
    let store = PgOverlayStore::new(pool);
    let row = store.insert(&new_overlay("logo", 1)).await.unwrap();

    assert!(store.delete(row.id).await.unwrap());
    assert!(!store.delete(row.id).await.unwrap());
    store.ping().await.unwrap();
}
