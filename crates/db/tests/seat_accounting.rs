//! Tests for the atomic seat-accounting primitives under contention.

mod common;

use futures::future::join_all;
use sqlx::PgPool;

use edupulse_db::repositories::BatchRepo;

use common::{seed_batch, seed_course};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reserve_seat_stops_at_capacity(pool: PgPool) {
    let course = seed_course(&pool, "Rust").await;
    let batch = seed_batch(&pool, course.id, 2).await;

    let mut tx = pool.begin().await.unwrap();
    assert!(BatchRepo::reserve_seat(&mut tx, batch.id).await.unwrap());
    assert!(BatchRepo::reserve_seat(&mut tx, batch.id).await.unwrap());
    // Third seat does not exist.
    assert!(!BatchRepo::reserve_seat(&mut tx, batch.id).await.unwrap());
    tx.commit().await.unwrap();

    let after = BatchRepo::find_by_id(&pool, batch.id).await.unwrap().unwrap();
    assert_eq!(after.current_enrolled, 2);
    assert_eq!(after.seats_left(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_seat_floors_at_zero(pool: PgPool) {
    let course = seed_course(&pool, "Rust").await;
    let batch = seed_batch(&pool, course.id, 3).await;

    let mut tx = pool.begin().await.unwrap();
    assert!(BatchRepo::reserve_seat(&mut tx, batch.id).await.unwrap());
    assert!(BatchRepo::release_seat(&mut tx, batch.id).await.unwrap());
    // Counter is back at zero; further releases must refuse to wrap.
    assert!(!BatchRepo::release_seat(&mut tx, batch.id).await.unwrap());
    tx.commit().await.unwrap();

    let after = BatchRepo::find_by_id(&pool, batch.id).await.unwrap().unwrap();
    assert_eq!(after.current_enrolled, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_for_update_misses_unknown_batch(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    assert!(BatchRepo::lock_for_update(&mut tx, 999_999)
        .await
        .unwrap()
        .is_none());
    tx.rollback().await.unwrap();
}

/// Many concurrent single-seat transactions against a small batch: the
/// guarded increment admits exactly `max_seats` of them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_reserves_never_overbook(pool: PgPool) {
    let course = seed_course(&pool, "Rust").await;
    let batch = seed_batch(&pool, course.id, 3).await;

    let attempts = 10;
    let tasks: Vec<_> = (0..attempts)
        .map(|_| {
            let pool = pool.clone();
            let batch_id = batch.id;
            tokio::spawn(async move {
                let mut tx = pool.begin().await?;
                let reserved = BatchRepo::reserve_seat(&mut tx, batch_id).await?;
                tx.commit().await?;
                Ok::<bool, sqlx::Error>(reserved)
            })
        })
        .collect();

    let mut reserved = 0;
    for result in join_all(tasks).await {
        if result.unwrap().unwrap() {
            reserved += 1;
        }
    }
    assert_eq!(reserved, 3);

    let after = BatchRepo::find_by_id(&pool, batch.id).await.unwrap().unwrap();
    assert_eq!(after.current_enrolled, 3);
}
