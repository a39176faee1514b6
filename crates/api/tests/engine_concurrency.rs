//! Contention tests for the enrollment transaction engine: more bookers than
//! seats, and duplicate attempts racing each other.

use chrono::{Duration, Utc};
use futures::future::join_all;
use sqlx::PgPool;

use edupulse_api::engine::EnrollmentEngine;
use edupulse_api::error::AppError;
use edupulse_core::error::CoreError;
use edupulse_db::models::batch::CreateBatch;
use edupulse_db::models::course::CreateCourse;
use edupulse_db::models::user::CreateUser;
use edupulse_db::repositories::{BatchRepo, CourseRepo, EnrollmentRepo, UserRepo};

async fn seed_batch(pool: &PgPool, max_seats: i32) -> i64 {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            title: "Operating Systems".to_string(),
            description: None,
            price_cents: None,
        },
    )
    .await
    .unwrap();

    BatchRepo::create(
        pool,
        &CreateBatch {
            course_id: course.id,
            start_date: Utc::now() + Duration::days(7),
            max_seats,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_students(pool: &PgPool, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let user = UserRepo::create(
            pool,
            &CreateUser {
                email: format!("student{i}@example.com"),
                password_hash: "$argon2id$stub".to_string(),
                role: "STUDENT".to_string(),
            },
        )
        .await
        .unwrap();
        ids.push(user.id);
    }
    ids
}

/// Eight students race for three seats: exactly three bookings land, every
/// loser gets the batch-full outcome, and the counter matches the surviving
/// rows. No interleaving may overbook.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_more_bookers_than_seats(pool: PgPool) {
    let batch_id = seed_batch(&pool, 3).await;
    let students = seed_students(&pool, 8).await;

    let tasks: Vec<_> = students
        .into_iter()
        .map(|user_id| {
            let pool = pool.clone();
            tokio::spawn(async move { EnrollmentEngine::create(&pool, user_id, batch_id).await })
        })
        .collect();

    let mut booked = 0;
    let mut refused = 0;
    for result in join_all(tasks).await {
        match result.unwrap() {
            Ok(detail) => {
                assert_eq!(detail.status, "PENDING");
                booked += 1;
            }
            Err(AppError::Core(CoreError::BatchFull { .. })) => refused += 1,
            Err(other) => panic!("unexpected booking failure: {other}"),
        }
    }
    assert_eq!(booked, 3);
    assert_eq!(refused, 5);

    let batch = BatchRepo::find_by_id(&pool, batch_id).await.unwrap().unwrap();
    assert_eq!(batch.current_enrolled, 3);
    assert_eq!(
        EnrollmentRepo::count_for_batch(&pool, batch_id).await.unwrap(),
        3
    );
}

/// The same student fires several bookings at once: one wins, the rest are
/// duplicate conflicts, and only one seat is consumed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_duplicate_attempts(pool: PgPool) {
    let batch_id = seed_batch(&pool, 10).await;
    let user_id = seed_students(&pool, 1).await[0];

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { EnrollmentEngine::create(&pool, user_id, batch_id).await })
        })
        .collect();

    let mut booked = 0;
    let mut duplicates = 0;
    for result in join_all(tasks).await {
        match result.unwrap() {
            Ok(_) => booked += 1,
            Err(AppError::Core(CoreError::AlreadyEnrolled { .. })) => duplicates += 1,
            Err(other) => panic!("unexpected booking failure: {other}"),
        }
    }
    assert_eq!(booked, 1);
    assert_eq!(duplicates, 4);

    let batch = BatchRepo::find_by_id(&pool, batch_id).await.unwrap().unwrap();
    assert_eq!(batch.current_enrolled, 1);
}

/// Create-then-cancel round trips leave no residue: the counter returns to
/// zero and equals the number of live rows at every step.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_restores_capacity(pool: PgPool) {
    let batch_id = seed_batch(&pool, 2).await;
    let students = seed_students(&pool, 2).await;

    let first = EnrollmentEngine::create(&pool, students[0], batch_id)
        .await
        .unwrap();
    let second = EnrollmentEngine::create(&pool, students[1], batch_id)
        .await
        .unwrap();

    let batch = BatchRepo::find_by_id(&pool, batch_id).await.unwrap().unwrap();
    assert_eq!(batch.current_enrolled, 2);

    EnrollmentEngine::cancel(&pool, first.id, students[0], "STUDENT")
        .await
        .unwrap();
    EnrollmentEngine::cancel(&pool, second.id, students[1], "STUDENT")
        .await
        .unwrap();

    let batch = BatchRepo::find_by_id(&pool, batch_id).await.unwrap().unwrap();
    assert_eq!(batch.current_enrolled, 0);
    assert_eq!(
        EnrollmentRepo::count_for_batch(&pool, batch_id).await.unwrap(),
        0
    );
}
