//! Course and batch endpoint tests: public reads, role-gated writes, and the
//! capacity floor on batch updates.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    build_test_app, delete, get, patch_json, post_json, register_and_login, seed_course_and_batch,
};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_writes_are_role_gated(pool: PgPool) {
    let app = build_test_app(pool);

    let student = register_and_login(&app, "alice@example.com", "STUDENT").await;
    let instructor = register_and_login(&app, "teach@example.com", "INSTRUCTOR").await;
    let admin = register_and_login(&app, "admin@example.com", "ADMIN").await;

    let payload = json!({ "title": "Databases", "price_cents": 5000 });

    // Anonymous and student writes are rejected.
    let (status, _) = post_json(&app, "/api/v1/courses", None, payload.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = post_json(&app, "/api/v1/courses", Some(&student), payload.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, course) = post_json(&app, "/api/v1/courses", Some(&instructor), payload).await;
    assert_eq!(status, StatusCode::CREATED);
    let course_id = course["id"].as_i64().unwrap();

    // Reads are public.
    let (status, listing) = get(&app, "/api/v1/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 1);

    // Deletion is admin-only.
    let (status, _) = delete(&app, &format!("/api/v1/courses/{course_id}"), Some(&instructor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = delete(&app, &format!("/api/v1/courses/{course_id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/api/v1/courses/{course_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_partial_update(pool: PgPool) {
    let app = build_test_app(pool);
    let instructor = register_and_login(&app, "teach@example.com", "INSTRUCTOR").await;

    let (status, course) = post_json(
        &app,
        "/api/v1/courses",
        Some(&instructor),
        json!({ "title": "Databases", "description": "Relational systems", "price_cents": 5000 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let course_id = course["id"].as_i64().unwrap();

    let (status, updated) = patch_json(
        &app,
        &format!("/api/v1/courses/{course_id}"),
        Some(&instructor),
        json!({ "price_cents": 4500 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price_cents"], 4500);
    assert_eq!(updated["title"], "Databases");
    assert_eq!(updated["description"], "Relational systems");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_create_validation(pool: PgPool) {
    let app = build_test_app(pool);
    let instructor = register_and_login(&app, "teach@example.com", "INSTRUCTOR").await;

    // Unknown course is a 404, not a raw FK violation.
    let (status, body) = post_json(
        &app,
        "/api/v1/batches",
        Some(&instructor),
        json!({ "course_id": 999999, "start_date": "2027-01-15T10:00:00Z", "max_seats": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (course_id, _) = seed_course_and_batch(&app, &instructor, 10).await;

    // Zero capacity makes no sense.
    let (status, _) = post_json(
        &app,
        "/api/v1/batches",
        Some(&instructor),
        json!({ "course_id": course_id, "start_date": "2027-01-15T10:00:00Z", "max_seats": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_listing_filter(pool: PgPool) {
    let app = build_test_app(pool);
    let instructor = register_and_login(&app, "teach@example.com", "INSTRUCTOR").await;

    let (course_a, _) = seed_course_and_batch(&app, &instructor, 10).await;
    let (_course_b, _) = seed_course_and_batch(&app, &instructor, 10).await;

    let (status, all) = get(&app, "/api/v1/batches", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, filtered) = get(&app, &format!("/api/v1/batches?course_id={course_a}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["course_id"], course_a);
    // Listings carry the joined course summary.
    assert!(filtered[0]["course_title"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_available_excludes_full_batches(pool: PgPool) {
    let app = build_test_app(pool);
    let instructor = register_and_login(&app, "teach@example.com", "INSTRUCTOR").await;
    let student = register_and_login(&app, "alice@example.com", "STUDENT").await;

    let (_, full_batch) = seed_course_and_batch(&app, &instructor, 1).await;
    let (_, open_batch) = seed_course_and_batch(&app, &instructor, 5).await;

    let (status, _) = post_json(
        &app,
        "/api/v1/enrollments",
        Some(&student),
        json!({ "batch_id": full_batch }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, available) = get(&app, "/api/v1/batches/available", None).await;
    assert_eq!(status, StatusCode::OK);
    let available = available.as_array().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0]["id"], open_batch);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_shrink_below_occupancy_conflicts(pool: PgPool) {
    let app = build_test_app(pool);
    let instructor = register_and_login(&app, "teach@example.com", "INSTRUCTOR").await;
    let (_, batch_id) = seed_course_and_batch(&app, &instructor, 5).await;

    for i in 0..3 {
        let student = register_and_login(&app, &format!("s{i}@example.com"), "STUDENT").await;
        let (status, _) = post_json(
            &app,
            "/api/v1/enrollments",
            Some(&student),
            json!({ "batch_id": batch_id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = patch_json(
        &app,
        &format!("/api/v1/batches/{batch_id}"),
        Some(&instructor),
        json!({ "max_seats": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CAPACITY_BELOW_ENROLLED");

    // Shrinking to exactly the occupancy succeeds and closes the batch.
    let (status, updated) = patch_json(
        &app,
        &format!("/api/v1/batches/{batch_id}"),
        Some(&instructor),
        json!({ "max_seats": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["max_seats"], 3);
    assert_eq!(updated["current_enrolled"], 3);
}
