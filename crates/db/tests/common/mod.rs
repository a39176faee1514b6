//! Shared seed helpers for repository tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::PgPool;

use edupulse_db::models::batch::{Batch, CreateBatch};
use edupulse_db::models::course::{Course, CreateCourse};
use edupulse_db::models::user::{CreateUser, User};
use edupulse_db::repositories::{BatchRepo, CourseRepo, UserRepo};

pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            // Not a real hash; repository tests never verify passwords.
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_course(pool: &PgPool, title: &str) -> Course {
    CourseRepo::create(
        pool,
        &CreateCourse {
            title: title.to_string(),
            description: None,
            price_cents: Some(4_900),
        },
    )
    .await
    .unwrap()
}

/// Batch starting a week out so it shows up in availability listings.
pub async fn seed_batch(pool: &PgPool, course_id: i64, max_seats: i32) -> Batch {
    BatchRepo::create(
        pool,
        &CreateBatch {
            course_id,
            start_date: Utc::now() + Duration::days(7),
            max_seats,
        },
    )
    .await
    .unwrap()
}
