//! Integration tests for questions, tags, views, and profiles.

use sqlx::PgPool;
use quanda_db::models::profile::UpdateProfile;
use quanda_db::models::question::{CreateQuestion, UpdateQuestion};
use quanda_db::models::user::CreateUser;
use quanda_db::repositories::{
    ProfileRepo, QuestionRepo, QuestionViewRepo, TagRepo, UserRepo, VoteRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_question(title: &str, tag_ids: Vec<i64>) -> CreateQuestion {
    CreateQuestion {
        title: title.to_string(),
        body: "body".to_string(),
        tag_ids,
    }
}

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Questions and tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_tags_and_find_related(pool: PgPool) {
    let rust = TagRepo::create(&pool, "rust").await.unwrap();
    let sql = TagRepo::create(&pool, "sql").await.unwrap();

    let q1 = QuestionRepo::create(&pool, None, &new_question("Q1", vec![rust.id]))
        .await
        .unwrap();
    let q2 = QuestionRepo::create(&pool, None, &new_question("Q2", vec![rust.id, sql.id]))
        .await
        .unwrap();
    let q3 = QuestionRepo::create(&pool, None, &new_question("Q3", vec![sql.id]))
        .await
        .unwrap();

    let tags = TagRepo::list_for_question(&pool, q2.id).await.unwrap();
    let titles: Vec<&str> = tags.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["rust", "sql"]);

    let related = QuestionRepo::list_related(&pool, q1.id).await.unwrap();
    let ids: Vec<i64> = related.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![q2.id]);

    let related = QuestionRepo::list_related(&pool, q2.id).await.unwrap();
    assert_eq!(related.len(), 2);
    assert!(related.iter().all(|q| q.id != q2.id));

    let by_tag = QuestionRepo::list_by_tag(&pool, sql.id).await.unwrap();
    let ids: Vec<i64> = by_tag.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![q3.id, q2.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_tags_only_when_given(pool: PgPool) {
    let rust = TagRepo::create(&pool, "rust").await.unwrap();
    let sql = TagRepo::create(&pool, "sql").await.unwrap();
    let q = QuestionRepo::create(&pool, None, &new_question("Q", vec![rust.id]))
        .await
        .unwrap();

    let untouched = UpdateQuestion {
        title: Some("Renamed".to_string()),
        body: None,
        tag_ids: None,
    };
    let updated = QuestionRepo::update(&pool, q.id, &untouched).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.body, "body");
    assert_eq!(TagRepo::list_for_question(&pool, q.id).await.unwrap().len(), 1);

    let retag = UpdateQuestion {
        title: None,
        body: None,
        tag_ids: Some(vec![sql.id]),
    };
    QuestionRepo::update(&pool, q.id, &retag).await.unwrap();
    let tags = TagRepo::list_for_question(&pool, q.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, sql.id);

    assert!(QuestionRepo::update(&pool, 9_999, &retag).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn top_questions_ordered_by_score(pool: PgPool) {
    let voter = new_user(&pool, "voter").await;
    let quiet = QuestionRepo::create(&pool, None, &new_question("Quiet", vec![]))
        .await
        .unwrap();
    let popular = QuestionRepo::create(&pool, None, &new_question("Popular", vec![]))
        .await
        .unwrap();
    let disliked = QuestionRepo::create(&pool, None, &new_question("Disliked", vec![]))
        .await
        .unwrap();

    VoteRepo::upsert_question_vote(&pool, voter, popular.id, 1).await.unwrap();
    VoteRepo::upsert_question_vote(&pool, voter, disliked.id, -1).await.unwrap();

    let top = QuestionRepo::list_top(&pool, Some(5)).await.unwrap();
    let ids: Vec<i64> = top.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![popular.id, quiet.id, disliked.id]);
    assert_eq!(top[0].score, 1);
    assert_eq!(top[2].score, -1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_questions_paginate(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..3 {
        let q = QuestionRepo::create(&pool, None, &new_question(&format!("Q{i}"), vec![]))
            .await
            .unwrap();
        ids.push(q.id);
    }

    let first = QuestionRepo::list_recent(&pool, Some(2), None).await.unwrap();
    let second = QuestionRepo::list_recent(&pool, Some(2), Some(2)).await.unwrap();
    assert_eq!(first.iter().map(|q| q.id).collect::<Vec<_>>(), vec![ids[2], ids[1]]);
    assert_eq!(second.iter().map(|q| q.id).collect::<Vec<_>>(), vec![ids[0]]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_tag_unlinks_questions(pool: PgPool) {
    let tag = TagRepo::create(&pool, "obsolete").await.unwrap();
    let q = QuestionRepo::create(&pool, None, &new_question("Q", vec![tag.id]))
        .await
        .unwrap();

    assert!(TagRepo::delete(&pool, tag.id).await.unwrap());
    assert!(!TagRepo::delete(&pool, tag.id).await.unwrap());
    assert!(TagRepo::list_for_question(&pool, q.id).await.unwrap().is_empty());
    assert!(QuestionRepo::find_by_id(&pool, q.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn views_deduplicate_per_session(pool: PgPool) {
    let q = QuestionRepo::create(&pool, None, &new_question("Q", vec![]))
        .await
        .unwrap();

    assert!(QuestionViewRepo::record(&pool, q.id, "aaa").await.unwrap());
    assert!(!QuestionViewRepo::record(&pool, q.id, "aaa").await.unwrap());
    assert!(QuestionViewRepo::record(&pool, q.id, "bbb").await.unwrap());

    assert_eq!(QuestionViewRepo::count(&pool, q.id).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_profile_is_idempotent(pool: PgPool) {
    let user = new_user(&pool, "someone").await;

    let first = ProfileRepo::ensure(&pool, user).await.unwrap();
    let second = ProfileRepo::ensure(&pool, user).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.reputation, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_creates_profile_for_external_user(pool: PgPool) {
    let (user_id,): (i64,) =
        sqlx::query_as("INSERT INTO users (username) VALUES ('external') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    let profile = ProfileRepo::ensure(&pool, user_id).await.unwrap();
    assert_eq!(profile.user_id, user_id);
    assert_eq!(profile.reputation, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_applies_only_given_fields(pool: PgPool) {
    let user = new_user(&pool, "someone").await;

    ProfileRepo::update(
        &pool,
        user,
        &UpdateProfile {
            bio: Some("Rustacean".to_string()),
            website: None,
            location: Some("Berlin".to_string()),
        },
    )
    .await
    .unwrap();
    let profile = ProfileRepo::update(
        &pool,
        user,
        &UpdateProfile {
            bio: None,
            website: Some("https://example.com".to_string()),
            location: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(profile.bio, "Rustacean");
    assert_eq!(profile.location, "Berlin");
    assert_eq!(profile.website, "https://example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_violates_unique(pool: PgPool) {
    new_user(&pool, "dup").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "dup".to_string(),
            role: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_users_username")
    );
}
