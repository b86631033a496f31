//! Integration tests for answers: scored listing and choosing.

use sqlx::PgPool;
use quanda_core::ranking::rank_answers;
use quanda_db::models::question::CreateQuestion;
use quanda_db::models::user::CreateUser;
use quanda_db::repositories::{AnswerRepo, QuestionRepo, UserRepo, VoteRepo};

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

async fn new_question(pool: &PgPool, author_id: i64) -> i64 {
    QuestionRepo::create(
        pool,
        Some(author_id),
        &CreateQuestion {
            title: "Why is the borrow checker angry?".to_string(),
            body: String::new(),
            tag_ids: Vec::new(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn choosing_replaces_previous_choice(pool: PgPool) {
    let asker = new_user(&pool, "asker").await;
    let first = new_user(&pool, "first").await;
    let second = new_user(&pool, "second").await;
    let question = new_question(&pool, asker).await;

    let a = AnswerRepo::create(&pool, question, Some(first), "A").await.unwrap();
    let b = AnswerRepo::create(&pool, question, Some(second), "B").await.unwrap();

    AnswerRepo::choose(&pool, question, a.id).await.unwrap();
    let chosen = AnswerRepo::choose(&pool, question, b.id).await.unwrap();
    assert!(chosen.user_chosen);

    let answers = AnswerRepo::list_for_question(&pool, question).await.unwrap();
    let chosen_ids: Vec<i64> = answers.iter().filter(|a| a.user_chosen).map(|a| a.id).collect();
    assert_eq!(chosen_ids, vec![b.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn choosing_same_answer_twice_is_idempotent(pool: PgPool) {
    let asker = new_user(&pool, "asker").await;
    let helper = new_user(&pool, "helper").await;
    let question = new_question(&pool, asker).await;
    let a = AnswerRepo::create(&pool, question, Some(helper), "A").await.unwrap();

    AnswerRepo::choose(&pool, question, a.id).await.unwrap();
    let again = AnswerRepo::choose(&pool, question, a.id).await.unwrap();
    assert!(again.user_chosen);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listed_answers_carry_scores_and_rank(pool: PgPool) {
    let asker = new_user(&pool, "asker").await;
    let low = new_user(&pool, "low").await;
    let high = new_user(&pool, "high").await;
    let voter = new_user(&pool, "voter").await;
    let question = new_question(&pool, asker).await;

    let weak = AnswerRepo::create(&pool, question, Some(low), "Weak").await.unwrap();
    let strong = AnswerRepo::create(&pool, question, Some(high), "Strong").await.unwrap();
    VoteRepo::upsert_answer_vote(&pool, voter, strong.id, 1).await.unwrap();

    let answers = AnswerRepo::list_for_question(&pool, question).await.unwrap();
    let votes = VoteRepo::answer_votes_of(&pool, voter, question).await.unwrap();
    let ranked = rank_answers(answers, Some(voter), &votes);

    let ids: Vec<i64> = ranked.answers.iter().map(|v| v.answer.id).collect();
    assert_eq!(ids, vec![strong.id, weak.id]);
    assert_eq!(ranked.answers[0].answer.score, 1);
    assert_eq!(ranked.answers[0].user_prev_vote, 1);
    assert!(!ranked.user_has_answered);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn has_answered_tracks_authorship(pool: PgPool) {
    let asker = new_user(&pool, "asker").await;
    let helper = new_user(&pool, "helper").await;
    let question = new_question(&pool, asker).await;

    assert!(!AnswerRepo::has_answered(&pool, question, helper).await.unwrap());
    AnswerRepo::create(&pool, question, Some(helper), "A").await.unwrap();
    assert!(AnswerRepo::has_answered(&pool, question, helper).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_answers_have_no_author(pool: PgPool) {
    let asker = new_user(&pool, "asker").await;
    let question = new_question(&pool, asker).await;

    let answer = AnswerRepo::create(&pool, question, None, "drive-by").await.unwrap();
    assert_eq!(answer.author_id, None);
    assert!(!AnswerRepo::has_answered(&pool, question, asker).await.unwrap());

    let listed = AnswerRepo::list_for_question(&pool, question).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn answers_to_my_questions_newest_first(pool: PgPool) {
    let asker = new_user(&pool, "asker").await;
    let helper = new_user(&pool, "helper").await;
    let other = new_user(&pool, "other").await;
    let mine = new_question(&pool, asker).await;
    let theirs = new_question(&pool, other).await;

    let older = AnswerRepo::create(&pool, mine, Some(helper), "older").await.unwrap();
    let newer = AnswerRepo::create(&pool, mine, Some(other), "newer").await.unwrap();
    AnswerRepo::create(&pool, theirs, Some(helper), "elsewhere").await.unwrap();

    let answers = AnswerRepo::list_for_questions_by(&pool, asker, 10).await.unwrap();
    let ids: Vec<i64> = answers.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}
