//! Voting over HTTP: upvote, downvote, remove, and the duplicate-vote rule.

use serde_json::json;

use qaboard::domain::Question;
use qaboard::DocumentStore;

use crate::support::{spawn, TestApp};

async fn create_question(app: &TestApp, user_id: &str) -> String {
    let resp = app
        .client
        .post(format!("{}/questions", app.base))
        .header("x-user-id", user_id)
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

fn stored_question(app: &TestApp, id: &str) -> Question {
    app.store.get::<Question>(id).unwrap().unwrap()
}

#[tokio::test]
async fn upvote_records_the_caller() {
    let app = spawn().await;
    let author = app.seed_user("author");
    let id = create_question(&app, &author).await;

    let resp = app
        .client
        .post(format!("{}/questions/{id}/upvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "upvote recorded");

    let stored = stored_question(&app, &id);
    assert_eq!(stored.upvotes, vec!["voter".to_string()]);
    assert!(stored.downvotes.is_empty());
}

#[tokio::test]
async fn voting_requires_identity() {
    let app = spawn().await;
    let author = app.seed_user("author");
    let id = create_question(&app, &author).await;

    for op in ["upvote", "downvote", "removevote"] {
        let resp = app
            .client
            .post(format!("{}/questions/{id}/{op}", app.base))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 401, "{op} without identity");
    }
}

#[tokio::test]
async fn duplicate_upvote_is_rejected() {
    let app = spawn().await;
    let author = app.seed_user("author");
    let id = create_question(&app, &author).await;

    let first = app
        .client
        .post(format!("{}/questions/{id}/upvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    let second = app
        .client
        .post(format!("{}/questions/{id}/upvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 400);

    let body: serde_json::Value = second.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already upvoted"));

    // the vote itself stands, and the other side was never touched
    let stored = stored_question(&app, &id);
    assert_eq!(stored.upvotes, vec!["voter".to_string()]);
    assert!(stored.downvotes.is_empty());
}

#[tokio::test]
async fn switching_sides_moves_the_vote() {
    let app = spawn().await;
    let author = app.seed_user("author");
    let id = create_question(&app, &author).await;

    let resp = app
        .client
        .post(format!("{}/questions/{id}/upvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .post(format!("{}/questions/{id}/downvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // two entries changed: the pulled upvote and the new downvote
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["update"], 2);
    assert_eq!(body["message"], "downvote recorded");

    let stored = stored_question(&app, &id);
    assert!(stored.upvotes.is_empty());
    assert_eq!(stored.downvotes, vec!["voter".to_string()]);
}

#[tokio::test]
async fn fresh_downvote_changes_one_entry() {
    let app = spawn().await;
    let author = app.seed_user("author");
    let id = create_question(&app, &author).await;

    let resp = app
        .client
        .post(format!("{}/questions/{id}/downvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["update"], 1);
}

#[tokio::test]
async fn remove_vote_clears_and_tolerates_absence() {
    let app = spawn().await;
    let author = app.seed_user("author");
    let id = create_question(&app, &author).await;

    let resp = app
        .client
        .post(format!("{}/questions/{id}/upvote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .post(format!("{}/questions/{id}/removevote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["update"], 1);
    assert_eq!(body["message"], "vote removed");

    let stored = stored_question(&app, &id);
    assert!(stored.upvotes.is_empty());
    assert!(stored.downvotes.is_empty());

    // removing a vote that was never cast still succeeds
    let resp = app
        .client
        .post(format!("{}/questions/{id}/removevote", app.base))
        .header("x-user-id", "voter")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["update"], 0);
}

#[tokio::test]
async fn voting_on_missing_question_returns_404() {
    let app = spawn().await;

    for op in ["upvote", "downvote", "removevote"] {
        let resp = app
            .client
            .post(format!("{}/questions/nope/{op}", app.base))
            .header("x-user-id", "voter")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404, "{op} on missing question");
    }
}
