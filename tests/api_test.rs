//! Integration tests for the HTTP API.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::util::ServiceExt; // for `oneshot` method

use common::{game_service, score_service, setup_seeded_db, user};
use pajelingo::{AppState, USER_ID_HEADER, build_router};

/// Test helper: Create app over a seeded database, returning a registered user id
fn setup_app() -> (NamedTempFile, axum::Router, i32) {
    let (db, repo) = setup_seeded_db();
    let alice = *user(&repo, "alice").id();
    let state = AppState::new(game_service(&repo), score_service(&repo));
    (db, build_router(state), alice)
}

fn get(uri: &str, user_id: Option<i32>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }
    builder.body(Body::empty()).expect("Request build failed")
}

fn post(uri: &str, user_id: Option<i32>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Request build failed")
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_db, app, _) = setup_app();
    let response = app.oneshot(get("/health", None)).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_games_catalog() {
    let (_db, app, _) = setup_app();
    let response = app.oneshot(get("/api/games", None)).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(body[1]["tag"], "article");
}

#[tokio::test]
async fn test_article_round_over_http() {
    let (_db, app, alice) = setup_app();

    let response = app
        .clone()
        .oneshot(get("/api/article-game?language=German", Some(alice)))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let challenge = extract_json(response.into_body()).await;
    assert_eq!(challenge["word"], "Hund");
    assert!(challenge.get("answer").is_none());
    assert!(challenge.get("tense").is_none());

    let answer = json!({ "word_id": challenge["id"], "answer": "der" });
    let response = app
        .clone()
        .oneshot(post("/api/article-game", Some(alice), answer.clone()))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = extract_json(response.into_body()).await;
    assert_eq!(outcome["result"], true);
    assert_eq!(outcome["correct_answer"], "der Hund");
    assert_eq!(outcome["score"], 1);
    assert_eq!(outcome["new_badges"][0]["name"], "Explorer");
    assert_eq!(outcome["new_badges"][0]["color"], "2E86C1");

    let response = app
        .oneshot(post("/api/article-game", Some(alice), answer))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "SESSION_ERROR");
}

#[tokio::test]
async fn test_anonymous_verify_returns_null_score() {
    let (_db, app, _) = setup_app();
    let response = app
        .clone()
        .oneshot(get(
            "/api/vocabulary-game?base_language=English&target_language=Portuguese",
            None,
        ))
        .await
        .expect("Request failed");
    let challenge = extract_json(response.into_body()).await;
    assert_eq!(challenge["base_language"], "English");

    let answer = json!({
        "word_id": challenge["id"],
        "base_language": "English",
        "answer": "big, large",
    });
    let response = app
        .oneshot(post("/api/vocabulary-game", None, answer))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = extract_json(response.into_body()).await;
    assert_eq!(outcome["result"], true);
    assert!(outcome["score"].is_null());
    assert_eq!(outcome["new_badges"], json!([]));
}

#[tokio::test]
async fn test_error_statuses() {
    let (_db, app, alice) = setup_app();

    let cases = [
        (get("/api/article-game?language=English", None), StatusCode::BAD_REQUEST),
        (get("/api/article-game?language=Esperanto", None), StatusCode::NOT_FOUND),
        (get("/api/article-game", None), StatusCode::BAD_REQUEST),
        (get("/api/article-game?language=", None), StatusCode::BAD_REQUEST),
        (get("/api/conjugation-game?language=%20", None), StatusCode::BAD_REQUEST),
        (
            get("/api/vocabulary-game?base_language=English&target_language=", None),
            StatusCode::BAD_REQUEST,
        ),
        (get("/api/conjugation-game?language=English", None), StatusCode::NOT_FOUND),
        (
            get("/api/vocabulary-game?base_language=German&target_language=German", None),
            StatusCode::BAD_REQUEST,
        ),
        (get("/api/scores", None), StatusCode::UNAUTHORIZED),
        (get("/api/badges", None), StatusCode::UNAUTHORIZED),
        (get("/api/scores", Some(alice + 100)), StatusCode::UNAUTHORIZED),
        (
            post("/api/conjugation-game", Some(alice), json!({ "word_id": 1 })),
            StatusCode::BAD_REQUEST,
        ),
    ];
    for (request, expected) in cases {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.expect("Request failed");
        assert_eq!(response.status(), expected, "{}", uri);
        let body = extract_json(response.into_body()).await;
        assert!(body["error"]["message"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_malformed_user_header() {
    let (_db, app, _) = setup_app();
    let request = Request::builder()
        .uri("/api/rankings")
        .header(USER_ID_HEADER, "alice")
        .body(Body::empty())
        .expect("Request build failed");
    let response = app.oneshot(request).await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_score_and_list() {
    let (_db, app, alice) = setup_app();
    let request = json!({ "language": "German", "game": "conjugation" });

    let response = app
        .clone()
        .oneshot(post("/api/scores", Some(alice), request.clone()))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json(response.into_body()).await;
    assert_eq!(created["score"], 1);
    assert_eq!(created["game_id"], 3);

    let response = app
        .clone()
        .oneshot(post("/api/scores", Some(alice), request))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(get("/api/scores?game=conjugation", Some(alice)))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = extract_json(response.into_body()).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let response = app
        .oneshot(get("/api/rankings?language=German", Some(alice)))
        .await
        .expect("Request failed");
    let board = extract_json(response.into_body()).await;
    assert_eq!(board["entries"][0]["user"], "alice");
    assert_eq!(board["user_entry"]["position"], 1);
}

#[tokio::test]
async fn test_create_score_ignores_client_score() {
    let (_db, app, alice) = setup_app();
    let request = json!({ "language": "German", "game": "article", "score": 99 });

    let response = app
        .clone()
        .oneshot(post("/api/scores", Some(alice), request))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(extract_json(response.into_body()).await["score"], 1);

    let response = app
        .oneshot(get("/api/scores?game=article", Some(alice)))
        .await
        .expect("Request failed");
    let listed = extract_json(response.into_body()).await;
    assert_eq!(listed[0]["score"], 1);
}

#[tokio::test]
async fn test_badges_listing() {
    let (_db, app, alice) = setup_app();
    let response = app
        .clone()
        .oneshot(get("/api/badges", Some(alice)))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!([]));

    let challenge = extract_json(
        app.clone()
            .oneshot(get("/api/article-game?language=German", Some(alice)))
            .await
            .expect("Request failed")
            .into_body(),
    )
    .await;
    app.clone()
        .oneshot(post(
            "/api/article-game",
            Some(alice),
            json!({ "word_id": challenge["id"], "answer": "der" }),
        ))
        .await
        .expect("Request failed");

    let response = app
        .oneshot(get("/api/badges", Some(alice)))
        .await
        .expect("Request failed");
    let badges = extract_json(response.into_body()).await;
    assert_eq!(badges[0]["id"], 1);
    assert_eq!(badges[0]["description"], "Scored your first points in a Pajelingo game.");
}
