mod common;

use auth::SessionClaims;
use auth::SigningSecret;
use auth::TokenCodec;
use chrono::Utc;
use common::session_token;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/register")
        .json(&json!({
            "name": "Nicola",
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["name"], "Nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Nicola", "nicola@example.com", "pass_word!", None)
        .await;

    let response = app
        .post("/api/v1/register")
        .json(&json!({
            "name": "Other",
            "email": "nicola@example.com",
            "password": "another_one"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // The original password still works, so no second record replaced it
    let response = app.login("nicola@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/register")
        .json(&json!({
            "name": "Nicola",
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_unknown_role() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/register")
        .json(&json!({
            "name": "Nicola",
            "email": "nicola@example.com",
            "password": "pass_word!",
            "role": "guest"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::spawn().await;
    app.register("Nicola", "nicola@example.com", "pass_word!", None)
        .await;

    let response = app.login("nicola@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age="));

    let token = session_token(&response);
    let claims = app.token_codec.parse(&token).unwrap();
    assert_eq!(claims.sub, "nicola@example.com");
    assert_eq!(claims.role, "user");

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["expires_at"].is_string());
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let app = TestApp::spawn().await;
    app.register("Nicola", "nicola@example.com", "pass_word!", None)
        .await;

    let unknown = app.login("nobody@example.com", "pass_word!").await;
    let wrong = app.login("nicola@example.com", "wrong_password").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(unknown.headers().get(reqwest::header::SET_COOKIE).is_none());
    assert!(wrong.headers().get(reqwest::header::SET_COOKIE).is_none());

    let unknown: serde_json::Value = unknown.json().await.unwrap();
    let wrong: serde_json::Value = wrong.json().await.unwrap();
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_home_and_me_with_cookie() {
    let app = TestApp::spawn().await;
    app.register("Root", "root@example.com", "pass_word!", Some("admin"))
        .await;

    let response = app.login("root@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/v1/home").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["role"], "admin");

    let response = app.get("/api/v1/me").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Root");
    assert_eq!(body["data"]["email"], "root@example.com");
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"]["id"].is_i64());
}

#[tokio::test]
async fn test_bearer_header_fallback() {
    let app = TestApp::spawn().await;
    app.register("Nicola", "nicola@example.com", "pass_word!", None)
        .await;

    let token = session_token(&app.login("nicola@example.com", "pass_word!").await);

    // Separate client without the cookie jar entry
    let response = TestApp::client()
        .get(app.url("/api/v1/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::spawn().await;

    for path in ["/api/v1/home", "/api/v1/me"] {
        let response = app.get(path).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["data"]["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_denials_are_identical() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let missing = client.get(app.url("/api/v1/home")).send().await.unwrap();

    let garbage = client
        .get(app.url("/api/v1/home"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();

    let forged = TokenCodec::new(&SigningSecret::new("placeholder_key").unwrap())
        .issue("nicola@example.com", "admin", chrono::Duration::minutes(5))
        .unwrap()
        .token;
    let forged = client
        .get(app.url("/api/v1/home"))
        .bearer_auth(&forged)
        .send()
        .await
        .unwrap();

    let guest = app
        .token_codec
        .issue("nicola@example.com", "guest", chrono::Duration::minutes(5))
        .unwrap()
        .token;
    let guest = client
        .get(app.url("/api/v1/home"))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();

    let expired = app
        .token_codec
        .encode(&SessionClaims::new(
            "nicola@example.com",
            "user",
            Utc::now() - chrono::Duration::minutes(10),
            chrono::Duration::minutes(5),
        )
        .unwrap())
        .unwrap();
    let expired = client
        .get(app.url("/api/v1/home"))
        .bearer_auth(&expired)
        .send()
        .await
        .unwrap();

    let mut bodies = Vec::new();
    for response in [missing, garbage, forged, guest, expired] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(response.json::<serde_json::Value>().await.unwrap());
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_me_for_removed_user() {
    let app = TestApp::spawn().await;

    // Correctly signed token for a user that does not exist in the store
    let token = app
        .token_codec
        .issue("ghost@example.com", "user", chrono::Duration::minutes(5))
        .unwrap()
        .token;

    let response = app.get("/api/v1/me").bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_ends_cookie_session() {
    let app = TestApp::spawn().await;
    app.register("Nicola", "nicola@example.com", "pass_word!", None)
        .await;
    app.login("nicola@example.com", "pass_word!").await;

    let response = app.get("/api/v1/home").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/v1/logout").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));

    let response = app.get("/api/v1/home").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/v1/logout").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_expires() {
    let app = TestApp::spawn_with_ttl(chrono::Duration::seconds(2)).await;
    app.register("Nicola", "nicola@example.com", "pass_word!", None)
        .await;

    let token = session_token(&app.login("nicola@example.com", "pass_word!").await);
    let client = TestApp::client();

    let response = client
        .get(app.url("/api/v1/home"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_millis(3100)).await;

    let response = client
        .get(app.url("/api/v1/home"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
