mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{empty, json, request, with_session, with_token, TestApp, PASSWORD};

#[tokio::test]
async fn register_with_full_fields() {
    let app = TestApp::new().await;

    let resp = app
        .send(json(
            request(Method::POST, "/users/"),
            json!({
                "username": "TestUser",
                "password": 12345,
                "email": "test@example.com",
                "first_name": "Test",
                "last_name": "User"
            }),
        ))
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["username"], json!("TestUser"));
    assert!(body.get("password").is_none());

    let user = app
        .state
        .user_service
        .get_user_by_username("TestUser")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.first_name, "Test");
    assert_eq!(user.last_name, "User");
    assert!(!user.is_staff);
    assert_ne!(user.password_hash, "12345");
    assert_eq!(body["id"], json!(user.id));
}

#[tokio::test]
async fn register_defaults_optional_fields() {
    let app = TestApp::new().await;

    let resp = app
        .send(json(
            request(Method::POST, "/users/"),
            json!({"username": "minimal", "password": "pw"}),
        ))
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(
        resp.json(),
        json!({"id": 1, "username": "minimal", "email": "", "first_name": "", "last_name": ""})
    );
}

#[tokio::test]
async fn register_without_username_or_password_creates_nothing() {
    let app = TestApp::new().await;

    for body in [
        json!({"password": 12345, "email": "a@example.com"}),
        json!({"username": "TestUser", "email": "a@example.com"}),
        json!({}),
    ] {
        let resp = app.send(json(request(Method::POST, "/users/"), body.clone())).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(resp.json()["success"], json!(false));
    }

    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn register_rejects_malformed_fields_and_duplicates() {
    let app = TestApp::new().await;
    app.create_user("taken").await;

    let cases = [
        json!({"username": "bad name", "password": "pw"}),
        json!({"username": "ok", "password": "pw", "email": "nope"}),
        json!({"username": "taken", "password": "pw"}),
        json!({"username": true, "password": "pw"}),
    ];
    for body in cases {
        let resp = app.send(json(request(Method::POST, "/users/"), body.clone())).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{body}");
    }

    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn users_collection_only_allows_post() {
    let app = TestApp::new().await;

    let resp = app.send(empty(request(Method::GET, "/users/"))).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.json()["error"], json!("Method not allowed."));
    assert!(resp.headers[header::ALLOW].to_str().unwrap().contains("POST"));

    let resp = app
        .send(json(
            request(Method::GET, "/users/"),
            json!({"username": "TestUser", "password": PASSWORD}),
        ))
        .await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);

    for method in [Method::PUT, Method::DELETE] {
        let resp = app.send(empty(request(method, "/users/"))).await;
        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

#[tokio::test]
async fn login_returns_token_and_session() {
    let app = TestApp::new().await;
    let user = app.create_user("TestUser").await;
    let expected_token = app.token_for(&user).await;

    let resp = app
        .send(json(
            request(Method::POST, "/users/login/"),
            json!({"username": "TestUser", "password": 12345}),
        ))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["token"], json!(expected_token));
    assert_eq!(body["token_type"], json!("Token"));
    assert_eq!(body["user"]["username"], json!("TestUser"));
    assert_eq!(body["user"]["is_staff"], json!(false));

    let cookie = resp.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert_eq!(resp.session_cookie().unwrap().len(), 64);

    let user = app
        .state
        .user_service
        .get_user_by_username("TestUser")
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login.is_some());
}

#[tokio::test]
async fn float_password_logs_in_with_its_text_form() {
    let app = TestApp::new().await;

    let resp = app
        .send(json(
            request(Method::POST, "/users/"),
            json!({"username": "floaty", "password": 1.0}),
        ))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let login = |password: serde_json::Value| {
        json(
            request(Method::POST, "/users/login/"),
            json!({"username": "floaty", "password": password}),
        )
    };
    assert_eq!(app.send(login(json!("1.0"))).await.status, StatusCode::OK);
    assert_eq!(app.send(login(json!(1.0))).await.status, StatusCode::OK);
    assert_eq!(app.send(login(json!("1"))).await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_are_uniform_400() {
    let app = TestApp::new().await;
    app.create_user("TestUser").await;

    let cases = [
        json!({"username": "TestUser", "password": "wrong"}),
        json!({"username": "nobody", "password": PASSWORD}),
        json!({"username": "TestUser"}),
        json!({"password": PASSWORD}),
    ];
    for body in cases {
        let resp = app.send(json(request(Method::POST, "/users/login/"), body.clone())).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{body}");
        assert!(resp.session_cookie().is_none());
    }
}

#[tokio::test]
async fn token_from_login_authorizes_listing() {
    let app = TestApp::new().await;
    app.create_user("TestUser").await;

    let login = app
        .send(json(
            request(Method::POST, "/users/login/"),
            json!({"username": "TestUser", "password": PASSWORD}),
        ))
        .await;
    let token = login.json()["token"].as_str().unwrap().to_string();

    let resp = app.send(empty(with_token(request(Method::GET, "/courses/"), &token))).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_ends_session() {
    let app = TestApp::new().await;
    app.create_user("TestUser").await;
    let course = app.create_course("Python", 100, 30).await;
    let uri = format!("/courses/signup/{}/", course.id);

    let login = app
        .send(json(
            request(Method::POST, "/users/login/"),
            json!({"username": "TestUser", "password": PASSWORD}),
        ))
        .await;
    let session = login.session_cookie().unwrap();

    let resp = app.send(empty(with_session(request(Method::PATCH, &uri), &session))).await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app
        .send(empty(with_session(request(Method::POST, "/users/logout/"), &session)))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(resp.headers[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let resp = app.send(empty(with_session(request(Method::PATCH, &uri), &session))).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_is_still_204() {
    let app = TestApp::new().await;
    let resp = app.send(empty(request(Method::POST, "/users/logout/"))).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;
    let resp = app.send(empty(request(Method::GET, "/health"))).await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["database"]["reachable"], json!(true));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let resp = app.send(empty(request(Method::GET, "/nope/"))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["success"], json!(false));
}
