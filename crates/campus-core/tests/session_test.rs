// Session lifecycle tests against a mock backend.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use campus_core::SessionStorage;

use common::{login_as, mount_login, mount_roles, setup};

#[tokio::test]
async fn login_installs_and_persists_session() {
    let (server, session, tmp) = setup().await;
    mount_login(&server, "tok-1", &["student"]).await;
    mount_roles(&server, &["student"], &["course:enroll"]).await;

    let user = session
        .login(&campus_api::models::LoginRequest {
            username: "zyz".into(),
            password: "pw".into(),
            captcha_key: None,
            captcha: None,
        })
        .await
        .expect("login should succeed");

    assert_eq!(user.username, "zyz");
    assert!(session.is_logged_in());
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-tok-1"));
    assert_eq!(session.roles(), vec!["student"]);
    assert_eq!(session.permissions(), vec!["course:enroll"]);
    assert!(session.roles_fetched());
    assert!(session.has_role("student"));
    assert!(session.has_permission("course:enroll"));
    assert!(!session.has_role("admin"));

    // the token slot on the shared client is populated too
    assert_eq!(session.client().token().as_deref(), Some("tok-1"));

    // a fresh store over the same directory sees the persisted triplet
    let storage = SessionStorage::new(tmp.path());
    assert_eq!(storage.token().expect("read").as_deref(), Some("tok-1"));
    assert_eq!(
        storage.refresh_token().expect("read").as_deref(),
        Some("refresh-tok-1")
    );
    assert_eq!(
        storage.user().expect("read").expect("present").username,
        "zyz"
    );
}

#[tokio::test]
async fn failed_login_leaves_session_empty() {
    let (server, session, _tmp) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 400, "message": "bad credentials", "data": null
        })))
        .mount(&server)
        .await;

    let err = session
        .login(&campus_api::models::LoginRequest {
            username: "zyz".into(),
            password: "wrong".into(),
            captcha_key: None,
            captcha: None,
        })
        .await
        .expect_err("login should fail");

    assert_eq!(err.user_message(), "bad credentials");
    assert!(!session.is_logged_in());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn logout_clears_even_when_network_call_fails() {
    let (server, session, tmp) = setup().await;
    login_as(&server, &session, &["student"]).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    session.logout().await.expect("logout should succeed");

    assert!(!session.is_logged_in());
    assert!(session.token().is_none());
    assert!(session.current_user().is_none());
    assert!(session.roles().is_empty());
    assert!(session.permissions().is_empty());
    assert!(!session.roles_fetched());
    assert!(session.client().token().is_none());

    let storage = SessionStorage::new(tmp.path());
    assert!(storage.token().expect("read").is_none());
    assert!(storage.user().expect("read").is_none());
}

#[tokio::test]
async fn restore_hydrates_and_refreshes_in_background() {
    let (server, session, tmp) = setup().await;
    mount_roles(&server, &["teacher"], &["student:edit"]).await;

    let storage = SessionStorage::new(tmp.path());
    storage.set_token("restored-token").expect("write");
    storage.set_refresh_token("restored-refresh").expect("write");

    assert!(session.restore().expect("restore should succeed"));
    assert!(session.is_logged_in());
    assert_eq!(session.token().as_deref(), Some("restored-token"));
    assert_eq!(session.client().token().as_deref(), Some("restored-token"));

    // the role refresh runs in the background; wait for it to land
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !session.roles_fetched() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "background refresh never completed"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(session.roles(), vec!["teacher"]);
    assert_eq!(session.permissions(), vec!["student:edit"]);
}

#[tokio::test]
async fn restore_without_stored_token_is_a_noop() {
    let (_server, session, _tmp) = setup().await;
    assert!(!session.restore().expect("restore should succeed"));
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_roles() {
    let (server, session, _tmp) = setup().await;
    login_as(&server, &session, &["student"]).await;
    assert_eq!(session.roles(), vec!["student"]);

    // drop the role mocks so the next refresh fails
    server.reset().await;
    session.fetch_roles_and_permissions().await;

    assert!(session.is_logged_in());
    assert_eq!(session.roles(), vec!["student"]);
}

#[tokio::test]
async fn fetch_current_user_overwrites_memory_and_storage() {
    let (server, session, tmp) = setup().await;
    login_as(&server, &session, &["student"]).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "message": "ok",
            "data": { "id": 1, "username": "zyz", "email": "zyz@example.edu", "roles": ["student"] }
        })))
        .mount(&server)
        .await;

    let user = session
        .fetch_current_user()
        .await
        .expect("fetch should succeed")
        .expect("logged in");
    assert_eq!(user.email.as_deref(), Some("zyz@example.edu"));
    assert_eq!(
        session.current_user().expect("present").email.as_deref(),
        Some("zyz@example.edu")
    );

    let storage = SessionStorage::new(tmp.path());
    assert_eq!(
        storage
            .user()
            .expect("read")
            .expect("present")
            .email
            .as_deref(),
        Some("zyz@example.edu")
    );
}

#[tokio::test]
async fn fetch_current_user_is_noop_when_logged_out() {
    let (_server, session, _tmp) = setup().await;
    let user = session
        .fetch_current_user()
        .await
        .expect("fetch should succeed");
    assert!(user.is_none());
}
