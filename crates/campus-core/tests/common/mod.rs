// Shared harness: a wiremock backend plus a session rooted in a temp dir.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_api::ApiClient;
use campus_core::{Session, SessionStorage};

pub async fn setup() -> (MockServer, Session, TempDir) {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/api", server.uri())).expect("mock server URL");
    let client = Arc::new(ApiClient::with_client(reqwest::Client::new(), base));
    let tmp = tempfile::tempdir().expect("tempdir");
    let session = Session::new(client, SessionStorage::new(tmp.path()));
    (server, session, tmp)
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "code": 200, "message": "ok", "data": data })
}

/// Mount a successful `/auth/login` returning the given roles on the user.
pub async fn mount_login(server: &MockServer, token: &str, roles: &[&str]) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "token": token,
            "refreshToken": format!("refresh-{token}"),
            "user": { "id": 1, "username": "zyz", "roles": roles },
        }))))
        .mount(server)
        .await;
}

/// Mount the role/permission lookups the session refresh hits.
pub async fn mount_roles(server: &MockServer, roles: &[&str], permissions: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/permission/my-roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!(roles))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/permission/my-permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!(permissions))))
        .mount(server)
        .await;
}

/// Log in with the given roles, with role lookups already mounted.
pub async fn login_as(server: &MockServer, session: &Session, roles: &[&str]) {
    mount_login(server, "test-token", roles).await;
    mount_roles(server, roles, &[]).await;
    session
        .login(&campus_api::models::LoginRequest {
            username: "zyz".into(),
            password: "pw".into(),
            captcha_key: None,
            captcha: None,
        })
        .await
        .expect("login should succeed");
}
