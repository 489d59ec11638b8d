use ghg_client::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_success_installs_the_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "secret1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful.",
            "auth_token": "tok123",
            "user": {
                "id": 1,
                "username": "alice",
                "email": "a@b.com"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = GhgClient::new(&mock_server.uri());
    let outcome = client.auth().login("a@b.com", "secret1").await;

    assert!(outcome.is_signed_in());
    match outcome {
        AuthOutcome::SignedIn { user } => {
            let user = user.unwrap();
            assert_eq!(user.id, 1);
            assert_eq!(user.username.as_deref(), Some("alice"));
        }
        other => panic!("expected SignedIn, got {:?}", other),
    }

    let session = client.session();
    assert_eq!(session.token(), Some("tok123".to_string()));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn login_rejection_leaves_no_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password."
        })))
        .mount(&mock_server)
        .await;

    let client = GhgClient::new(&mock_server.uri());
    let outcome = client.auth().login("bad@x.com", "wrong").await;

    assert!(!outcome.is_signed_in());
    match outcome {
        AuthOutcome::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Invalid email or password."));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }

    assert!(!client.session().is_authenticated());
    assert_eq!(client.session().token(), None);
}

#[tokio::test]
async fn register_signs_the_new_user_straight_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "bob",
            "email": "bob@corp.com",
            "password": "hunter22",
            "company_name": "Corp Ltd",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "User registered successfully.",
            "auth_token": "fresh-token",
            "user": {
                "id": 7,
                "username": "bob",
                "email": "bob@corp.com"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = GhgClient::new(&mock_server.uri());
    let outcome = client
        .auth()
        .register("bob", "bob@corp.com", "hunter22", "Corp Ltd")
        .await;

    assert!(outcome.is_signed_in());
    assert_eq!(client.session().token(), Some("fresh-token".to_string()));
}

#[tokio::test]
async fn duplicate_registration_surfaces_the_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "User already exists."
        })))
        .mount(&mock_server)
        .await;

    let client = GhgClient::new(&mock_server.uri());
    let outcome = client
        .auth()
        .register("bob", "bob@corp.com", "hunter22", "Corp Ltd")
        .await;

    match outcome {
        AuthOutcome::Rejected { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message.as_deref(), Some("User already exists."));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn unreachable_server_is_not_a_rejection() {
    // Nothing listens on this port; the connection is refused immediately
    let client = GhgClient::new("http://127.0.0.1:9");
    let outcome = client.auth().login("a@b.com", "secret1").await;

    assert!(matches!(outcome, AuthOutcome::Unreachable));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_session_without_a_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auth_token": "tok123",
            "user": { "id": 1 }
        })))
        .mount(&mock_server)
        .await;

    let client = GhgClient::new(&mock_server.uri());
    assert!(client.auth().login("a@b.com", "secret1").await.is_signed_in());
    assert!(client.session().is_authenticated());

    client.auth().logout();

    assert!(!client.session().is_authenticated());
    assert_eq!(client.session().token(), None);
}
