use chrono::Utc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loginkit::{ApiToken, ClientConfig, LoginError, TokenClient};

fn client_for(server: &MockServer) -> TokenClient {
    TokenClient::new(&ClientConfig::new("abc", "app://cb", server.uri()))
}

fn token_json(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": 3600,
        "scope": "all",
        "token_type": "Bearer",
        "user_id": 42
    })
}

async fn mount_token_success(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn exchange_code_decodes_token_and_computes_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=abc"))
        .and(body_string_contains("code=the-code"))
        .and(body_string_contains("code_verifier=the-verifier"))
        .and(body_string_contains("redirect_uri=app%3A%2F%2Fcb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("at-123", "rt-456")))
        .mount(&server)
        .await;

    let token = client_for(&server)
        .exchange_code("the-code", "the-verifier")
        .await
        .unwrap();

    assert_eq!(token.access_token, "at-123");
    assert_eq!(token.refresh_token, "rt-456");
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.user_id, 42);
    let remaining = (token.expiration_date - Utc::now()).num_seconds();
    assert!(
        (3590..=3610).contains(&remaining),
        "expiration should be ~3600s out, got {remaining}"
    );
}

#[tokio::test]
async fn exchange_password_sends_offline_access_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("access_type=offline"))
        .and(body_string_contains("client_id=abc"))
        .and(body_string_contains("username=jane%40example.com"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("at-pw", "rt-pw")))
        .mount(&server)
        .await;

    let token = client_for(&server)
        .exchange_password("jane@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(token.access_token, "at-pw");
}

#[tokio::test]
async fn refresh_produces_a_new_token() {
    let server = MockServer::start().await;
    mount_token_success(&server, token_json("at-old", "rt-old")).await;
    let client = client_for(&server);
    let old = client.exchange_code("c", "v").await.unwrap();

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=rt-old"))
        .and(body_string_contains("client_id=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("at-new", "rt-new")))
        .mount(&server)
        .await;

    let new = client.refresh(&old).await.unwrap();
    assert_eq!(new.access_token, "at-new");
    assert_eq!(new.refresh_token, "rt-new");
    // The old value object is untouched.
    assert_eq!(old.access_token, "at-old");
}

#[tokio::test]
async fn provider_error_carries_code_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "refresh token revoked"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .exchange_code("stale", "v")
        .await
        .unwrap_err();
    match &err {
        LoginError::Provider {
            status,
            error,
            description,
        } => {
            assert_eq!(*status, 400);
            assert_eq!(error, "invalid_grant");
            assert_eq!(description.as_deref(), Some("refresh token revoked"));
        }
        other => panic!("expected provider error, got {other}"),
    }
    assert_eq!(err.code(), "provider_error");
    assert_eq!(err.provider_error(), Some("invalid_grant"));
}

#[tokio::test]
async fn empty_body_is_not_a_decode_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server).exchange_code("c", "v").await.unwrap_err();
    assert!(matches!(err, LoginError::EmptyResponse(200)));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).exchange_code("c", "v").await.unwrap_err();
    assert!(matches!(err, LoginError::Decode(_)));
}

#[tokio::test]
async fn malformed_error_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).exchange_code("c", "v").await.unwrap_err();
    assert!(matches!(err, LoginError::Decode(_)));
}

#[tokio::test]
async fn transport_failure_surfaces_unchanged() {
    // Grab a port that nothing listens on.
    let server = MockServer::start().await;
    let dead_uri = server.uri();
    drop(server);

    let client = TokenClient::new(&ClientConfig::new("abc", "app://cb", dead_uri));
    let err = client.exchange_code("c", "v").await.unwrap_err();
    assert!(matches!(err, LoginError::Transport(_)));
    assert_eq!(err.code(), "transport_error");
}

#[tokio::test]
async fn success_with_supplied_expiration_date() {
    let server = MockServer::start().await;
    let mut body = token_json("at", "rt");
    body["expirationDate"] = serde_json::json!("2030-01-02T03:04:05Z");
    mount_token_success(&server, body).await;

    let token: ApiToken = client_for(&server).exchange_code("c", "v").await.unwrap();
    assert_eq!(
        token.expiration_date,
        "2030-01-02T03:04:05Z"
            .parse::<chrono::DateTime<Utc>>()
            .unwrap()
    );
}
