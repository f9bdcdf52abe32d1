use futures::{stream, StreamExt};
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::{errors::AuthError, gateway::GatewayClient, models::AuthFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Identity to bearer token map, kept in expansion order.
#[derive(Debug, Clone, Default)]
pub struct Sessions {
    inner: Vec<Session>,
}

impl Sessions {
    pub fn insert(&mut self, username: &str, token: String) {
        match self.inner.iter_mut().find(|s| s.username == username) {
            Some(existing) => existing.token = token,
            None => self.inner.push(Session {
                username: username.to_string(),
                token,
            }),
        }
    }

    pub fn token(&self, username: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|s| s.username == username)
            .map(|s| s.token.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.inner.iter()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.inner.iter().map(|s| s.username.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// An authenticated gateway plus whatever went wrong while connecting.
#[derive(Debug, Clone)]
pub struct Connection {
    pub gateway: GatewayClient,
    pub sessions: Sessions,
    pub auth_failures: Vec<AuthFailure>,
}

/// Exchanges credentials for a bearer token. Only `201 Created` with a
/// non-blank body counts as success; the trimmed body is the token.
pub async fn authenticate(
    gateway: &GatewayClient,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let form = [
        ("username", username),
        ("password", password),
        ("token", "true"),
        ("permissions", "true"),
    ];
    let response = gateway
        .http()
        .post(gateway.url("/auth"))
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if status != StatusCode::CREATED {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let token = body.trim();
    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }
    Ok(token.to_string())
}

/// Authenticates every identity once. A failure only excludes that identity.
pub async fn authenticate_all(
    gateway: &GatewayClient,
    usernames: &[String],
    password: &str,
    concurrency: usize,
) -> Connection {
    let results: Vec<(String, Result<String, AuthError>)> = stream::iter(usernames.iter().cloned())
        .map(|username| async move {
            let result = authenticate(gateway, &username, password).await;
            (username, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut sessions = Sessions::default();
    let mut auth_failures = Vec::new();
    for (username, result) in results {
        match result {
            Ok(token) => {
                info!(identity = %username, "authenticated");
                sessions.insert(&username, token);
            }
            Err(e) => {
                warn!(identity = %username, error = %e, "authentication failed");
                auth_failures.push(AuthFailure {
                    username,
                    error: e.to_string(),
                });
            }
        }
    }

    Connection {
        gateway: gateway.clone(),
        sessions,
        auth_failures,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn gateway(server: &MockServer) -> GatewayClient {
        GatewayClient::with_base_url(reqwest::Client::new(), &server.uri())
    }

    #[tokio::test]
    async fn created_response_body_is_the_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=alice&password=s3cret"))
            .and(body_string_contains("token=true&permissions=true"))
            .respond_with(ResponseTemplate::new(201).set_body_string("  tok-123\n"))
            .expect(1)
            .mount(&server)
            .await;

        let token = authenticate(&gateway(&server), "alice", "s3cret")
            .await
            .unwrap();
        assert_eq!(token, "tok-123");
    }

    #[tokio::test]
    async fn non_created_status_is_rejected_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let err = authenticate(&gateway(&server), "alice", "pw")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Rejected {
                status: 500,
                body: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn ok_status_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok"))
            .mount(&server)
            .await;

        let err = authenticate(&gateway(&server), "alice", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn blank_token_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(201).set_body_string(" \n"))
            .mount(&server)
            .await;

        let err = authenticate(&gateway(&server), "alice", "pw")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::EmptyToken);
        assert_eq!(err.to_string(), "Empty token received");
    }

    #[tokio::test]
    async fn unreachable_gateway_is_a_transport_error() {
        let client = GatewayClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:1");
        let err = authenticate(&client, "alice", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
    }

    #[tokio::test]
    async fn failed_identity_is_excluded_from_sessions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(body_string_contains("username=ops1&"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;
        for name in ["ops", "ops2"] {
            Mock::given(method("POST"))
                .and(path("/auth"))
                .and(body_string_contains(format!("username={name}&")))
                .respond_with(ResponseTemplate::new(201).set_body_string(format!("tok-{name}")))
                .mount(&server)
                .await;
        }

        let usernames = vec!["ops".to_string(), "ops1".to_string(), "ops2".to_string()];
        let conn = authenticate_all(&gateway(&server), &usernames, "pw", 1).await;

        assert_eq!(conn.sessions.usernames(), vec!["ops", "ops2"]);
        assert_eq!(conn.sessions.token("ops2"), Some("tok-ops2"));
        assert_eq!(conn.sessions.token("ops1"), None);
        assert_eq!(conn.auth_failures.len(), 1);
        assert_eq!(conn.auth_failures[0].username, "ops1");
        assert_eq!(
            conn.auth_failures[0].error,
            "HTTP 500 - Internal Server Error"
        );
    }

    #[test]
    fn insert_replaces_existing_token() {
        let mut sessions = Sessions::default();
        sessions.insert("a", "1".to_string());
        sessions.insert("b", "2".to_string());
        sessions.insert("a", "3".to_string());
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.token("a"), Some("3"));
        assert_eq!(sessions.usernames(), vec!["a", "b"]);
    }
}
