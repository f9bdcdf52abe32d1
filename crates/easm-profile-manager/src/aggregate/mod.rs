use futures::{stream, StreamExt};
use tracing::warn;

use crate::{auth::Sessions, gateway::GatewayClient, models::ProfileRecord, profiles::list_profiles};

/// Builds the profile table for every session, in session order.
///
/// A failed listing becomes one "Status Retrieval Failed" row for that
/// identity and an empty listing becomes one placeholder row, so every
/// authenticated identity appears at least once. `concurrency` bounds the
/// number of listings in flight; 1 issues them strictly one after another.
pub async fn aggregate(
    gateway: &GatewayClient,
    sessions: &Sessions,
    concurrency: usize,
) -> Vec<ProfileRecord> {
    let per_identity: Vec<Vec<ProfileRecord>> = stream::iter(sessions.iter().cloned())
        .map(|session| async move {
            match list_profiles(gateway, &session.token).await {
                Ok(raw) if raw.is_empty() => vec![ProfileRecord::no_profiles(&session.username)],
                Ok(raw) => raw
                    .into_iter()
                    .map(|p| p.into_record(&session.username))
                    .collect(),
                Err(e) => {
                    warn!(identity = %session.username, error = %e, "profile status retrieval failed");
                    vec![ProfileRecord::retrieval_failed(&session.username)]
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    per_identity.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::models::ProfileStatus;

    async fn mount_listing(server: &MockServer, token: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/easm/v2/profile/status"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn sessions(names: &[&str]) -> Sessions {
        let mut sessions = Sessions::default();
        for name in names {
            sessions.insert(name, format!("tok-{name}"));
        }
        sessions
    }

    #[tokio::test]
    async fn failing_identity_gets_one_sentinel_row() {
        let server = MockServer::start().await;
        mount_listing(
            &server,
            "tok-a",
            ResponseTemplate::new(200).set_body_json(json!([
                {"profileName": "a-1", "status": "scheduled"},
                {"profileName": "a-2", "status": "failed"}
            ])),
        )
        .await;
        mount_listing(&server, "tok-b", ResponseTemplate::new(503)).await;
        mount_listing(
            &server,
            "tok-c",
            ResponseTemplate::new(200).set_body_json(json!([
                {"profileName": "c-1", "status": "completed"}
            ])),
        )
        .await;

        let gateway = GatewayClient::with_base_url(reqwest::Client::new(), &server.uri());
        let rows = aggregate(&gateway, &sessions(&["a", "b", "c"]), 1).await;

        let names: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.username.as_str(), r.profile_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("a", "a-1"), ("a", "a-2"), ("b", "N/A"), ("c", "c-1")]
        );
        assert_eq!(rows[2], ProfileRecord::retrieval_failed("b"));
        assert_eq!(rows[3].status, ProfileStatus::Completed);
    }

    #[tokio::test]
    async fn empty_listing_keeps_identity_visible() {
        let server = MockServer::start().await;
        mount_listing(&server, "tok-a", ResponseTemplate::new(200).set_body_json(json!([]))).await;

        let gateway = GatewayClient::with_base_url(reqwest::Client::new(), &server.uri());
        let rows = aggregate(&gateway, &sessions(&["a"]), 1).await;
        assert_eq!(rows, vec![ProfileRecord::no_profiles("a")]);
    }

    #[tokio::test]
    async fn concurrent_listing_preserves_session_order() {
        let server = MockServer::start().await;
        mount_listing(
            &server,
            "tok-slow",
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(json!([{"profileName": "slow-1"}])),
        )
        .await;
        mount_listing(
            &server,
            "tok-fast",
            ResponseTemplate::new(200).set_body_json(json!([{"profileName": "fast-1"}])),
        )
        .await;

        let gateway = GatewayClient::with_base_url(reqwest::Client::new(), &server.uri());
        let rows = aggregate(&gateway, &sessions(&["slow", "fast"]), 4).await;
        let names: Vec<&str> = rows.iter().map(|r| r.profile_name.as_str()).collect();
        assert_eq!(names, vec!["slow-1", "fast-1"]);
    }

    #[tokio::test]
    async fn unreachable_gateway_yields_sentinel_per_identity() {
        let gateway = GatewayClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:1");
        let rows = aggregate(&gateway, &sessions(&["a", "b"]), 2).await;
        assert_eq!(
            rows,
            vec![
                ProfileRecord::retrieval_failed("a"),
                ProfileRecord::retrieval_failed("b")
            ]
        );
    }

    #[tokio::test]
    async fn no_sessions_means_no_rows() {
        let gateway = GatewayClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:1");
        assert!(aggregate(&gateway, &Sessions::default(), 1).await.is_empty());
    }
}
