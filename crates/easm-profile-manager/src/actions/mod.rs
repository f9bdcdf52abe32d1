use tracing::{info, warn};

use crate::{
    auth::Sessions,
    gateway::GatewayClient,
    models::{DeleteFailure, DeleteReport},
    profiles::delete_profile,
    table::Selection,
};

/// Deletes every selected profile in selection order. Failures are collected
/// and never stop the remaining deletions. The caller re-aggregates afterwards.
pub async fn bulk_delete(
    gateway: &GatewayClient,
    sessions: &Sessions,
    selection: &Selection,
) -> DeleteReport {
    let mut report = DeleteReport::default();

    for key in selection.iter() {
        let Some(token) = sessions.token(&key.username) else {
            warn!(identity = %key.username, profile = %key.profile_name, "no session for selected profile");
            report.failed.push(DeleteFailure {
                profile_name: key.profile_name.clone(),
                error: format!("no active session for {}", key.username),
            });
            continue;
        };

        match delete_profile(gateway, token, &key.profile_name).await {
            Ok(()) => {
                info!(identity = %key.username, profile = %key.profile_name, "profile deleted");
                report.succeeded.push(key.profile_name.clone());
            }
            Err(e) => {
                warn!(identity = %key.username, profile = %key.profile_name, error = %e, "profile delete failed");
                report.failed.push(DeleteFailure {
                    profile_name: key.profile_name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
