use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use crate::{
    errors::{DeleteError, FetchError},
    gateway::GatewayClient,
    models::{ProfileRecord, ProfileStatus, NOT_AVAILABLE},
};

const PROFILE_STATUS_PATH: &str = "/easm/v2/profile/status";
const PROFILE_PATH: &str = "/easm/v2/profile";

/// A profile as returned by the gateway. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProfile {
    pub profile_name: Option<String>,
    pub status: Option<String>,
    pub last_configured_on: Option<String>,
    pub next_scheduled_sync_on: Option<String>,
    pub last_discovery_completed_on: Option<String>,
}

impl RawProfile {
    pub fn from_value(value: &Value) -> Self {
        Self {
            profile_name: loose_field(value, "profileName"),
            status: loose_field(value, "status"),
            last_configured_on: loose_field(value, "lastConfiguredOn"),
            next_scheduled_sync_on: loose_field(value, "nextScheduledSyncOn"),
            last_discovery_completed_on: loose_field(value, "lastDiscoveryCompletedOn"),
        }
    }

    pub fn into_record(self, username: &str) -> ProfileRecord {
        let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        ProfileRecord {
            username: username.to_string(),
            profile_name: or_na(self.profile_name),
            status: self
                .status
                .as_deref()
                .map(ProfileStatus::parse)
                .unwrap_or(ProfileStatus::Unknown),
            status_text: self
                .status
                .unwrap_or_else(|| ProfileStatus::Unknown.label().to_string()),
            last_configured_on: or_na(self.last_configured_on),
            next_scheduled_sync_on: or_na(self.next_scheduled_sync_on),
            last_discovery_completed_on: or_na(self.last_discovery_completed_on),
            placeholder: false,
        }
    }
}

// Null counts as absent; non-string scalars keep their JSON text.
fn loose_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub async fn list_profiles(
    gateway: &GatewayClient,
    token: &str,
) -> Result<Vec<RawProfile>, FetchError> {
    let response = gateway
        .http()
        .get(gateway.url(PROFILE_STATUS_PATH))
        .header(ACCEPT, "*/*")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .send()
        .await?
        .error_for_status()?;

    let body: Value = response.json().await?;
    match body {
        Value::Array(items) => Ok(items.iter().map(RawProfile::from_value).collect()),
        other => Err(FetchError {
            message: format!("expected a JSON array of profiles, got {}", json_kind(&other)),
        }),
    }
}

pub async fn delete_profile(
    gateway: &GatewayClient,
    token: &str,
    profile_name: &str,
) -> Result<(), DeleteError> {
    // '/' stays literal on the wire, everything else reserved is escaped
    let encoded = urlencoding::encode(profile_name).replace("%2F", "/");
    let url = format!("{}?profileName={}", gateway.url(PROFILE_PATH), encoded);
    gateway
        .http()
        .delete(url)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
