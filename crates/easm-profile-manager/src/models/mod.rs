use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub const NOT_AVAILABLE: &str = "N/A";

const DEFAULT_STATUS_COLOR: &str = "#6B7280";

const STATUS_COLORS: &[(&str, &str)] = &[
    ("scheduled", "#BFDBFE"),
    ("queued", "#FEF08A"),
    ("inprogress", "#FED7AA"),
    ("completed", "#BBF7D0"),
    ("failed", "#FECACA"),
    ("queued(retry)", "#FDE68A"),
    ("inprogress(retry)", "#FDBA74"),
    ("authenticationfailed", "#FCA5A5"),
    ("statusretrievalfailed", "#FECACA"),
];

/// Remote profile status. Unrecognized values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStatus {
    Scheduled,
    Queued,
    InProgress,
    Completed,
    Failed,
    QueuedRetry,
    InProgressRetry,
    AuthenticationFailed,
    StatusRetrievalFailed,
    Unknown,
    Other(String),
}

impl ProfileStatus {
    /// Matches case- and whitespace-insensitively, so `"In Progress"` and
    /// `"INPROGRESS"` are the same status.
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "scheduled" => Self::Scheduled,
            "queued" => Self::Queued,
            "inprogress" => Self::InProgress,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "queued(retry)" => Self::QueuedRetry,
            "inprogress(retry)" => Self::InProgressRetry,
            "authenticationfailed" => Self::AuthenticationFailed,
            "statusretrievalfailed" => Self::StatusRetrievalFailed,
            "" | "unknown" => Self::Unknown,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Queued => "Queued",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::QueuedRetry => "Queued (Retry)",
            Self::InProgressRetry => "In Progress (Retry)",
            Self::AuthenticationFailed => "Authentication Failed",
            Self::StatusRetrievalFailed => "Status Retrieval Failed",
            Self::Unknown => "Unknown",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Lookup key into the color table.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Queued => "queued",
            Self::InProgress => "inprogress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::QueuedRetry => "queued(retry)",
            Self::InProgressRetry => "inprogress(retry)",
            Self::AuthenticationFailed => "authenticationfailed",
            Self::StatusRetrievalFailed => "statusretrievalfailed",
            Self::Unknown => "unknown",
            Self::Other(_) => "other",
        }
    }

    pub fn color(&self) -> &'static str {
        status_color(self.key())
    }
}

pub fn status_color(key: &str) -> &'static str {
    STATUS_COLORS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_STATUS_COLOR)
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ProfileStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One row of the aggregated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub username: String,
    pub profile_name: String,
    pub status: ProfileStatus,
    /// Status exactly as the gateway sent it.
    pub status_text: String,
    pub last_configured_on: String,
    pub next_scheduled_sync_on: String,
    pub last_discovery_completed_on: String,
    /// Synthesized row with no remote profile behind it.
    pub placeholder: bool,
}

impl ProfileRecord {
    /// Sentinel row for an identity whose profile listing failed.
    pub fn retrieval_failed(username: &str) -> Self {
        Self::synthesized(username, ProfileStatus::StatusRetrievalFailed)
    }

    /// Keeps an identity with zero profiles visible in the table.
    pub fn no_profiles(username: &str) -> Self {
        Self::synthesized(username, ProfileStatus::Unknown)
    }

    fn synthesized(username: &str, status: ProfileStatus) -> Self {
        Self {
            username: username.to_string(),
            profile_name: NOT_AVAILABLE.to_string(),
            status_text: status.label().to_string(),
            status,
            last_configured_on: NOT_AVAILABLE.to_string(),
            next_scheduled_sync_on: NOT_AVAILABLE.to_string(),
            last_discovery_completed_on: NOT_AVAILABLE.to_string(),
            placeholder: true,
        }
    }

    pub fn key(&self) -> SelectionKey {
        SelectionKey {
            username: self.username.clone(),
            profile_name: self.profile_name.clone(),
        }
    }

    /// Display form of every column, in table order. The status contributes
    /// both its label and the raw gateway text.
    pub fn columns(&self) -> [&str; 7] {
        [
            &self.username,
            &self.profile_name,
            self.status.label(),
            &self.status_text,
            &self.last_configured_on,
            &self.next_scheduled_sync_on,
            &self.last_discovery_completed_on,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionKey {
    pub username: String,
    pub profile_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFailure {
    pub profile_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<DeleteFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFailure {
    pub username: String,
    pub error: String,
}

/// Result of one aggregate pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub records: Vec<ProfileRecord>,
}
