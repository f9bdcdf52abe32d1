use std::{env, fs, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = env::var("EPM_CONFIG").unwrap_or_else(|_| "config.json".to_string());
        let file_cfg: Option<AppConfig> = fs::read_to_string(&path)
            .ok()
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .with_context(|| format!("failed to parse {path}"))?;

        let mut cfg = file_cfg.unwrap_or_default();
        cfg.apply_env(|key| env::var(key).ok());
        Ok(cfg)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("EPM_HOST") {
            self.host = v;
        }
        if let Some(v) = var("EPM_PORT") {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Some(v) = var("EPM_REFRESH_INTERVAL_SECS") {
            self.refresh_interval_secs = v.parse().unwrap_or(self.refresh_interval_secs);
        }
        if let Some(v) = var("EPM_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = v.parse().unwrap_or(self.request_timeout_secs);
        }
        if let Some(v) = var("EPM_MAX_CONCURRENT_REQUESTS") {
            self.max_concurrent_requests = v.parse().unwrap_or(self.max_concurrent_requests);
        }
        self.max_concurrent_requests = self.max_concurrent_requests.max(1);
        self.refresh_interval_secs = self.refresh_interval_secs.max(1);
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            refresh_interval_secs: 30,
            request_timeout_secs: 30,
            max_concurrent_requests: 1,
        }
    }
}
