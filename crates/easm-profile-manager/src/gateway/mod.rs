use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, ClientBuilder};

/// HTTP handle on the remote scanning platform gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    host: String,
    base_url: String,
}

impl GatewayClient {
    /// The gateway is always reached over https.
    pub fn for_host(http: Client, host: &str) -> Self {
        let host = host.trim().trim_end_matches('/').to_string();
        let base_url = format!("https://{host}");
        Self {
            http,
            host,
            base_url,
        }
    }

    /// Points the client at an arbitrary base URL, e.g. a local mock server.
    #[cfg(test)]
    pub fn with_base_url(http: Client, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let host = base_url
            .split_once("://")
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| base_url.clone());
        Self {
            http,
            host,
            base_url,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn build_http_client(timeout_secs: u64) -> anyhow::Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(format!("easm-profile-manager/{}", env!("CARGO_PKG_VERSION")))
        .use_rustls_tls()
        .build()
        .context("failed to build gateway http client")
}
