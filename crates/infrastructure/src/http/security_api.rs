use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use votewatch_application::ports::SecurityApi;
use votewatch_domain::{BlockIpRequest, BlockedIp, DomainError, LogPage, LogQuery, ThreatAlert};

/// Lists arrive either bare or wrapped in `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// reqwest-backed client for the security endpoints.
pub struct HttpSecurityApi {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl HttpSecurityApi {
    pub fn new(
        base_url: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: auth_token.filter(|token| !token.trim().is_empty()),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, DomainError> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty());

        debug!(status = status.as_u16(), message = ?message, "Backend returned an error status");

        Err(DomainError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, DomainError> {
        let response = self.send(builder).await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(|e| DomainError::Decode(e.to_string()))
    }

    async fn get_bytes(&self, path: &str) -> Result<Bytes, DomainError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        response.bytes().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::Timeout(self.timeout.as_millis() as u64)
        } else if e.is_decode() {
            DomainError::Decode(e.to_string())
        } else {
            DomainError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl SecurityApi for HttpSecurityApi {
    async fn fetch_logs(&self, query: &LogQuery) -> Result<LogPage, DomainError> {
        let builder = self
            .request(Method::GET, "/security/logs")
            .query(&query.query_pairs());
        self.get_json(builder).await
    }

    async fn list_blocked_ips(&self) -> Result<Vec<BlockedIp>, DomainError> {
        let envelope: ListEnvelope<BlockedIp> = self
            .get_json(self.request(Method::GET, "/security/blocked-ips"))
            .await?;
        Ok(envelope.into_vec())
    }

    async fn list_threat_alerts(&self) -> Result<Vec<ThreatAlert>, DomainError> {
        let envelope: ListEnvelope<ThreatAlert> = self
            .get_json(self.request(Method::GET, "/security/threat-alerts"))
            .await?;
        Ok(envelope.into_vec())
    }

    async fn block_ip(&self, request: &BlockIpRequest) -> Result<(), DomainError> {
        self.send(self.request(Method::POST, "/security/block-ip").json(request))
            .await?;
        Ok(())
    }

    async fn unblock_ip(&self, ip_address: &str) -> Result<(), DomainError> {
        let path = format!("/security/blocked-ips/{}", ip_address);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn export_logs(&self) -> Result<Bytes, DomainError> {
        self.get_bytes("/security/logs/export").await
    }

    async fn generate_report(&self) -> Result<Bytes, DomainError> {
        self.get_bytes("/security/report").await
    }
}
