use crate::config::TongsConfig;
use crate::domain::{HttpMethod, SubtypeRequest};
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SubtypeRequest) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport bound to the site's base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    cookie: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &TongsConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        Ok(Self {
            client,
            base_url,
            cookie: None,
        })
    }

    /// Forwards a cookie header, the way a same-origin fetch would.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        self.cookie = (!cookie.trim().is_empty()).then_some(cookie);
        self
    }

    pub fn url_for(&self, request: &SubtypeRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", request.path)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }
        Ok(url)
    }

    fn headers_for(&self, request: &SubtypeRequest) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        if let Some(cookie) = &self.cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| TransportError::InvalidHeader {
                name: COOKIE.to_string(),
                reason: e.to_string(),
            })?;
            headers.insert(COOKIE, value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SubtypeRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(request)?;
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .client
            .request(method, url.clone())
            .headers(self.headers_for(request)?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        tracing::debug!("{} {} -> {}", request.method, url, status);

        let body = response.text().await?;
        Ok(TransportResponse::new(status, body))
    }
}
