use crate::biteship::credentials::{Credentials, CREDENTIAL_TEST_PATH};
use crate::biteship::error::BiteshipError;
use crate::config::Config;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, error, info};

/// Biteship API client. One call per method, no retries.
pub struct BiteshipClient {
    base_url: Url,
    credentials: Credentials,
    client: reqwest::Client,
}

impl BiteshipClient {
    /// Create a client from the service configuration
    pub fn new(config: &Config) -> Result<Self, BiteshipError> {
        Self::with_credentials(&config.biteship_url, config.credentials())
    }

    /// Create a client for an explicit base URL and credential record
    pub fn with_credentials(base_url: &str, credentials: Credentials) -> Result<Self, BiteshipError> {
        if credentials.authorization_value().is_empty() {
            return Err(BiteshipError::AuthenticationError(
                "Biteship API key is required".to_string(),
            ));
        }

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| BiteshipError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BiteshipError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(credentials.authorization_value()).map_err(|e| {
                BiteshipError::AuthenticationError(format!("Invalid API key format: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(BiteshipError::NetworkError)?;

        debug!(
            "Biteship client ready for {} ({} environment)",
            base_url, credentials.environment
        );

        Ok(Self {
            base_url,
            credentials,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build an endpoint URL from path segments. Segments are percent-encoded,
    /// so user-supplied IDs cannot escape their position in the path.
    pub fn build_url(&self, segments: &[&str]) -> Result<Url, BiteshipError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BiteshipError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Value, BiteshipError> {
        self.send(Method::GET, segments, query, None).await
    }

    pub async fn post(&self, segments: &[&str], body: Option<&Value>) -> Result<Value, BiteshipError> {
        self.send(Method::POST, segments, &[], body).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<Value, BiteshipError> {
        self.send(Method::DELETE, segments, &[], None).await
    }

    /// Issue the credential test request (`GET /v1/couriers`)
    pub async fn verify_credentials(&self) -> Result<(), BiteshipError> {
        let segments: Vec<&str> = CREDENTIAL_TEST_PATH
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        self.get(&segments, &[]).await?;
        info!("Biteship credentials accepted");
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, BiteshipError> {
        let url = self.build_url(segments)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(BiteshipError::NetworkError)?;

        let status = response.status();
        let text = response.text().await.map_err(BiteshipError::NetworkError)?;

        if !status.is_success() {
            error!("Biteship API error: {} {} - {} - {}", method, url, status, text);
            return Err(BiteshipError::from_status_code(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(BiteshipError::SerializationError)
    }
}
