use poem_openapi::{payload::Json, ApiResponse, OpenApi};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::biteship::BiteshipClient;

const CREDENTIAL_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HealthApi {
    client: Option<Arc<BiteshipClient>>,
}

impl HealthApi {
    pub fn with_client(client: Arc<BiteshipClient>) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, poem_openapi::Object)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub biteship: Option<BiteshipHealth>,
}

/// Result of the credential test request
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, poem_openapi::Object)]
pub struct BiteshipHealth {
    pub connected: bool,
    pub environment: String,
    pub response_time_ms: Option<u64>,
    pub error: Option<String>,
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200)]
    Ok(Json<HealthStatus>),

    #[oai(status = 503)]
    ServiceUnavailable(Json<HealthStatus>),
}

#[OpenApi]
impl HealthApi {
    /// Service status, including a credential check against the Biteship API
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> HealthResponse {
        let mut health = HealthStatus {
            status: "healthy".to_string(),
            service: "biteship-nodes".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            biteship: None,
        };

        if let Some(client) = &self.client {
            let biteship = check_credentials(client).await;
            if !biteship.connected {
                health.status = "degraded".to_string();
            }
            health.biteship = Some(biteship);
        }

        if health.status == "healthy" {
            HealthResponse::Ok(Json(health))
        } else {
            HealthResponse::ServiceUnavailable(Json(health))
        }
    }
}

async fn check_credentials(client: &BiteshipClient) -> BiteshipHealth {
    let start = Instant::now();
    let environment = client.credentials().environment.to_string();

    match timeout(CREDENTIAL_CHECK_TIMEOUT, client.verify_credentials()).await {
        Ok(Ok(())) => BiteshipHealth {
            connected: true,
            environment,
            response_time_ms: Some(start.elapsed().as_millis() as u64),
            error: None,
        },
        Ok(Err(e)) => BiteshipHealth {
            connected: false,
            environment,
            response_time_ms: None,
            error: Some(e.to_string()),
        },
        Err(_) => BiteshipHealth {
            connected: false,
            environment,
            response_time_ms: None,
            error: Some("Timeout".to_string()),
        },
    }
}
