use crate::biteship::credentials::{Credentials, Environment};

pub const DEFAULT_BITESHIP_URL: &str = "https://api.biteship.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub biteship_url: String,
    pub biteship_api_key: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            biteship_url: std::env::var("BITESHIP_URL")
                .unwrap_or_else(|_| DEFAULT_BITESHIP_URL.to_string()),
            biteship_api_key: std::env::var("BITESHIP_API_KEY")
                .unwrap_or_else(|_| "".to_string()),
            environment: std::env::var("BITESHIP_ENVIRONMENT")
                .ok()
                .and_then(|e| e.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Credential record handed to the Biteship client
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.biteship_api_key.clone(), self.environment)
    }
}
