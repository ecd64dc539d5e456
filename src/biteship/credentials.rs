use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Credential type name nodes refer to
pub const CREDENTIAL_NAME: &str = "biteshipApi";

/// Endpoint used to check that an API key is accepted
pub const CREDENTIAL_TEST_PATH: &str = "/v1/couriers";

/// Biteship account environment selected for the API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(format!("Unknown Biteship environment: {}", other)),
        }
    }
}

/// Stored credential record: API key plus environment
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    #[serde(default)]
    pub environment: Environment,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Self {
        Self {
            api_key: api_key.into(),
            environment,
        }
    }

    /// Value of the `Authorization` header. The key is sent as-is.
    pub fn authorization_value(&self) -> &str {
        self.api_key.trim()
    }
}

// Keep the key out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}
