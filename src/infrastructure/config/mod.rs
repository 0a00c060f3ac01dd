use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub token_store_path: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
    pub log_format: LogFormat,
    pub credentials: Option<Credentials>,
    pub otp_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let credentials = match (env::var("NUTRITION_EMAIL"), env::var("NUTRITION_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(Credentials { email, password }),
            _ => None,
        };

        let config = Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token_store_path: env::var("TOKEN_STORE_PATH").ok().map(PathBuf::from),
            request_timeout: match env::var("REQUEST_TIMEOUT_SECS") {
                Ok(secs) => Some(Duration::from_secs(secs.parse()?)),
                Err(_) => None,
            },
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            credentials,
            otp_code: env::var("NUTRITION_OTP").ok(),
        };

        Ok(config)
    }

    /// Configuration pointing at `api_base_url` with everything else defaulted.
    pub fn for_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token_store_path: None,
            request_timeout: None,
            log_format: LogFormat::Pretty,
            credentials: None,
            otp_code: None,
        }
    }
}
