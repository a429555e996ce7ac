use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            classifier: ClassifierConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which classification strategy backs the intent classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierProvider {
    /// Deterministic keyword heuristic, also the fallback for remote failures.
    Mock,
    /// Vertex AI `:predict` endpoint authenticated with an API key.
    VertexApiKey,
}

impl ClassifierProvider {
    /// Unrecognized provider names select the heuristic.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertex_api_key" => Self::VertexApiKey,
            _ => Self::Mock,
        }
    }
}

pub const DEFAULT_VERTEX_LOCATION: &str = "us-central1";
pub const DEFAULT_VERTEX_MODEL: &str = "publishers/google/models/gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Provider selection plus the remote settings the Vertex strategy needs.
///
/// Credentials are optional here; the remote strategy reports them missing per call and the
/// adapter falls back to the heuristic.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub provider: ClassifierProvider,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub location: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::Mock,
            api_key: None,
            project_id: None,
            location: DEFAULT_VERTEX_LOCATION.to_string(),
            model: DEFAULT_VERTEX_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider =
            ClassifierProvider::from_str(&env::var("AI_PROVIDER").unwrap_or_else(|_| "mock".into()));
        let request_timeout_secs = match env::var("AI_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            api_key: non_empty_var("VERTEX_API_KEY"),
            project_id: non_empty_var("PROJECT_ID"),
            location: non_empty_var("GOOGLE_LOCATION")
                .unwrap_or_else(|| DEFAULT_VERTEX_LOCATION.to_string()),
            model: non_empty_var("MODEL").unwrap_or_else(|| DEFAULT_VERTEX_MODEL.to_string()),
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "AI_REQUEST_TIMEOUT_SECONDS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
