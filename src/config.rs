use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// LiveKit administrative endpoint (Twirp over HTTP)
    pub livekit_url: String,
    /// LiveKit endpoint handed to joining clients
    pub livekit_ws_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub static_dir: Option<String>,
    pub backend_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    pub enable_https: bool,
    pub ssl_cert_file: String,
    pub ssl_key_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            livekit_url: env::var("LIVEKIT_URL")
                .unwrap_or_else(|_| "http://localhost:7880".to_string()),
            livekit_ws_url: env::var("LIVEKIT_WS_URL")
                .unwrap_or_else(|_| "ws://localhost:7880".to_string()),
            api_key: env::var("LIVEKIT_API_KEY").unwrap_or_else(|_| "devkey".to_string()),
            api_secret: env::var("LIVEKIT_API_SECRET").unwrap_or_else(|_| "secret".to_string()),
            static_dir: env::var("STATIC_DIR").ok().filter(|dir| !dir.trim().is_empty()),
            backend_timeout_seconds: env::var("BACKEND_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            enable_https: is_enabled(env::var("ENABLE_HTTPS").ok().as_deref()),
            ssl_cert_file: env::var("SSL_CERT_FILE")
                .unwrap_or_else(|_| "./certs/server.crt".to_string()),
            ssl_key_file: env::var("SSL_KEY_FILE")
                .unwrap_or_else(|_| "./certs/server.key".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the backend could never accept tokens from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() || self.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Only an explicit "true" turns a flag on
fn is_enabled(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("LIVEKIT_API_KEY and LIVEKIT_API_SECRET must not be empty")]
    MissingCredentials,
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server_host: "localhost".to_string(),
        server_port: 8081,
        livekit_url: "http://localhost:7880".to_string(),
        livekit_ws_url: "ws://localhost:7880".to_string(),
        api_key: "test-key".to_string(),
        api_secret: "test-secret-that-is-long-enough".to_string(),
        static_dir: None,
        backend_timeout_seconds: 5,
        request_timeout_seconds: 30,
        enable_https: false,
        ssl_cert_file: "./certs/server.crt".to_string(),
        ssl_key_file: "./certs/server.key".to_string(),
    }
}
