use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Which analyzer implementation serves image analysis requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerMode {
    /// Fixed-set-random mock (default, no external calls)
    Canned,
    /// Real inference service reached over HTTP
    Remote,
}

/// Knobs for the simulated collaborators (upload, analysis, geolocation)
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Simulated upload latency
    pub upload_latency: Duration,
    /// Simulated analysis latency (canned analyzer only)
    pub analysis_latency: Duration,
    /// Base URL prepended to generated display URLs
    pub upload_base_url: String,
    pub analyzer_mode: AnalyzerMode,
    /// Inference endpoint, required when analyzer_mode is Remote
    pub inference_url: Option<String>,
    /// Whether the mock geolocation provider reports a position
    pub location_enabled: bool,
    pub location_lat: f64,
    pub location_lng: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            simulation: SimulationConfig::from_env()?,
        })
    }
}

impl AppConfig {
    // Must stay above the 10MB photo ceiling so an oversized upload
    // reaches the pipeline's own size check instead of a raw 413.
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 12 * 1024 * 1024;

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 3600; // 1 hour

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "surrs-demo-secret-do-not-use-in-production".to_string());

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "TOKEN_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "SURRS API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "API documentation for the SURRS urban resilience demo".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl SimulationConfig {
    // Latencies match the original client-side mocks
    const DEFAULT_UPLOAD_LATENCY_MS: u64 = 1500;
    const DEFAULT_ANALYSIS_LATENCY_MS: u64 = 2000;

    pub fn from_env() -> Result<Self, String> {
        let upload_latency_ms = env::var("UPLOAD_LATENCY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_UPLOAD_LATENCY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "UPLOAD_LATENCY_MS must be a valid number".to_string())?;

        let analysis_latency_ms = env::var("ANALYSIS_LATENCY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_ANALYSIS_LATENCY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "ANALYSIS_LATENCY_MS must be a valid number".to_string())?;

        let upload_base_url = env::var("UPLOAD_BASE_URL")
            .unwrap_or_else(|_| "https://storage.surrs.local/uploads".to_string());

        let analyzer_mode = match env::var("ANALYZER_MODE")
            .unwrap_or_else(|_| "canned".to_string())
            .to_lowercase()
            .as_str()
        {
            "canned" => AnalyzerMode::Canned,
            "remote" => AnalyzerMode::Remote,
            other => return Err(format!("Invalid ANALYZER_MODE: {}", other)),
        };

        let inference_url = env::var("INFERENCE_URL").ok().filter(|s| !s.is_empty());
        if analyzer_mode == AnalyzerMode::Remote && inference_url.is_none() {
            return Err("INFERENCE_URL is required when ANALYZER_MODE=remote".to_string());
        }

        let location_enabled = env::var("LOCATION_ENABLED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        // NYC city hall area, matching the demo map center
        let location_lat = env::var("LOCATION_LAT")
            .unwrap_or_else(|_| "40.7128".to_string())
            .parse::<f64>()
            .map_err(|_| "LOCATION_LAT must be a valid number".to_string())?;
        let location_lng = env::var("LOCATION_LNG")
            .unwrap_or_else(|_| "-74.0060".to_string())
            .parse::<f64>()
            .map_err(|_| "LOCATION_LNG must be a valid number".to_string())?;

        Ok(Self {
            upload_latency: Duration::from_millis(upload_latency_ms),
            analysis_latency: Duration::from_millis(analysis_latency_ms),
            upload_base_url,
            analyzer_mode,
            inference_url,
            location_enabled,
            location_lat,
            location_lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::uploads::models::MAX_FILE_SIZE;

    #[test]
    fn default_body_cap_leaves_room_for_a_max_size_photo() {
        assert!(AppConfig::DEFAULT_MAX_REQUEST_BODY_SIZE > MAX_FILE_SIZE);
    }
}
