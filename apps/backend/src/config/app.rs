//! Process-level settings read once at startup.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

const DEFAULT_ORIGINS: [&str; 5] = [
    "https://tyre-management-frontend.vercel.app",
    "https://tyremanagement-frontend.vercel.app",
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:4173",
];

pub const DEFAULT_FORMSPREE_BASE_URL: &str = "https://formspree.io/f/";

/// Settings for the outbound order mailer
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Prefix joined with a bare form id, e.g. `https://formspree.io/f/`
    pub formspree_base_url: String,
    pub timeout: Duration,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            formspree_base_url: DEFAULT_FORMSPREE_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Reported by the health check (`development`, `production`, ...)
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub mailer: MailerConfig,
    pub security: SecurityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            cors_origins: DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
            mailer: MailerConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let host = env::var("BACKEND_HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT must be a valid port number, got '{raw}'")))?,
            Err(_) => defaults.port,
        };
        let environment = env::var("APP_ENV").unwrap_or(defaults.environment);

        let cors_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => {
                let parsed = parse_origins(&raw);
                if parsed.is_empty() {
                    defaults.cors_origins
                } else {
                    parsed
                }
            }
            Err(_) => defaults.cors_origins,
        };

        let formspree_base_url =
            env::var("FORMSPREE_BASE_URL").unwrap_or(defaults.mailer.formspree_base_url);
        let timeout = match env::var("MAILER_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!("MAILER_TIMEOUT_SECS must be whole seconds, got '{raw}'"))
            })?),
            Err(_) => defaults.mailer.timeout,
        };

        Ok(Self {
            host,
            port,
            environment,
            cors_origins,
            mailer: MailerConfig {
                formspree_base_url,
                timeout,
            },
            security: SecurityConfig::from_env()?,
        })
    }
}

/// Split a comma-separated origin list, dropping blanks, `null` and
/// anything that is not an http(s) origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
