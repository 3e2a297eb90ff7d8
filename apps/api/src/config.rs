use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub smtp: Option<SmtpConfig>,
    pub port: u16,
    pub rust_log: String,
}

/// Outbound mail settings for the HR reviewer notification.
/// Present only when server, sender and reviewer address are all set.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub reviewer: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_region: optional_env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            smtp: SmtpConfig::from_env()?,
            port: parse_port("PORT", "8080")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl SmtpConfig {
    fn from_env() -> Result<Option<Self>> {
        let (Some(server), Some(from), Some(reviewer)) = (
            optional_env("SMTP_SERVER"),
            optional_env("SMTP_FROM"),
            optional_env("HR_REVIEWER_EMAIL"),
        ) else {
            return Ok(None);
        };

        Ok(Some(SmtpConfig {
            server,
            port: parse_port("SMTP_PORT", "587")?,
            user: optional_env("SMTP_USER"),
            password: optional_env("SMTP_PASSWORD"),
            from,
            reviewer,
        }))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(key: &str, default: &str) -> Result<u16> {
    optional_env(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<u16>()
        .with_context(|| format!("{key} must be a valid port number"))
}
