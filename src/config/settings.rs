//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_MAIL_FROM, DEFAULT_REDIS_URL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SMTP_PORT, MIN_JWT_SECRET_LENGTH,
};

/// How customer notifications leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMode {
    /// Render and log the message in the request path
    Log,
    /// Enqueue an email job for the `jobs work` worker
    Queue,
}

impl From<&str> for NotificationMode {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "queue" => NotificationMode::Queue,
            _ => NotificationMode::Log,
        }
    }
}

/// SMTP relay settings used by the email worker
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    password: Option<String>,
}

impl SmtpSettings {
    /// Get the SMTP password, if one was configured.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub notification_mode: NotificationMode,
    pub mail_from: String,
    pub smtp: Option<SmtpSettings>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("notification_mode", &self.notification_mode)
            .field("mail_from", &self.mail_from)
            .field("smtp_host", &self.smtp.as_ref().map(|s| s.host.as_str()))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpSettings {
            host,
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: env::var("SMTP_USER").ok(),
            password: env::var("SMTP_PASS").ok(),
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            notification_mode: env::var("NOTIFICATION_MODE")
                .map(|v| NotificationMode::from(v.as_str()))
                .unwrap_or(NotificationMode::Log),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string()),
            smtp,
        }
    }

    /// Build a configuration directly, mainly for tests and tooling.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            notification_mode: NotificationMode::Log,
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            smtp: None,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_mode_parses_queue_case_insensitively() {
        assert_eq!(NotificationMode::from("QUEUE"), NotificationMode::Queue);
        assert_eq!(NotificationMode::from(" queue "), NotificationMode::Queue);
        assert_eq!(NotificationMode::from("log"), NotificationMode::Log);
        assert_eq!(NotificationMode::from("anything"), NotificationMode::Log);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config::new("postgres://user:pw@db/app", "x".repeat(40));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("pw@db"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
