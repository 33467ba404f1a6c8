//! Service configuration.

use triage_core::FallbackContact;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum connections in the database pool.
    pub db_max_connections: u32,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Name of the synthesized helpdesk contact used when no Admin user
    /// exists in the store.
    pub helpdesk_contact_name: String,

    /// Email of the synthesized helpdesk contact.
    pub helpdesk_contact_email: String,

    /// Phone of the synthesized helpdesk contact.
    pub helpdesk_contact_phone: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.db_max_connections),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
            helpdesk_contact_name: std::env::var("HELPDESK_CONTACT_NAME")
                .unwrap_or(defaults.helpdesk_contact_name),
            helpdesk_contact_email: std::env::var("HELPDESK_CONTACT_EMAIL")
                .unwrap_or(defaults.helpdesk_contact_email),
            helpdesk_contact_phone: std::env::var("HELPDESK_CONTACT_PHONE")
                .unwrap_or(defaults.helpdesk_contact_phone),
        }
    }

    /// The static contact surfaced when the store has no Admin users.
    #[must_use]
    pub fn helpdesk_contact(&self) -> FallbackContact {
        FallbackContact {
            full_name: self.helpdesk_contact_name.clone(),
            email: self.helpdesk_contact_email.clone(),
            phone: Some(self.helpdesk_contact_phone.clone()),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_url: "postgres://localhost/helpdesk_triage".into(),
            db_max_connections: 10,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            helpdesk_contact_name: "CSEE Helpdesk".into(),
            helpdesk_contact_email: "dept@cs.umbc.edu".into(),
            helpdesk_contact_phone: "410-455-3500".into(),
        }
    }
}
