use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,

    // Drug label API (OpenFDA-compatible)
    pub drug_api_url: String,
    pub drug_api_timeout_secs: u64,

    // Translation provider (LibreTranslate-compatible)
    pub translate_api_url: String,
    pub translate_timeout_secs: u64,
    pub target_language: String,

    // Default admin bootstrap
    pub admin_email: String,
    pub admin_password: String,
    pub admin_first_name: String,
    pub admin_last_name: String,

    // CORS configuration
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            drug_api_url: env::var("DRUG_API_URL")
                .unwrap_or_else(|_| "https://api.fda.gov/drug/label.json".to_string()),
            drug_api_timeout_secs: env::var("DRUG_API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,

            translate_api_url: env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "https://libretranslate.com/translate".to_string()),
            translate_timeout_secs: env::var("TRANSLATE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            target_language: env::var("TARGET_LANGUAGE").unwrap_or_else(|_| "es".to_string()),

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@meditrack.com".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Admin1234!".to_string()),
            admin_first_name: env::var("ADMIN_FIRST_NAME").unwrap_or_else(|_| "Admin".to_string()),
            admin_last_name: env::var("ADMIN_LAST_NAME").unwrap_or_else(|_| "System".to_string()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            drug_api_url: "https://api.fda.gov/drug/label.json".to_string(),
            drug_api_timeout_secs: 10,
            translate_api_url: "https://libretranslate.com/translate".to_string(),
            translate_timeout_secs: 10,
            target_language: "es".to_string(),
            admin_email: "admin@meditrack.com".to_string(),
            admin_password: "Admin1234!".to_string(),
            admin_first_name: "Admin".to_string(),
            admin_last_name: "System".to_string(),
            cors_allowed_origins: "http://localhost:3001".to_string(),
        }
    }
}
