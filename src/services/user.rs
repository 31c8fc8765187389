use crate::{
    config::Config,
    error::{AppError, Result},
    models::user::{User, UserRole},
    services::store::RecordStore,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Account management. Kept intentionally small: the bootstrap path and the
/// password hashing it needs.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn RecordStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Ensures exactly one active administrator account exists. Runs at every
    /// startup and is idempotent: with an admin already present it does
    /// nothing and reports `false`.
    pub async fn ensure_default_admin(&self, config: &Config) -> Result<bool> {
        if self.store.admin_exists().await? {
            debug!("Administrator account already present, skipping bootstrap");
            return Ok(false);
        }

        let admin = User {
            id: Uuid::new_v4().to_string(),
            email: config.admin_email.clone(),
            password_hash: hash_password(&config.admin_password)?,
            first_name: config.admin_first_name.clone(),
            last_name: config.admin_last_name.clone(),
            phone: "000000000".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1)
                .ok_or_else(|| AppError::internal("Invalid bootstrap birth date"))?,
            role: UserRole::Admin,
            registered_at: Utc::now(),
            last_seen_at: Utc::now(),
            active: true,
        };

        let admin = self.store.insert_user(admin).await?;
        info!("Default administrator account created: {}", admin.email);
        Ok(true)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}
