//! bcrypt hashing, run on the blocking pool so request workers are not
//! stalled by the work factor.

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Unexpected(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AppError::Unexpected(format!("Failed to hash password: {}", e)))
    }

    /// Constant-time comparison of `password` against a stored bcrypt hash.
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Unexpected(format!("Password verify task failed: {}", e)))?
            .map_err(|e| AppError::Unexpected(format!("Failed to verify password: {}", e)))
    }
}
