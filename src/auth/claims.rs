use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Gender, User},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String, // User ObjectId as hex
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: Gender,
    pub phone_no: Option<i64>,
    pub role_id: Option<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> AppResult<Self> {
        let now = Utc::now();
        let exp = Duration::try_hours(expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .filter(|exp| *exp > now)
            .ok_or_else(|| {
                AppError::ServerMisconfiguration(format!(
                    "Token lifetime of {} hours is out of range",
                    expiration_hours
                ))
            })?;

        Ok(Self {
            id: user.id.to_hex(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            gender: user.gender,
            phone_no: user.phone_no,
            role_id: user.role_id.map(|id| id.to_hex()),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        })
    }
}
