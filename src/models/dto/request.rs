use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Gender;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub firstname: String,

    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub lastname: String,

    #[serde(default, alias = "phone_number")]
    #[validate(range(min = 0, message = "Phone number must not be negative"))]
    pub phone_no: Option<i64>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub gender: Gender,

    #[serde(default)]
    pub role_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Partial update of the caller's own record. `role_id` is deliberately
/// absent: roles are not self-assignable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "First name cannot be empty"))]
    pub firstname: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name cannot be empty"))]
    pub lastname: Option<String>,

    #[serde(default, alias = "phone_number")]
    #[validate(range(min = 0, message = "Phone number must not be negative"))]
    pub phone_no: Option<i64>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, message = "Quiz type is required"))]
    pub quiz_type_id: String,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
    pub result_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    pub quiz_type_id: Option<String>,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
    pub result_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Quiz type name is required"))]
    pub name: String,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
    pub result_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuizTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Quiz type name cannot be empty"))]
    pub name: Option<String>,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
    pub result_id: Option<String>,
}
