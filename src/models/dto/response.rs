use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Gender, Quiz, QuizDetail, QuizType, User, UserProfile, UserSummary};

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// Public view of a user. Never carries the password.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<i64>,
    pub email: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
}

impl From<UserSummary> for UserDto {
    fn from(user: UserSummary) -> Self {
        UserDto {
            id: user.id.to_hex(),
            firstname: user.firstname,
            lastname: user.lastname,
            phone_no: user.phone_no,
            email: user.email,
            gender: user.gender,
            role_id: user.role_id.map(|id| id.to_hex()),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        user.summary().into()
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: Gender,
    pub phone_no: Option<i64>,
    pub role: Option<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        ProfileResponse {
            id: profile.id.to_hex(),
            firstname: profile.firstname,
            lastname: profile.lastname,
            email: profile.email,
            gender: profile.gender,
            phone_no: profile.phone_no,
            role: profile.role.map(|role| role.name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizDto {
    pub id: String,
    pub user_id: String,
    pub quiz_type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_type_name: Option<String>,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
    pub result_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QuizDetail> for QuizDto {
    fn from(quiz: QuizDetail) -> Self {
        QuizDto {
            id: quiz.id.to_hex(),
            user_id: quiz.user_id.to_hex(),
            quiz_type_id: quiz.quiz_type_id.to_hex(),
            quiz_type_name: quiz.quiz_type.map(|t| t.name),
            question_id: quiz.question_id.map(|id| id.to_hex()),
            answer_id: quiz.answer_id.map(|id| id.to_hex()),
            result_id: quiz.result_id.map(|id| id.to_hex()),
            created_at: quiz.created_at,
            updated_at: quiz.updated_at,
        }
    }
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDetail::from_parts(quiz, None).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizTypeDto {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub question_id: Option<String>,
    pub answer_id: Option<String>,
    pub result_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QuizType> for QuizTypeDto {
    fn from(quiz_type: QuizType) -> Self {
        QuizTypeDto {
            id: quiz_type.id.to_hex(),
            name: quiz_type.name,
            user_id: quiz_type.user_id.to_hex(),
            question_id: quiz_type.question_id.map(|id| id.to_hex()),
            answer_id: quiz_type.answer_id.map(|id| id.to_hex()),
            result_id: quiz_type.result_id.map(|id| id.to_hex()),
            created_at: quiz_type.created_at,
            updated_at: quiz_type.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Role;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_dto_omits_password() {
        let user = User::new("John", "Doe", "john@example.com", "$2b$secret", Gender::Male);
        let json = serde_json::to_value(UserDto::from(user.clone())).unwrap();

        assert_eq!(json["id"], user.id.to_hex());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_profile_response_uses_role_name() {
        let profile = UserProfile {
            id: ObjectId::new(),
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            phone_no: None,
            email: "ada@example.com".to_string(),
            gender: Gender::Female,
            role: Some(Role {
                id: ObjectId::new(),
                name: "admin".to_string(),
            }),
        };

        let response = ProfileResponse::from(profile);
        assert_eq!(response.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_quiz_dto_includes_type_name_when_joined() {
        let owner = ObjectId::new();
        let quiz_type = QuizType::new("History", owner);
        let quiz = Quiz::new(owner, quiz_type.id);

        let joined = QuizDto::from(QuizDetail::from_parts(quiz.clone(), Some(quiz_type)));
        assert_eq!(joined.quiz_type_name.as_deref(), Some("History"));

        let plain = QuizDto::from(quiz);
        assert!(plain.quiz_type_name.is_none());
    }
}
