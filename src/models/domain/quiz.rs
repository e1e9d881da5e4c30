use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_type::QuizType;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,      // Owner, taken from the token
    pub quiz_type_id: ObjectId, // Must reference an existing quiz type
    #[serde(default)]
    pub question_id: Option<ObjectId>,
    #[serde(default)]
    pub answer_id: Option<ObjectId>,
    #[serde(default)]
    pub result_id: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(user_id: ObjectId, quiz_type_id: ObjectId) -> Self {
        let now = Utc::now();
        Quiz {
            id: ObjectId::new(),
            user_id,
            quiz_type_id,
            question_id: None,
            answer_id: None,
            result_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A quiz joined with its quiz type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct QuizDetail {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub quiz_type_id: ObjectId,
    #[serde(default)]
    pub question_id: Option<ObjectId>,
    #[serde(default)]
    pub answer_id: Option<ObjectId>,
    #[serde(default)]
    pub result_id: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub quiz_type: Option<QuizType>,
}

impl QuizDetail {
    pub fn from_parts(quiz: Quiz, quiz_type: Option<QuizType>) -> Self {
        QuizDetail {
            id: quiz.id,
            user_id: quiz.user_id,
            quiz_type_id: quiz.quiz_type_id,
            question_id: quiz.question_id,
            answer_id: quiz.answer_id,
            result_id: quiz.result_id,
            created_at: quiz.created_at,
            updated_at: quiz.updated_at,
            quiz_type,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuizChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_type_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuizChanges {
    pub fn apply_to(self, quiz: &mut Quiz) {
        if let Some(quiz_type_id) = self.quiz_type_id {
            quiz.quiz_type_id = quiz_type_id;
        }
        if let Some(question_id) = self.question_id {
            quiz.question_id = Some(question_id);
        }
        if let Some(answer_id) = self.answer_id {
            quiz.answer_id = Some(answer_id);
        }
        if let Some(result_id) = self.result_id {
            quiz.result_id = Some(result_id);
        }
        if let Some(updated_at) = self.updated_at {
            quiz.updated_at = updated_at;
        }
    }
}
