use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizType {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String, // Unique across the collection
    pub user_id: ObjectId,
    #[serde(default)]
    pub question_id: Option<ObjectId>,
    #[serde(default)]
    pub answer_id: Option<ObjectId>,
    #[serde(default)]
    pub result_id: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizType {
    pub fn new(name: &str, user_id: ObjectId) -> Self {
        let now = Utc::now();
        QuizType {
            id: ObjectId::new(),
            name: name.to_string(),
            user_id,
            question_id: None,
            answer_id: None,
            result_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuizTypeChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuizTypeChanges {
    pub fn apply_to(self, quiz_type: &mut QuizType) {
        if let Some(name) = self.name {
            quiz_type.name = name;
        }
        if let Some(question_id) = self.question_id {
            quiz_type.question_id = Some(question_id);
        }
        if let Some(answer_id) = self.answer_id {
            quiz_type.answer_id = Some(answer_id);
        }
        if let Some(result_id) = self.result_id {
            quiz_type.result_id = Some(result_id);
        }
        if let Some(updated_at) = self.updated_at {
            quiz_type.updated_at = updated_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_apply_to_quiz_type() {
        let mut quiz_type = QuizType::new("Science", ObjectId::new());
        let question_id = ObjectId::new();

        QuizTypeChanges {
            name: Some("Physics".to_string()),
            question_id: Some(question_id),
            ..Default::default()
        }
        .apply_to(&mut quiz_type);

        assert_eq!(quiz_type.name, "Physics");
        assert_eq!(quiz_type.question_id, Some(question_id));
        assert!(quiz_type.answer_id.is_none());
    }
}
