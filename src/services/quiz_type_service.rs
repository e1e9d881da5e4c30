use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    db::{parse_object_id, parse_optional_id},
    errors::{AppError, AppResult},
    models::{
        domain::{QuizType, QuizTypeChanges},
        dto::{
            request::{CreateQuizTypeRequest, UpdateQuizTypeRequest},
            response::{MessageResponse, QuizTypeDto},
        },
    },
    repositories::QuizTypeRepository,
};

pub struct QuizTypeService {
    repository: Arc<dyn QuizTypeRepository>,
}

impl QuizTypeService {
    pub fn new(repository: Arc<dyn QuizTypeRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_quiz_type(
        &self,
        user_id: &str,
        request: CreateQuizTypeRequest,
    ) -> AppResult<QuizTypeDto> {
        let user_id = parse_object_id(user_id, "user")?;
        request.validate()?;

        let mut quiz_type = QuizType::new(request.name.trim(), user_id);
        quiz_type.question_id = parse_optional_id(request.question_id.as_deref(), "question")?;
        quiz_type.answer_id = parse_optional_id(request.answer_id.as_deref(), "answer")?;
        quiz_type.result_id = parse_optional_id(request.result_id.as_deref(), "result")?;

        let quiz_type = self.repository.create(quiz_type).await?;
        log::info!("Created quiz type '{}'", quiz_type.name);

        Ok(quiz_type.into())
    }

    pub async fn list_quiz_types(&self) -> AppResult<Vec<QuizTypeDto>> {
        let items = self.repository.find_all().await?;
        Ok(items.into_iter().map(QuizTypeDto::from).collect())
    }

    pub async fn get_quiz_type(&self, id: &str) -> AppResult<QuizTypeDto> {
        let id = parse_object_id(id, "quiz type")?;

        let quiz_type = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(quiz_type_not_found)?;

        Ok(quiz_type.into())
    }

    pub async fn update_quiz_type(
        &self,
        id: &str,
        request: UpdateQuizTypeRequest,
    ) -> AppResult<QuizTypeDto> {
        let id = parse_object_id(id, "quiz type")?;
        request.validate()?;

        let changes = QuizTypeChanges {
            name: request.name.map(|name| name.trim().to_string()),
            question_id: parse_optional_id(request.question_id.as_deref(), "question")?,
            answer_id: parse_optional_id(request.answer_id.as_deref(), "answer")?,
            result_id: parse_optional_id(request.result_id.as_deref(), "result")?,
            updated_at: None,
        };

        if changes == QuizTypeChanges::default() {
            return Err(AppError::validation(
                "body",
                "At least one field must be provided",
            ));
        }

        let changes = QuizTypeChanges {
            updated_at: Some(Utc::now()),
            ..changes
        };

        let quiz_type = self
            .repository
            .update(&id, changes)
            .await?
            .ok_or_else(quiz_type_not_found)?;

        Ok(quiz_type.into())
    }

    pub async fn delete_quiz_type(&self, id: &str) -> AppResult<MessageResponse> {
        let id = parse_object_id(id, "quiz type")?;

        if !self.repository.delete(&id).await? {
            return Err(quiz_type_not_found());
        }

        Ok(MessageResponse::new("Quiz type deleted successfully"))
    }
}

fn quiz_type_not_found() -> AppError {
    AppError::NotFound("Quiz type not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{quiz_type_repository::DUPLICATE_NAME_MESSAGE, MockQuizTypeRepository};
    use mongodb::bson::oid::ObjectId;

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut repository = MockQuizTypeRepository::new();
        repository
            .expect_create()
            .withf(|quiz_type| quiz_type.name == "Math")
            .returning(|quiz_type| Ok(quiz_type));

        let dto = QuizTypeService::new(Arc::new(repository))
            .create_quiz_type(
                &ObjectId::new().to_hex(),
                CreateQuizTypeRequest {
                    name: "  Math ".to_string(),
                    question_id: None,
                    answer_id: None,
                    result_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(dto.name, "Math");
    }

    #[tokio::test]
    async fn test_create_propagates_duplicate_name() {
        let mut repository = MockQuizTypeRepository::new();
        repository
            .expect_create()
            .returning(|_| Err(AppError::AlreadyExists(DUPLICATE_NAME_MESSAGE.to_string())));

        let result = QuizTypeService::new(Arc::new(repository))
            .create_quiz_type(
                &ObjectId::new().to_hex(),
                CreateQuizTypeRequest {
                    name: "Math".to_string(),
                    question_id: None,
                    answer_id: None,
                    result_id: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_missing_quiz_type_is_not_found() {
        let mut repository = MockQuizTypeRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let result = QuizTypeService::new(Arc::new(repository))
            .get_quiz_type(&ObjectId::new().to_hex())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
