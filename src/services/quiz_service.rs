use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    db::{parse_object_id, parse_optional_id},
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizChanges, QuizDetail},
        dto::{
            request::{CreateQuizRequest, UpdateQuizRequest},
            response::{MessageResponse, QuizDto},
        },
    },
    repositories::{QuizRepository, QuizTypeRepository},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    quiz_types: Arc<dyn QuizTypeRepository>,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        quiz_types: Arc<dyn QuizTypeRepository>,
    ) -> Self {
        Self {
            repository,
            quiz_types,
        }
    }

    pub async fn create_quiz(&self, user_id: &str, request: CreateQuizRequest) -> AppResult<QuizDto> {
        let user_id = parse_object_id(user_id, "user")?;
        request.validate()?;

        let quiz_type_id = parse_object_id(&request.quiz_type_id, "quiz type")?;
        self.require_quiz_type(&quiz_type_id).await?;

        let mut quiz = Quiz::new(user_id, quiz_type_id);
        quiz.question_id = parse_optional_id(request.question_id.as_deref(), "question")?;
        quiz.answer_id = parse_optional_id(request.answer_id.as_deref(), "answer")?;
        quiz.result_id = parse_optional_id(request.result_id.as_deref(), "result")?;

        let quiz = self.repository.create(quiz).await?;
        self.detail_or_plain(quiz).await
    }

    pub async fn list_quizzes(&self, user_id: &str) -> AppResult<Vec<QuizDto>> {
        let user_id = parse_object_id(user_id, "user")?;
        let quizzes = self.repository.list_details_by_user(&user_id).await?;
        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }

    pub async fn get_quiz(&self, user_id: &str, id: &str) -> AppResult<QuizDto> {
        let user_id = parse_object_id(user_id, "user")?;
        let id = parse_object_id(id, "quiz")?;

        let quiz = self
            .repository
            .find_detail(&id, &user_id)
            .await?
            .ok_or_else(quiz_not_found)?;

        Ok(quiz.into())
    }

    pub async fn update_quiz(
        &self,
        user_id: &str,
        id: &str,
        request: UpdateQuizRequest,
    ) -> AppResult<QuizDto> {
        let user_id = parse_object_id(user_id, "user")?;
        let id = parse_object_id(id, "quiz")?;
        request.validate()?;

        let quiz_type_id = parse_optional_id(request.quiz_type_id.as_deref(), "quiz type")?;
        if let Some(quiz_type_id) = &quiz_type_id {
            self.require_quiz_type(quiz_type_id).await?;
        }

        let changes = QuizChanges {
            quiz_type_id,
            question_id: parse_optional_id(request.question_id.as_deref(), "question")?,
            answer_id: parse_optional_id(request.answer_id.as_deref(), "answer")?,
            result_id: parse_optional_id(request.result_id.as_deref(), "result")?,
            updated_at: None,
        };

        if changes == QuizChanges::default() {
            return Err(AppError::validation(
                "body",
                "At least one field must be provided",
            ));
        }

        let changes = QuizChanges {
            updated_at: Some(Utc::now()),
            ..changes
        };

        let quiz = self
            .repository
            .update(&id, &user_id, changes)
            .await?
            .ok_or_else(quiz_not_found)?;

        self.detail_or_plain(quiz).await
    }

    pub async fn delete_quiz(&self, user_id: &str, id: &str) -> AppResult<MessageResponse> {
        let user_id = parse_object_id(user_id, "user")?;
        let id = parse_object_id(id, "quiz")?;

        if !self.repository.delete(&id, &user_id).await? {
            return Err(quiz_not_found());
        }

        Ok(MessageResponse::new("Quiz deleted successfully"))
    }

    async fn require_quiz_type(&self, quiz_type_id: &ObjectId) -> AppResult<()> {
        if self.quiz_types.find_by_id(quiz_type_id).await?.is_none() {
            return Err(AppError::validation(
                "quiz_type_id",
                "Quiz type does not exist",
            ));
        }
        Ok(())
    }

    async fn detail_or_plain(&self, quiz: Quiz) -> AppResult<QuizDto> {
        let detail = self.repository.find_detail(&quiz.id, &quiz.user_id).await?;
        Ok(detail
            .unwrap_or_else(|| QuizDetail::from_parts(quiz, None))
            .into())
    }
}

fn quiz_not_found() -> AppError {
    AppError::NotFound("Quiz not found".to_string())
}
