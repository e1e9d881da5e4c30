use std::sync::Arc;

use crate::{
    auth::{JwtService, PasswordHasher},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoQuizTypeRepository, MongoUserRepository, QuizRepository,
        QuizTypeRepository, UserRepository,
    },
    services::{
        quiz_service::QuizService, quiz_type_service::QuizTypeService, user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_type_service: Arc<QuizTypeService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let quiz_type_repository = Arc::new(MongoQuizTypeRepository::new(&db));
        quiz_type_repository.ensure_indexes().await?;

        Ok(Self::with_repositories(
            config,
            user_repository,
            quiz_repository,
            quiz_type_repository,
        ))
    }

    /// Wires services over any repository implementation.
    pub fn with_repositories(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        quiz_type_repository: Arc<dyn QuizTypeRepository>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));
        let hasher = PasswordHasher::new(config.bcrypt_cost);

        let user_service = Arc::new(UserService::new(
            user_repository,
            Arc::clone(&jwt_service),
            hasher,
        ));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            Arc::clone(&quiz_type_repository),
        ));
        let quiz_type_service = Arc::new(QuizTypeService::new(quiz_type_repository));

        Self {
            user_service,
            quiz_service,
            quiz_type_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
