#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::RwLock;

use quiz_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Quiz, QuizChanges, QuizDetail, QuizType, QuizTypeChanges, Role, User, UserChanges,
        UserProfile, UserSummary,
    },
    repositories::{
        quiz_type_repository::DUPLICATE_NAME_MESSAGE, QuizRepository, QuizTypeRepository,
        UserRepository,
    },
};

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quiz-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from("integration_test_secret_0123456789abcdef".to_string()),
        jwt_expiration_hours: 10,
        bcrypt_cost: 4,
    }
}

/// Shared collections behind the in-memory repositories, so joins across
/// collections behave like the `$lookup` stages of the Mongo repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub users: Arc<RwLock<HashMap<ObjectId, User>>>,
    pub roles: Arc<RwLock<HashMap<ObjectId, Role>>>,
    pub quizzes: Arc<RwLock<HashMap<ObjectId, Quiz>>>,
    pub quiz_types: Arc<RwLock<HashMap<ObjectId, QuizType>>>,
}

impl InMemoryStore {
    pub async fn insert_role(&self, name: &str) -> ObjectId {
        let role = Role {
            id: ObjectId::new(),
            name: name.to_string(),
        };
        let id = role.id;
        self.roles.write().await.insert(id, role);
        id
    }
}

pub fn test_state() -> (AppState, InMemoryStore) {
    let store = InMemoryStore::default();
    let state = AppState::with_repositories(
        test_config(),
        Arc::new(InMemoryUserRepository(store.clone())),
        Arc::new(InMemoryQuizRepository(store.clone())),
        Arc::new(InMemoryQuizTypeRepository(store.clone())),
    );
    (state, store)
}

/// Calls the service and returns the status with the body parsed as JSON.
pub async fn call_json<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body should be JSON")
    };
    (status, json)
}

pub struct InMemoryUserRepository(pub InMemoryStore);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.0.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.0.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_profile(&self, id: &ObjectId) -> AppResult<Option<UserProfile>> {
        let users = self.0.users.read().await;
        let Some(user) = users.get(id) else {
            return Ok(None);
        };

        let roles = self.0.roles.read().await;
        let role = user.role_id.and_then(|role_id| roles.get(&role_id).cloned());

        Ok(Some(UserProfile {
            id: user.id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            phone_no: user.phone_no,
            email: user.email.clone(),
            gender: user.gender,
            role,
        }))
    }

    async fn find_all(&self) -> AppResult<Vec<UserSummary>> {
        let users = self.0.users.read().await;
        let mut items: Vec<UserSummary> = users.values().map(User::summary).collect();
        items.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(items)
    }

    async fn update(&self, id: &ObjectId, changes: UserChanges) -> AppResult<Option<User>> {
        let mut users = self.0.users.write().await;

        if let Some(email) = &changes.email {
            if users.values().any(|u| &u.email == email && u.id != *id) {
                return Err(AppError::DuplicateEmail);
            }
        }

        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(self.0.users.write().await.remove(id).is_some())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryQuizRepository(pub InMemoryStore);

impl InMemoryQuizRepository {
    async fn join(&self, quiz: Quiz) -> QuizDetail {
        let quiz_type = self.0.quiz_types.read().await.get(&quiz.quiz_type_id).cloned();
        QuizDetail::from_parts(quiz, quiz_type)
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.0.quizzes.write().await.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_detail(&self, id: &ObjectId, user_id: &ObjectId) -> AppResult<Option<QuizDetail>> {
        let quiz = self
            .0
            .quizzes
            .read()
            .await
            .get(id)
            .filter(|q| q.user_id == *user_id)
            .cloned();

        match quiz {
            Some(quiz) => Ok(Some(self.join(quiz).await)),
            None => Ok(None),
        }
    }

    async fn list_details_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<QuizDetail>> {
        let mut owned: Vec<Quiz> = self
            .0
            .quizzes
            .read()
            .await
            .values()
            .filter(|q| q.user_id == *user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut details = Vec::with_capacity(owned.len());
        for quiz in owned {
            details.push(self.join(quiz).await);
        }
        Ok(details)
    }

    async fn update(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
        changes: QuizChanges,
    ) -> AppResult<Option<Quiz>> {
        let mut quizzes = self.0.quizzes.write().await;
        match quizzes.get_mut(id).filter(|q| q.user_id == *user_id) {
            Some(quiz) => {
                changes.apply_to(quiz);
                Ok(Some(quiz.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ObjectId, user_id: &ObjectId) -> AppResult<bool> {
        let mut quizzes = self.0.quizzes.write().await;
        if quizzes.get(id).map(|q| q.user_id == *user_id).unwrap_or(false) {
            quizzes.remove(id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryQuizTypeRepository(pub InMemoryStore);

#[async_trait]
impl QuizTypeRepository for InMemoryQuizTypeRepository {
    async fn create(&self, quiz_type: QuizType) -> AppResult<QuizType> {
        let mut quiz_types = self.0.quiz_types.write().await;
        if quiz_types.values().any(|t| t.name == quiz_type.name) {
            return Err(AppError::AlreadyExists(DUPLICATE_NAME_MESSAGE.to_string()));
        }
        quiz_types.insert(quiz_type.id, quiz_type.clone());
        Ok(quiz_type)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<QuizType>> {
        Ok(self.0.quiz_types.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<QuizType>> {
        let mut items: Vec<QuizType> = self.0.quiz_types.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn update(&self, id: &ObjectId, changes: QuizTypeChanges) -> AppResult<Option<QuizType>> {
        let mut quiz_types = self.0.quiz_types.write().await;

        if let Some(name) = &changes.name {
            if quiz_types.values().any(|t| &t.name == name && t.id != *id) {
                return Err(AppError::AlreadyExists(DUPLICATE_NAME_MESSAGE.to_string()));
            }
        }

        match quiz_types.get_mut(id) {
            Some(quiz_type) => {
                changes.apply_to(quiz_type);
                Ok(Some(quiz_type.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(self.0.quiz_types.write().await.remove(id).is_some())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
