use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{JwtService, PasswordHasher},
    db::parse_object_id,
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserChanges},
        dto::{
            request::{LoginRequest, RegisterRequest, UpdateUserRequest},
            response::{
                LoginResponse, MessageResponse, ProfileResponse, RegisterResponse,
                UpdateUserResponse, UserDto,
            },
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        jwt_service: Arc<JwtService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            jwt_service,
            hasher,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        request.validate()?;

        let role_id = request
            .role_id
            .as_deref()
            .map(|raw| parse_object_id(raw, "role"))
            .transpose()?;

        // The unique index still has the final say when two registrations race.
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&request.password).await?;

        let mut user = User::new(
            &request.firstname,
            &request.lastname,
            &request.email,
            &password_hash,
            request.gender,
        );
        user.phone_no = request.phone_no;
        user.role_id = role_id;

        let user = self.repository.create(user).await?;
        log::info!("Registered user {}", user.id);

        Ok(RegisterResponse {
            user_id: user.id.to_hex(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let Some(user) = self.repository.find_by_email(&request.email).await? else {
            log::debug!("Login rejected: no account for the supplied email");
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(&request.password, &user.password).await? {
            log::debug!("Login rejected: wrong password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.create_token(&user)?;
        Ok(LoginResponse { token })
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<ProfileResponse> {
        let id = parse_object_id(user_id, "user")?;

        let profile = self
            .repository
            .find_profile(&id)
            .await?
            .ok_or_else(user_not_found)?;

        Ok(profile.into())
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UpdateUserResponse> {
        let id = parse_object_id(user_id, "user")?;
        request.validate()?;

        let password = match request.password.as_deref() {
            Some(plain) => Some(self.hasher.hash(plain).await?),
            None => None,
        };

        let changes = UserChanges {
            firstname: request.firstname,
            lastname: request.lastname,
            phone_no: request.phone_no,
            email: request.email,
            password,
            gender: request.gender,
        };

        if changes.is_empty() {
            return Err(AppError::validation(
                "body",
                "At least one field must be provided",
            ));
        }

        let user = self
            .repository
            .update(&id, changes)
            .await?
            .ok_or_else(user_not_found)?;

        Ok(UpdateUserResponse {
            message: "User updated successfully".to_string(),
            user: user.into(),
        })
    }

    pub async fn delete_user(&self, user_id: &str) -> AppResult<MessageResponse> {
        let id = parse_object_id(user_id, "user")?;

        if !self.repository.delete(&id).await? {
            return Err(user_not_found());
        }

        log::info!("Deleted user {}", id);
        Ok(MessageResponse::new("User deleted successfully"))
    }

    pub async fn get_all_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}
