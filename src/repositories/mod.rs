pub mod quiz_repository;
pub mod quiz_type_repository;
pub mod user_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_type_repository::{MongoQuizTypeRepository, QuizTypeRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use quiz_type_repository::MockQuizTypeRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
