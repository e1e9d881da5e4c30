pub mod quiz;
pub mod quiz_type;
pub mod role;
pub mod user;
pub use quiz::{Quiz, QuizChanges, QuizDetail};
pub use quiz_type::{QuizType, QuizTypeChanges};
pub use role::Role;
pub use user::{Gender, User, UserChanges, UserProfile, UserSummary};
