pub mod quiz_service;
pub mod quiz_type_service;
pub mod user_service;
