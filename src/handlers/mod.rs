pub mod auth_handler;
pub mod quiz_handler;
pub mod quiz_type_handler;
pub mod user_handler;

use actix_web::web;

use crate::{app_state::AppState, auth::AuthMiddleware, errors::AppError};

/// Rejected JSON bodies (syntax, missing fields, unknown enum values) are
/// reported in the same `{ "errors": [...] }` shape as validator failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation("body", err.to_string()).into()
    })
}

/// Registers application state and every route. Register and login, the
/// user list and health are public; everything else sits behind
/// [`AuthMiddleware`].
pub fn configure(cfg: &mut web::ServiceConfig, state: AppState) {
    cfg.app_data(web::Data::new(state))
        .app_data(json_config())
        .service(user_handler::health_check)
        .service(auth_handler::register)
        .service(auth_handler::login)
        .service(user_handler::get_all_users)
        .service(
            web::scope("/me")
                .wrap(AuthMiddleware)
                .service(user_handler::get_me)
                .service(user_handler::update_me)
                .service(user_handler::delete_me),
        )
        .service(
            web::scope("/quiz-types")
                .wrap(AuthMiddleware)
                .service(quiz_type_handler::create_quiz_type)
                .service(quiz_type_handler::list_quiz_types)
                .service(quiz_type_handler::get_quiz_type)
                .service(quiz_type_handler::update_quiz_type)
                .service(quiz_type_handler::delete_quiz_type),
        )
        .service(
            web::scope("/quiz")
                .wrap(AuthMiddleware)
                .service(quiz_handler::create_quiz)
                .service(quiz_handler::list_quizzes)
                .service(quiz_handler::get_quiz)
                .service(quiz_handler::update_quiz)
                .service(quiz_handler::delete_quiz),
        );
}
