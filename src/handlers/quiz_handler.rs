use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CreateQuizRequest, UpdateQuizRequest},
};

#[post("")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .create_quiz(&auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes(&auth.0.id).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&auth.0.id, &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&auth.0.id, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.delete_quiz(&auth.0.id, &id).await?;
    Ok(HttpResponse::Ok().json(response))
}
