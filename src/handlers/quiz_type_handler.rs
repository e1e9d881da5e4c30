use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CreateQuizTypeRequest, UpdateQuizTypeRequest},
};

#[post("")]
pub async fn create_quiz_type(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizTypeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz_type = state
        .quiz_type_service
        .create_quiz_type(&auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(quiz_type))
}

#[get("")]
pub async fn list_quiz_types(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quiz_types = state.quiz_type_service.list_quiz_types().await?;
    Ok(HttpResponse::Ok().json(quiz_types))
}

#[get("/{id}")]
pub async fn get_quiz_type(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz_type = state.quiz_type_service.get_quiz_type(&id).await?;
    Ok(HttpResponse::Ok().json(quiz_type))
}

#[put("/{id}")]
pub async fn update_quiz_type(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizTypeRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz_type = state
        .quiz_type_service
        .update_quiz_type(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz_type))
}

#[delete("/{id}")]
pub async fn delete_quiz_type(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_type_service.delete_quiz_type(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
