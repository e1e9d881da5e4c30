use actix_web::{delete, get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::UpdateUserRequest,
};

// Mounted under the authenticated "/me" scope.
#[get("")]
pub async fn get_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_profile(&auth.0.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("")]
pub async fn update_me(
    state: web::Data<AppState>,
    request: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .user_service
        .update_user(&auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("")]
pub async fn delete_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.delete_user(&auth.0.id).await?;
    Ok(HttpResponse::Ok().json(response))
}

// TODO: gate behind an admin role once role names are settled.
#[get("/users")]
pub async fn get_all_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.user_service.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
