use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::not_found_as;
use crate::api::schemas::{UserCreate, UserOut};
use crate::api::extract::{AppJson, AppPath};
use crate::api::state::AppState;
use crate::database;
use crate::error::AppError;

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<UserCreate>,
) -> Result<(StatusCode, Json<UserOut>), AppError> {
    request.validate()?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    let user = database::create_user(state.pool()?, name).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserOut>>, AppError> {
    let users = database::list_users(state.pool()?).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<UserOut>, AppError> {
    let user = database::get_user(state.pool()?, user_id)
        .await
        .map_err(not_found_as(format!("User {} not found", user_id)))?;
    Ok(Json(user.into()))
}
