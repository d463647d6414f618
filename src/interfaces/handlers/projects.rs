use actix_web::{web, Responder};
use tracing::instrument;

use crate::{
    entities::{
        api::ApiResponse,
        project::{NewProjectRequest, ProjectFilter, UpdateProjectRequest},
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_projects(
    state: web::Data<AppState>,
    filter: web::Query<ProjectFilter>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(&filter).await?;

    Ok(ApiResponse::ok(projects))
}

#[instrument(skip(state))]
pub async fn get_project(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let detail = state.project_handler.get_project_detail(&id).await?;

    Ok(ApiResponse::ok(detail))
}

#[instrument(skip(claims, state, data), fields(admin = %claims.0.sub))]
pub async fn create_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create_project(data.into_inner()).await?;

    Ok(ApiResponse::created(project))
}

#[instrument(skip(claims, state, data), fields(admin = %claims.0.sub))]
pub async fn update_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .update_project(&id, data.into_inner())
        .await?;

    Ok(ApiResponse::ok(project))
}

#[instrument(skip(claims, state), fields(admin = %claims.0.sub))]
pub async fn delete_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.delete_project(&id).await?;

    Ok(ApiResponse::ok(response))
}
