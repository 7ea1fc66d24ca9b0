use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, JSend};
use crate::auth::{AdminUser, AuthUser};
use crate::storage::models::SubjectRecord;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SubjectResponse {
    pub created_at: String,
    pub description: Option<String>,
    pub id: String,
    pub name: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SubjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<Json<JSend<Vec<SubjectResponse>>>, ApiError> {
    let subjects = state
        .db
        .list_subjects()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(JSend::success(
        subjects.iter().map(subject_to_response).collect(),
    ))
}

pub async fn get_subject(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<JSend<SubjectResponse>>, ApiError> {
    let subject = state
        .db
        .get_subject(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    Ok(JSend::success(subject_to_response(&subject)))
}

pub async fn create_subject(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    AppJson(req): AppJson<SubjectRequest>,
) -> Result<(StatusCode, Json<JSend<SubjectResponse>>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("name must not be empty"));
    }

    let now = Utc::now();
    let subject = SubjectRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.name,
        description: req.description,
        created_at: now,
        updated_at: now,
    };

    state
        .db
        .put_subject(&subject)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::debug!(subject_id = %subject.id, name = %subject.name, "Created subject");

    Ok((
        StatusCode::CREATED,
        JSend::success(subject_to_response(&subject)),
    ))
}

pub async fn update_subject(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<SubjectRequest>,
) -> Result<Json<JSend<SubjectResponse>>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("name must not be empty"));
    }

    let subject = state
        .db
        .update_subject(&id, &req.name, req.description.as_deref())
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    tracing::debug!(subject_id = %id, "Updated subject");
    Ok(JSend::success(subject_to_response(&subject)))
}

pub async fn delete_subject(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<JSend<DeleteResponse>>, ApiError> {
    // No cascade: documents referencing this subject keep their reference.
    let deleted = state
        .db
        .delete_subject(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("Subject not found"));
    }

    tracing::debug!(subject_id = %id, "Deleted subject");
    Ok(JSend::success(DeleteResponse {
        message: "Subject deleted successfully".to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn subject_to_response(subject: &SubjectRecord) -> SubjectResponse {
    SubjectResponse {
        created_at: subject.created_at.to_rfc3339(),
        description: subject.description.clone(),
        id: subject.id.clone(),
        name: subject.name.clone(),
        updated_at: subject.updated_at.to_rfc3339(),
    }
}
