use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::response::{ApiError, AppJson, AppQuery, JSend};
use crate::auth::{AdminUser, AuthUser};
use crate::object_store::key_from_url;
use crate::storage::models::{DocType, DocumentRecord, FileKind, ReviewStatus};
use crate::AppState;

use super::subjects::DeleteResponse;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub approved_by: Option<String>,
    pub approved_by_name: Option<String>,
    pub created_at: String,
    pub description: Option<String>,
    pub file_type: FileKind,
    pub file_url: String,
    pub id: String,
    pub status: ReviewStatus,
    pub subject: String,
    /// None when the referenced subject has since been deleted.
    pub subject_name: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub uploaded_by: String,
    pub uploaded_by_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListDocumentsParams {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "type")]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
    pub status: ReviewStatus,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppQuery(params): AppQuery<ListDocumentsParams>,
) -> Result<Json<JSend<Vec<DocumentResponse>>>, ApiError> {
    let doc_type = match params.doc_type.as_deref() {
        Some(s) => Some(
            DocType::parse(s)
                .ok_or_else(|| ApiError::bad_request("type must be one of: notes, papers"))?,
        ),
        None => None,
    };
    let status = match params.status.as_deref() {
        Some(s) => Some(ReviewStatus::parse(s).ok_or_else(|| {
            ApiError::bad_request("status must be one of: pending, approved, rejected")
        })?),
        None => None,
    };

    let documents = state
        .db
        .list_documents(params.subject.as_deref(), doc_type, status)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    // Resolve subject names in one pass
    let subject_names: HashMap<String, String> = state
        .db
        .list_subjects()
        .map_err(|e| ApiError::internal(e.to_string()))?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let items = documents
        .iter()
        .map(|d| document_to_response(d, subject_names.get(&d.subject_id).cloned()))
        .collect();

    Ok(JSend::success(items))
}

pub async fn get_document(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<JSend<DocumentResponse>>, ApiError> {
    let document = state
        .db
        .get_document(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;

    let subject_name = state
        .db
        .get_subject(&document.subject_id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map(|s| s.name);

    Ok(JSend::success(document_to_response(&document, subject_name)))
}

pub async fn create_document(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<JSend<DocumentResponse>>), ApiError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut subject: Option<String> = None;
    let mut doc_type: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut file_data: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

                if data.len() as u64 > state.config.max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "File exceeds maximum upload size of {} bytes",
                        state.config.max_upload_size
                    )));
                }

                file_data = Some(data);
            }
            "title" => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid title: {e}")))?,
                );
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid description: {e}")))?,
                );
            }
            "subject" => {
                subject = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid subject: {e}")))?,
                );
            }
            "type" => {
                doc_type = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid type: {e}")))?,
                );
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let title = title.ok_or_else(|| ApiError::bad_request("title field is required"))?;
    if title.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }

    let subject = subject.ok_or_else(|| ApiError::bad_request("subject field is required"))?;
    let doc_type = doc_type.ok_or_else(|| ApiError::bad_request("type field is required"))?;
    let doc_type = DocType::parse(&doc_type)
        .ok_or_else(|| ApiError::bad_request("type must be one of: notes, papers"))?;

    let file_data = file_data.ok_or_else(|| ApiError::bad_request("file field is required"))?;
    let file_name = file_name.ok_or_else(|| ApiError::bad_request("file must have a filename"))?;

    // Reject anything that isn't a PDF or DOCX before a record exists
    let file_kind = FileKind::from_filename(&file_name).ok_or_else(|| {
        ApiError::bad_request("Invalid file type. Only PDF and DOCX files are allowed.")
    })?;

    // The subject must exist at creation time; it is not re-validated after.
    let subject_record = state
        .db
        .get_subject(&subject)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::bad_request("subject does not exist"))?;

    let id = uuid::Uuid::new_v4().to_string();
    let key = format!("{id}.{}", file_kind.extension());

    // Phase 1: store the payload; the backend hands back the resolvable URL
    let file_url = state
        .object_store
        .put(&key, file_data)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store file: {e}")))?;

    // Phase 2: write the metadata record
    let document = DocumentRecord {
        id: id.clone(),
        title,
        description,
        subject_id: subject,
        doc_type,
        file_url,
        file_kind,
        uploaded_by: user.id,
        uploaded_by_name: user.name,
        status: ReviewStatus::Pending,
        approved_by: None,
        approved_by_name: None,
        created_at: Utc::now(),
    };

    if let Err(e) = state.db.put_document(&document) {
        // Best-effort cleanup of the stored blob
        let _ = state.object_store.delete(&key).await;
        return Err(ApiError::internal(e.to_string()));
    }

    tracing::debug!(document_id = %id, title = %document.title, "Created document");

    Ok((
        StatusCode::CREATED,
        JSend::success(document_to_response(&document, Some(subject_record.name))),
    ))
}

pub async fn update_document_status(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> Result<Json<JSend<DocumentResponse>>, ApiError> {
    let document = state
        .db
        .set_document_status(&id, req.status, &admin.id, &admin.name)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;

    let subject_name = state
        .db
        .get_subject(&document.subject_id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map(|s| s.name);

    tracing::debug!(document_id = %id, status = %req.status.as_str(), "Updated document status");
    Ok(JSend::success(document_to_response(&document, subject_name)))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<JSend<DeleteResponse>>, ApiError> {
    let document = state
        .db
        .get_document(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;

    // Phase 1: delete the stored object, keyed by the URL's last segment
    let key = key_from_url(&document.file_url)
        .ok_or_else(|| ApiError::internal("Document has a malformed file URL"))?;
    state
        .object_store
        .delete(key)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete stored file: {e}")))?;

    // Phase 2: remove the metadata record. The two deletes are not
    // transactional: a failure here leaves the object gone and the record
    // behind, with no reconciliation.
    let deleted = state
        .db
        .delete_document(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !deleted {
        return Err(ApiError::not_found("Document not found"));
    }

    tracing::debug!(document_id = %id, "Deleted document");
    Ok(JSend::success(DeleteResponse {
        message: "Document deleted successfully".to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn document_to_response(document: &DocumentRecord, subject_name: Option<String>) -> DocumentResponse {
    DocumentResponse {
        approved_by: document.approved_by.clone(),
        approved_by_name: document.approved_by_name.clone(),
        created_at: document.created_at.to_rfc3339(),
        description: document.description.clone(),
        file_type: document.file_kind,
        file_url: document.file_url.clone(),
        id: document.id.clone(),
        status: document.status,
        subject: document.subject_id.clone(),
        subject_name,
        title: document.title.clone(),
        doc_type: document.doc_type,
        uploaded_by: document.uploaded_by.clone(),
        uploaded_by_name: document.uploaded_by_name.clone(),
    }
}
