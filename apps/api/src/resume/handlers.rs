use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::resume::storage;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::users::store::{clear_resume, find_by_email, set_resume};

// Resume payloads keep the original snake_case field names.
#[derive(Debug, Serialize)]
pub struct ResumeUploadData {
    pub name: String,
    pub email: String,
    pub resume_url: String,
    pub file_name: String,
    pub file_size: usize,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub user_type: Role,
    pub resume_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeQuery {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteResumeRequest {
    pub email: String,
}

struct ResumeFile {
    file_name: String,
    content_type: String,
    data: Bytes,
}

/// Reads the multipart form, applying the upload filter (MIME allow-list and
/// size cap) at field-read time so a rejected upload has no side effects.
async fn read_upload_form(
    multipart: &mut Multipart,
) -> Result<(Option<String>, Option<ResumeFile>), AppError> {
    let mut email = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("email") => {
                email = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Malformed multipart request: {e}"))
                })?);
            }
            Some("resume") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "resume".to_string());
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .filter(|ct| storage::is_allowed_mime(ct))
                    .ok_or_else(|| {
                        AppError::Validation("Only PDF and DOCX files are allowed".to_string())
                    })?;
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Malformed multipart request: {e}"))
                })?;
                if data.len() > storage::MAX_RESUME_BYTES {
                    return Err(AppError::Validation(
                        "Resume file exceeds the 2MB size limit".to_string(),
                    ));
                }
                file = Some(ResumeFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    Ok((email, file))
}

/// POST /resume/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ResumeUploadData>>, AppError> {
    let (email, file) = read_upload_form(&mut multipart).await?;

    let email = match email {
        Some(email) if !email.is_empty() => email,
        _ => return Err(AppError::Validation("Email is required".to_string())),
    };
    let file = file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let user = find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found with this email".to_string()))?;

    match user.user_type {
        Role::Applicant => {}
        Role::Admin => {
            return Err(AppError::Forbidden(
                "Only applicants can upload resumes".to_string(),
            ))
        }
    }

    let uploaded_at = Utc::now();
    let file_name = storage::object_file_name(&email, &file.file_name, uploaded_at);
    let key = storage::object_key(&email, &file_name);
    let file_size = file.data.len();

    storage::put_object(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        file.data,
        &file.content_type,
    )
    .await?;

    let resume_url = storage::public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);

    // The object is already in the bucket; if the row update fails, delete it
    // again so storage and database stay consistent. The cleanup outcome is
    // reported next to the primary error, never in place of it.
    if let Err(db_err) = set_resume(&state.db, &email, &resume_url, &key).await {
        match storage::delete_object(&state.s3, &state.config.s3_bucket, &key).await {
            Ok(()) => {
                warn!("Rolled back resume object {key} after database failure");
                return Err(AppError::Internal(anyhow::anyhow!(
                    "Failed to update resume URL in database: {db_err} (uploaded object was removed)"
                )));
            }
            Err(cleanup_err) => {
                warn!("Could not roll back resume object {key}: {cleanup_err}");
                return Err(AppError::Internal(anyhow::anyhow!(
                    "Failed to update resume URL in database: {db_err} \
                     (orphaned object {key} could not be removed: {cleanup_err})"
                )));
            }
        }
    }

    Ok(Json(ApiResponse::new(
        "Resume uploaded successfully",
        ResumeUploadData {
            name: user.name,
            email: user.email,
            resume_url,
            file_name,
            file_size,
            uploaded_at,
        },
    )))
}

/// GET /resume/getResume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<ResumeQuery>,
) -> Result<Json<ApiResponse<ResumeData>>, AppError> {
    let email = match params.email {
        Some(email) if !email.is_empty() => email,
        _ => return Err(AppError::Validation("Email is required".to_string())),
    };

    let user = find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let resume_url = user
        .resume_url
        .ok_or_else(|| AppError::NotFound("No resume uploaded for this user".to_string()))?;

    Ok(Json(ApiResponse::new(
        "Resume retrieved successfully",
        ResumeData {
            name: user.name,
            email: user.email,
            user_type: user.user_type,
            resume_url,
        },
    )))
}

/// DELETE /resume/deleteResume
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Json(req): Json<DeleteResumeRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if req.email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let user = find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    match user.user_type {
        Role::Applicant => {}
        Role::Admin => {
            return Err(AppError::Forbidden(
                "Only applicants can have resumes".to_string(),
            ))
        }
    }

    if user.resume_url.is_none() {
        return Err(AppError::NotFound("No resume found to delete".to_string()));
    }

    // The key was stored at upload time; a row with a URL but no key is
    // inconsistent and surfaces rather than being papered over.
    let key = user.resume_key.ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "Resume object key missing for {}",
            user.email
        ))
    })?;

    // A storage failure does not block clearing the row; the object is
    // orphaned in that direction by design of the original flow.
    if let Err(e) = storage::delete_object(&state.s3, &state.config.s3_bucket, &key).await {
        warn!("Failed to delete resume object {key}: {e}");
    }

    clear_resume(&state.db, &req.email).await?;

    Ok(Json(ApiResponse::message_only("Resume deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_data_uses_snake_case() {
        let body = serde_json::to_value(ResumeUploadData {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            resume_url: "http://minio:9000/resumes/jo@x.com/f.pdf".into(),
            file_name: "jo_at_x_com_1.pdf".into(),
            file_size: 1024,
            uploaded_at: Utc::now(),
        })
        .unwrap();
        assert!(body.get("resume_url").is_some());
        assert!(body.get("file_name").is_some());
        assert!(body.get("resumeUrl").is_none());
    }

    #[test]
    fn test_resume_data_exposes_role_string() {
        let body = serde_json::to_value(ResumeData {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            user_type: Role::Applicant,
            resume_url: "http://minio:9000/resumes/jo@x.com/f.pdf".into(),
        })
        .unwrap();
        assert_eq!(body["user_type"], "Applicant");
    }
}
