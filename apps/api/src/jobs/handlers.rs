use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::{
    applicants_for_job, find_job, insert_application, insert_job, list_jobs, NewJob,
};
use crate::models::application::JobApplicantRow;
use crate::models::job::JobRow;
use crate::models::user::{Role, UserRow};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::users::store::{find_applicant_by_id, find_by_email, list_applicants};
use crate::validation::{is_valid_email, parse_id};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplyRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub posted_by: String,
}

impl From<JobRow> for JobResponse {
    fn from(row: JobRow) -> Self {
        JobResponse {
            id: row.id,
            title: row.title,
            description: row.description,
            company_name: row.company_name,
            posted_on: row.posted_on,
            posted_by: row.posted_by_email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicantResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_headline: String,
    pub address: String,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub status: String,
}

impl From<JobApplicantRow> for JobApplicantResponse {
    fn from(row: JobApplicantRow) -> Self {
        JobApplicantResponse {
            id: row.id,
            name: row.name,
            email: row.email,
            profile_headline: row.profile_headline,
            address: row.address,
            resume_url: row.resume_url,
            applied_at: row.applied_at,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: JobResponse,
    pub applicants: Vec<JobApplicantResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub applicant_email: String,
    pub applied_at: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_headline: String,
    pub address: String,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for ApplicantSummary {
    fn from(row: UserRow) -> Self {
        ApplicantSummary {
            id: row.id,
            name: row.name,
            email: row.email,
            profile_headline: row.profile_headline,
            address: row.address,
            resume_url: row.resume_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetail {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_headline: String,
    pub address: String,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for ApplicantDetail {
    fn from(row: UserRow) -> Self {
        ApplicantDetail {
            id: row.id,
            name: row.name,
            email: row.email,
            profile_headline: row.profile_headline,
            address: row.address,
            resume_url: row.resume_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// POST /api/job
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobResponse>>), AppError> {
    if req.title.is_empty()
        || req.description.is_empty()
        || req.company_name.is_empty()
        || req.email.is_empty()
    {
        return Err(AppError::Validation(
            "All fields are required (title, description, companyName, email)".to_string(),
        ));
    }

    if !is_valid_email(&req.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }

    // Any registered user may post; the email only has to resolve.
    find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User with this email does not exist".to_string()))?;

    let job = insert_job(
        &state.db,
        NewJob {
            title: &req.title,
            description: &req.description,
            company_name: &req.company_name,
            posted_by_email: &req.email,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Job created successfully", job.into())),
    ))
}

/// GET /api/job/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<JobDetailResponse>>, AppError> {
    let job_id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("Invalid job ID format".to_string()))?;

    let job = find_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let applicants = applicants_for_job(&state.db, job_id).await?;

    Ok(Json(ApiResponse::new(
        "Job details retrieved successfully",
        JobDetailResponse {
            job: job.into(),
            applicants: applicants.into_iter().map(Into::into).collect(),
        },
    )))
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, AppError> {
    let limit = params.limit.unwrap_or(50);
    let offset = params.offset.unwrap_or(0);

    let jobs = list_jobs(&state.db, limit, offset).await?;

    Ok(Json(ApiResponse::list(
        "Jobs retrieved successfully",
        jobs.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/job/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationResponse>>), AppError> {
    if req.email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let job_id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("Invalid job ID format".to_string()))?;

    find_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let user = find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    match user.user_type {
        Role::Applicant => {}
        Role::Admin => {
            return Err(AppError::Forbidden(
                "Only applicants can apply to jobs".to_string(),
            ))
        }
    }

    // A repeat application surfaces as Conflict from the unique constraint.
    let application = insert_application(&state.db, job_id, &req.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Application submitted successfully",
            ApplicationResponse {
                application_id: application.id,
                job_id: application.job_id,
                applicant_email: application.applicant_email,
                applied_at: application.applied_at,
                status: application.status,
            },
        )),
    ))
}

/// GET /api/applicants
pub async fn handle_list_applicants(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApplicantSummary>>>, AppError> {
    let applicants = list_applicants(&state.db).await?;

    Ok(Json(ApiResponse::list(
        "Applicants retrieved successfully",
        applicants.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/applicant/:id
pub async fn handle_get_applicant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ApplicantDetail>>, AppError> {
    let applicant_id = parse_id(&id)
        .ok_or_else(|| AppError::Validation("Invalid applicant ID format".to_string()))?;

    let applicant = find_applicant_by_id(&state.db, applicant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Applicant not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        "Applicant details retrieved successfully",
        applicant.into(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_row() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".into(),
            description: "Rust services".into(),
            company_name: "Acme".into(),
            posted_by_email: "hr@acme.com".into(),
            posted_on: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_response_uses_camel_case() {
        let body = serde_json::to_value(JobResponse::from(job_row())).unwrap();
        assert_eq!(body["companyName"], "Acme");
        assert_eq!(body["postedBy"], "hr@acme.com");
        assert!(body.get("posted_by_email").is_none());
    }

    #[test]
    fn test_job_detail_flattens_job_fields() {
        let detail = JobDetailResponse {
            job: job_row().into(),
            applicants: vec![],
        };
        let body = serde_json::to_value(detail).unwrap();
        assert_eq!(body["companyName"], "Acme");
        assert_eq!(body["applicants"], serde_json::json!([]));
        assert!(body.get("job").is_none());
    }

    #[test]
    fn test_apply_request_tolerates_missing_email() {
        let req: ApplyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
    }
}
