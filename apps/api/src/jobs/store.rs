use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, JobApplicantRow};
use crate::models::job::JobRow;

pub struct NewJob<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub company_name: &'a str,
    pub posted_by_email: &'a str,
}

pub async fn insert_job(pool: &PgPool, params: NewJob<'_>) -> Result<JobRow, AppError> {
    Ok(sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, title, description, company_name, posted_by_email)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.title)
    .bind(params.description)
    .bind(params.company_name)
    .bind(params.posted_by_email)
    .fetch_one(pool)
    .await?)
}

pub async fn find_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, AppError> {
    Ok(sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Postings newest first. `limit` is caller-supplied and unbounded.
pub async fn list_jobs(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<JobRow>, AppError> {
    Ok(sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs ORDER BY posted_on DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

/// Applications for a job joined with each applicant's profile, most recent
/// application first.
pub async fn applicants_for_job(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Vec<JobApplicantRow>, AppError> {
    Ok(sqlx::query_as::<_, JobApplicantRow>(
        r#"
        SELECT u.id, u.name, u.email, u.profile_headline, u.address, u.resume_url,
               a.applied_at, a.status
        FROM job_applications a
        JOIN users u ON u.email = a.applicant_email
        WHERE a.job_id = $1
        ORDER BY a.applied_at DESC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

/// Inserts an application with status 'pending'. The unique constraint on
/// (job_id, applicant_email) reports a duplicate as Conflict, with no
/// check-then-act window for concurrent requests to slip through.
pub async fn insert_application(
    pool: &PgPool,
    job_id: Uuid,
    applicant_email: &str,
) -> Result<ApplicationRow, AppError> {
    let result = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO job_applications (id, job_id, applicant_email, status)
        VALUES ($1, $2, $3, 'pending')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(applicant_email)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Job update. Not reachable from any route in this revision.
#[allow(dead_code)]
pub async fn update_job(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    description: &str,
    company_name: &str,
) -> Result<JobRow, AppError> {
    Ok(sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $2, description = $3, company_name = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(company_name)
    .fetch_one(pool)
    .await?)
}

/// Job deletion. Not reachable from any route in this revision.
#[allow(dead_code)]
pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
