use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_email: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// Join row for a job's applicant list: application fields plus the
/// applicant's profile, ordered by most recent application first.
#[derive(Debug, Clone, FromRow)]
pub struct JobApplicantRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_headline: String,
    pub address: String,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub status: String,
}
