pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::resume::storage::MAX_RESUME_BYTES;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/signup", post(auth::handle_signup))
        .route("/auth/login", post(auth::handle_login))
        // Job board
        .route("/api/job", post(jobs::handle_create_job))
        .route("/api/job/:id", get(jobs::handle_get_job))
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/job/:id/apply", post(jobs::handle_apply))
        .route("/api/applicants", get(jobs::handle_list_applicants))
        .route("/api/applicant/:id", get(jobs::handle_get_applicant))
        // Resume store; body limit leaves headroom over the 2MB file cap for
        // the multipart framing itself.
        .route(
            "/resume/upload",
            post(resume::handle_upload).layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + 64 * 1024)),
        )
        .route("/resume/getResume", get(resume::handle_get_resume))
        .route("/resume/deleteResume", delete(resume::handle_delete_resume))
        .with_state(state)
}
