use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::users::store::{find_by_email, insert_user, NewUser};
use crate::validation::is_valid_email;

// Fields default to empty so a missing key answers with the envelope's
// "required" message instead of a deserializer rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub profile_headline: String,
    pub address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User shape returned to clients. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: Role,
    pub profile_headline: String,
    pub address: String,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        PublicUser {
            id: row.id,
            name: row.name,
            email: row.email,
            user_type: row.user_type,
            profile_headline: row.profile_headline,
            address: row.address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: PublicUser,
    pub token: String,
}

/// POST /auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), AppError> {
    if req.name.is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
        || req.user_type.is_empty()
        || req.profile_headline.is_empty()
        || req.address.is_empty()
    {
        return Err(AppError::Validation(
            "All fields are required (name, email, password, userType, profileHeadline, address)"
                .to_string(),
        ));
    }

    let role = Role::parse(&req.user_type).ok_or_else(|| {
        AppError::Validation("userType must be either \"Admin\" or \"Applicant\"".to_string())
    })?;

    if !is_valid_email(&req.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    // Duplicate email comes back as Conflict from the unique constraint.
    let user = insert_user(
        &state.db,
        NewUser {
            name: &req.name,
            email: &req.email,
            password_hash: &password_hash,
            user_type: role,
            profile_headline: &req.profile_headline,
            address: &req.address,
        },
    )
    .await?;

    let token = issue_token(user.id, user.user_type, &state.config.jwt_secret)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "User registered successfully",
            AuthData {
                user: user.into(),
                token,
            },
        )),
    ))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    // Unknown email and wrong password answer identically.
    let user = find_by_email(&state.db, &req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(user.id, user.user_type, &state.config.jwt_secret)?;

    Ok(Json(ApiResponse::new(
        "Login successful",
        AuthData {
            user: user.into(),
            token,
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_tolerates_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"name":"Jo"}"#).unwrap();
        assert_eq!(req.name, "Jo");
        assert!(req.email.is_empty());
        assert!(req.user_type.is_empty());
    }

    #[test]
    fn test_public_user_has_no_password_field() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Jo".into(),
            email: "jo@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            user_type: Role::Applicant,
            profile_headline: "Engineer".into(),
            address: "NY".into(),
            resume_url: None,
            resume_key: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let body = serde_json::to_value(PublicUser::from(row)).unwrap();
        assert_eq!(body["email"], "jo@x.com");
        assert_eq!(body["userType"], "Applicant");
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
        assert!(!body.to_string().contains("argon2id"));
    }
}
