use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserRow};

/// Column values for a new account. The password must already be hashed.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub user_type: Role,
    pub profile_headline: &'a str,
    pub address: &'a str,
}

/// Inserts a user. Duplicate email is reported by the `users.email` unique
/// constraint, so concurrent signups cannot both succeed.
pub async fn insert_user(pool: &PgPool, params: NewUser<'_>) -> Result<UserRow, AppError> {
    let result = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users
            (id, name, email, password_hash, user_type, profile_headline, address)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.name)
    .bind(params.email)
    .bind(params.password_hash)
    .bind(params.user_type)
    .bind(params.profile_headline)
    .bind(params.address)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
            "User with this email already exists".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Looks up a user by email. `Ok(None)` means the user genuinely does not
/// exist; a store failure surfaces as `Err`.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
    Ok(
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn find_applicant_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRow>, AppError> {
    Ok(sqlx::query_as::<_, UserRow>(
        "SELECT * FROM users WHERE id = $1 AND user_type = $2",
    )
    .bind(id)
    .bind(Role::Applicant)
    .fetch_optional(pool)
    .await?)
}

/// All applicant accounts, newest first.
pub async fn list_applicants(pool: &PgPool) -> Result<Vec<UserRow>, AppError> {
    Ok(sqlx::query_as::<_, UserRow>(
        "SELECT * FROM users WHERE user_type = $1 ORDER BY created_at DESC",
    )
    .bind(Role::Applicant)
    .fetch_all(pool)
    .await?)
}

/// Points the user at a freshly uploaded resume object. The object key is
/// stored alongside the public URL so deletion never has to re-derive it.
pub async fn set_resume(
    pool: &PgPool,
    email: &str,
    resume_url: &str,
    resume_key: &str,
) -> Result<UserRow, AppError> {
    Ok(sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET resume_url = $2, resume_key = $3, updated_at = now()
        WHERE email = $1
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(resume_url)
    .bind(resume_key)
    .fetch_one(pool)
    .await?)
}

pub async fn clear_resume(pool: &PgPool, email: &str) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE users SET resume_url = NULL, resume_key = NULL, updated_at = now() WHERE email = $1",
    )
    .bind(email)
    .execute(pool)
    .await?;
    Ok(())
}

/// Generic profile update. Not reachable from any route in this revision.
#[allow(dead_code)]
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    profile_headline: &str,
    address: &str,
) -> Result<UserRow, AppError> {
    Ok(sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET name = $2, profile_headline = $3, address = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(profile_headline)
    .bind(address)
    .fetch_one(pool)
    .await?)
}
