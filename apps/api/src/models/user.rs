use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account role. Stored as the Postgres enum `user_role`; matching on this
/// type is exhaustive, so a new role cannot slip past a gate unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    Admin,
    Applicant,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "Admin" => Some(Role::Admin),
            "Applicant" => Some(Role::Applicant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Applicant => "Applicant",
        }
    }
}

/// Full user row. Carries the password hash, so it never derives `Serialize`;
/// outward-facing shapes are built per handler.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: Role,
    pub profile_headline: String,
    pub address: String,
    pub resume_url: Option<String>,
    pub resume_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Applicant"), Some(Role::Applicant));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("APPLICANT"), None);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Role::parse("Recruiter"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "Admin");
        assert_eq!(serde_json::to_value(Role::Applicant).unwrap(), "Applicant");
    }

    #[test]
    fn test_as_str_round_trips() {
        for role in [Role::Admin, Role::Applicant] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
