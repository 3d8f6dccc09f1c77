use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;

pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Signed claims binding a user identifier to its role.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues an HS256 token valid for 24 hours.
pub fn issue_token(user_id: Uuid, role: Role, secret: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Token signing failed: {e}")))
}

/// Decodes and validates a token. No routed endpoint consumes this yet;
/// it backs the (currently unwired) protected-route story.
#[allow(dead_code)]
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, Role::Applicant, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Applicant);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(Uuid::new_v4(), Role::Admin, SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let iat = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Applicant,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let mut token = issue_token(Uuid::new_v4(), Role::Applicant, SECRET).unwrap();
        token.push('x');
        assert!(verify_token(&token, SECRET).is_err());
    }
}
