use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier so two logins within the same second still
    /// produce distinct tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set")
}

/// Session lifetime in hours. Defaults to 72.
pub fn session_ttl_hours() -> i64 {
    std::env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(72)
}

pub fn create_session_token(
    user_id: i64,
    email: &str,
    role: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(session_ttl_hours())).timestamp(),
        jti: Some(uuid::Uuid::new_v4().to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
}

pub fn validate_session_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_secret() {
        std::env::set_var("JWT_SECRET", "unit-test-session-secret");
    }

    #[test]
    fn create_and_validate_roundtrip() {
        setup_test_secret();
        let token = create_session_token(17, "renter@example.com", "member").unwrap();
        let claims = validate_session_token(&token).unwrap();
        assert_eq!(claims.sub, 17);
        assert_eq!(claims.email, "renter@example.com");
        assert_eq!(claims.role, "member");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_rejected() {
        setup_test_secret();
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            email: "old@example.com".to_string(),
            role: "member".to_string(),
            iat: (now - Duration::hours(100)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: None,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt_secret().as_bytes()),
        )
        .unwrap();

        assert!(validate_session_token(&token).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        setup_test_secret();
        assert!(validate_session_token("not.a.token").is_err());
        assert!(validate_session_token("").is_err());
    }

    #[test]
    fn tokens_for_same_user_are_distinct() {
        setup_test_secret();
        let a = create_session_token(5, "a@b.com", "member").unwrap();
        let b = create_session_token(5, "a@b.com", "member").unwrap();
        // jti differs even when issued within the same second
        assert_ne!(a, b);
    }
}
