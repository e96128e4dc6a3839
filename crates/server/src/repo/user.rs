use shared_types::AuthUser;
use sqlx::{FromRow, Pool, Postgres};

/// Database row for a user account.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub avatar_url: Option<String>,
}

impl UserRow {
    pub fn into_auth_user(self) -> AuthUser {
        AuthUser {
            id: self.id,
            display_name: self.display_name,
            email: self.email,
            role: self.role,
            avatar_url: self.avatar_url,
        }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, display_name, role, avatar_url";

pub async fn find_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<UserRow>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
    display_name: &str,
) -> Result<UserRow, sqlx::Error> {
    let sql = format!(
        "INSERT INTO users (email, password_hash, display_name)
         VALUES ($1, $2, $3)
         RETURNING {USER_COLUMNS}"
    );
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(pool)
        .await
}

pub async fn count(pool: &Pool<Postgres>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}
