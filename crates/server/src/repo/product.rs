use chrono::{DateTime, Utc};
use shared_types::Product;
use sqlx::{FromRow, Pool, Postgres};

/// Database row for a catalog listing.
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_per_day: f64,
    pub deposit: f64,
    pub image_url: Option<String>,
    pub status: String,
    pub rental_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            price_per_day: row.price_per_day,
            deposit: row.deposit,
            image_url: row.image_url,
            status: row.status,
            rental_count: row.rental_count,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, category, price_per_day, deposit, \
                               image_url, status, rental_count, created_at";

/// Top active listings ranked by how often they have been rented.
pub async fn list_popular(
    pool: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<ProductRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products
         WHERE status = 'active'
         ORDER BY rental_count DESC, created_at DESC
         LIMIT $1"
    );
    sqlx::query_as::<_, ProductRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Case-insensitive search over name and description.
/// A `None` query matches everything; an empty search shows all listings.
pub async fn search(
    pool: &Pool<Postgres>,
    q: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<(Vec<ProductRow>, i64), sqlx::Error> {
    let pattern = format!("%{}%", q.unwrap_or(""));

    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products
         WHERE status = 'active' AND (name ILIKE $1 OR description ILIKE $1)
         ORDER BY rental_count DESC, created_at DESC
         LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM products
         WHERE status = 'active' AND (name ILIKE $1 OR description ILIKE $1)",
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

/// Listing count and total completed rentals across the whole catalog.
pub async fn counts(pool: &Pool<Postgres>) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*), COALESCE(SUM(rental_count), 0)::BIGINT FROM products",
    )
    .fetch_one(pool)
    .await
}
