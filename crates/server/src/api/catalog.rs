use dioxus::prelude::*;
use shared_types::{AdminOverview, ProductSearchResponse};

/// Top listings ranked by rental count, serialized as a raw JSON array string.
/// The client parses and normalizes the payload defensively, so a partial
/// upstream outage degrades to an empty grid instead of an error panel.
#[server]
pub async fn get_popular_products(limit: i64) -> Result<String, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::{AppErrorExt, SqlxErrorExt};
    use crate::repo::product;
    use shared_types::{AppError, Product};

    let pool = get_db().await;
    let limit = limit.clamp(1, 24);

    let rows = product::list_popular(pool, limit)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;
    let products: Vec<Product> = rows.into_iter().map(Product::from).collect();

    serde_json::to_string(&products)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())
}

/// Search active listings by name or description.
/// An empty or missing query returns the full catalog page.
#[server]
pub async fn search_products(
    q: Option<String>,
    offset: Option<i64>,
    limit: Option<i64>,
) -> Result<ProductSearchResponse, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::{AppErrorExt, SqlxErrorExt};
    use crate::repo::product;
    use shared_types::Product;

    let pool = get_db().await;
    let offset = offset.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(24).clamp(1, 60);

    let (rows, total) = product::search(
        pool,
        q.as_deref().filter(|s| !s.is_empty()),
        offset,
        limit,
    )
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(ProductSearchResponse {
        products: rows.into_iter().map(Product::from).collect(),
        total,
    })
}

/// Catalog and account counts for the admin dashboard. Admin only.
#[server]
pub async fn admin_overview() -> Result<AdminOverview, ServerFnError> {
    use super::auth::require_admin;
    use crate::db::get_db;
    use crate::error_convert::{AppErrorExt, SqlxErrorExt};
    use crate::repo::{product, user};

    require_admin()?;

    let pool = get_db().await;

    let (product_count, total_rentals) = product::counts(pool)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;
    let user_count = user::count(pool)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(AdminOverview {
        product_count,
        user_count,
        total_rentals,
    })
}
