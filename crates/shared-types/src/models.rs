use serde::{Deserialize, Serialize};

/// Role attached to a user account. Stored lowercase in the database and in
/// session tokens; unknown values fall back to `Guest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserRole {
    #[default]
    Guest,
    Member,
    Admin,
}

impl UserRole {
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "member" => UserRole::Member,
            "admin" => UserRole::Admin,
            _ => UserRole::Guest,
        }
    }

    /// Lowercase string for database and token storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Guest => "guest",
            UserRole::Member => "member",
            UserRole::Admin => "admin",
        }
    }
}

/// A rentable catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price_per_day: f64,
    #[serde(default)]
    pub deposit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rental_count: i64,
    #[serde(default)]
    pub created_at: String,
}

/// Search results page for the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSearchResponse {
    pub products: Vec<Product>,
    pub total: i64,
}

/// Authenticated user as exposed to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        UserRole::from_str_or_default(&self.role) == UserRole::Admin
    }
}

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AdminOverview {
    pub product_count: i64,
    pub user_count: i64,
    pub total_rentals: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn role_parses_known_values_case_insensitively() {
        assert_eq!(UserRole::from_str_or_default("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_str_or_default("Admin"), UserRole::Admin);
        assert_eq!(UserRole::from_str_or_default("member"), UserRole::Member);
    }

    #[test]
    fn unknown_role_defaults_to_guest() {
        assert_eq!(UserRole::from_str_or_default("superuser"), UserRole::Guest);
        assert_eq!(UserRole::from_str_or_default(""), UserRole::Guest);
    }

    #[test]
    fn role_round_trips_through_as_str() {
        for role in [UserRole::Guest, UserRole::Member, UserRole::Admin] {
            assert_eq!(UserRole::from_str_or_default(role.as_str()), role);
        }
    }

    #[test]
    fn product_deserializes_with_optional_fields_missing() {
        let json = r#"{"id":7,"name":"Drone","price_per_day":45.0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.description, "");
        assert_eq!(product.image_url, None);
        assert_eq!(product.rental_count, 0);
    }

    #[test]
    fn auth_user_admin_check_uses_role_string() {
        let admin = AuthUser {
            id: 1,
            display_name: "Ops".into(),
            email: "ops@example.com".into(),
            role: "admin".into(),
            avatar_url: None,
        };
        let member = AuthUser {
            role: "member".into(),
            ..admin.clone()
        };
        assert!(admin.is_admin());
        assert!(!member.is_admin());
    }
}
