use dioxus::prelude::*;
use shared_types::{AdminOverview, UserRole};
use shared_ui::{Card, CardContent, CardHeader, CardTitle, PageHeader, PageTitle, Skeleton};

use crate::auth::use_user_role;
use crate::routes::Route;

/// Admin dashboard: the redirect target for privileged sessions.
/// Non-admin visitors are bounced straight back to the storefront.
#[component]
pub fn AdminDashboard() -> Element {
    let role = use_user_role();
    let is_admin = role == UserRole::Admin;

    let overview = use_resource(move || async move {
        if !is_admin {
            return None;
        }
        server::api::admin_overview().await.ok()
    });

    if !is_admin {
        navigator().replace(Route::Home {});
        return rsx! {
            div { class: "page-loading",
                p { "Redirecting..." }
            }
        };
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./admin.css") }

        div { class: "admin-page",
            PageHeader {
                PageTitle { "Admin Dashboard" }
            }

            match &*overview.read() {
                Some(Some(stats)) => rsx! {
                    OverviewTiles { stats: stats.clone() }
                },
                Some(None) => rsx! {
                    Card {
                        CardContent {
                            p { "Could not load the overview. Refresh to try again." }
                        }
                    }
                },
                None => rsx! {
                    div { class: "admin-tiles",
                        for _ in 0..3 {
                            Skeleton { style: "height: 110px;" }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn OverviewTiles(stats: AdminOverview) -> Element {
    rsx! {
        div { class: "admin-tiles",
            StatTile { label: "Listings", value: stats.product_count }
            StatTile { label: "Accounts", value: stats.user_count }
            StatTile { label: "Completed rentals", value: stats.total_rentals }
        }
    }
}

#[component]
fn StatTile(label: String, value: i64) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "{label}" }
            }
            CardContent {
                span { class: "admin-stat-value", "{value}" }
            }
        }
    }
}
