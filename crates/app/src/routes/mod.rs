pub mod admin;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
pub mod search;

use dioxus::prelude::*;
use shared_ui::{Button, ButtonVariant};

use crate::auth::use_auth;

use admin::AdminDashboard;
use home::Home;
use login::Login;
use not_found::NotFound;
use register::Register;
use search::Search;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(SiteLayout)]
    #[route("/")]
    Home {},
    #[route("/search?:q")]
    Search { q: Option<String> },
    #[route("/admin")]
    AdminDashboard {},
    #[end_layout]
    #[route("/login?:redirect")]
    Login { redirect: Option<String> },
    #[route("/register")]
    Register {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Storefront layout: top navigation bar, page content, footer.
#[component]
fn SiteLayout() -> Element {
    let mut auth = use_auth();

    let display_name = auth
        .current_user
        .read()
        .as_ref()
        .map(|u| u.display_name.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        header { class: "site-header",
            div { class: "site-header-inner",
                Link { to: Route::Home {}, class: "site-brand", "RentHub" }

                nav { class: "site-nav",
                    Link { to: Route::Home {}, class: "site-nav-link", "Home" }
                    Link { to: Route::Search { q: None }, class: "site-nav-link", "Browse" }
                }

                div { class: "site-auth",
                    match display_name {
                        Some(name) => rsx! {
                            span { class: "site-auth-name", "{name}" }
                            Button {
                                variant: ButtonVariant::Ghost,
                                onclick: move |_| {
                                    spawn(async move {
                                        let _ = server::api::logout().await;
                                    });
                                    auth.clear_auth();
                                    navigator().push(Route::Home {});
                                },
                                "Sign out"
                            }
                        },
                        None => rsx! {
                            Link { to: Route::Login { redirect: None }, class: "site-nav-link", "Sign in" }
                            Link { to: Route::Register {}, class: "site-auth-register", "Sign up" }
                        },
                    }
                }
            }
        }

        main { class: "site-content",
            Outlet::<Route> {}
        }

        footer { class: "site-footer",
            p { "RentHub — rent more, buy less." }
        }
    }
}
