pub mod controller;

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaArrowRight, FaArrowRotateLeft, FaBoxOpen, FaCircleCheck, FaHeadset, FaListOl,
    FaMagnifyingGlass, FaShieldHalved, FaTags, FaTruck, FaUserPlus,
};
use dioxus_free_icons::Icon;
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardHeader, Form, Skeleton};

use crate::auth::use_auth;
use crate::components::ProductCard;
use crate::routes::Route;
use controller::{
    classify_display, evaluate_entry, search_destination, use_popular_items, DisplayMode,
    EntryDecision, SessionView,
};

/// Marketplace landing page.
///
/// Admin sessions are redirected to the admin dashboard before any storefront
/// content renders. Everyone else gets the hero search plus the popular
/// listings section driven by the fetch controller.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let session = use_memo(move || SessionView::from_auth(&auth));
    let entry = use_memo(move || evaluate_entry(&session()));
    let popular = use_popular_items(entry);
    let mut search_term = use_signal(String::new);

    if let EntryDecision::Redirect(target) = entry() {
        navigator().replace(target);
        return rsx! {
            div { class: "page-loading",
                p { "Redirecting..." }
            }
        };
    }

    let handle_search = move |_: FormEvent| {
        navigator().push(search_destination(&search_term()));
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./home.css") }

        div { class: "home-page",

            // Hero with the search form
            section { class: "hero",
                h1 { class: "hero-title", "Rent anything, from anyone nearby" }
                p { class: "hero-subtitle",
                    "Borrow cameras, tools, camping gear and more from people in your neighborhood."
                }
                Form {
                    class: "hero-search",
                    onsubmit: handle_search,
                    input {
                        r#type: "search",
                        class: "hero-search-input",
                        placeholder: "What do you want to rent?",
                        value: search_term(),
                        oninput: move |evt| search_term.set(evt.value()),
                    }
                    Button { variant: ButtonVariant::Primary,
                        Icon::<FaMagnifyingGlass> { icon: FaMagnifyingGlass, width: 16, height: 16 }
                        "Search"
                    }
                }
                div { class: "hero-actions",
                    Link { to: Route::Search { q: None }, class: "hero-action hero-action-light",
                        Icon::<FaBoxOpen> { icon: FaBoxOpen, width: 16, height: 16 }
                        "Rent an item"
                    }
                    Link { to: Route::Register {}, class: "hero-action hero-action-accent",
                        Icon::<FaListOl> { icon: FaListOl, width: 16, height: 16 }
                        "List your gear"
                    }
                }
            }

            // Why rent with us
            section { class: "features-section",
                div { class: "features-grid",
                    FeatureTile {
                        title: "Fair prices",
                        text: "Pay a fraction of the retail price for short-term use.",
                        icon: rsx! { Icon::<FaTags> { icon: FaTags, width: 22, height: 22 } },
                    }
                    FeatureTile {
                        title: "Covered rentals",
                        text: "Every booking is backed by a refundable deposit.",
                        icon: rsx! { Icon::<FaShieldHalved> { icon: FaShieldHalved, width: 22, height: 22 } },
                    }
                    FeatureTile {
                        title: "Huge selection",
                        text: "Thousands of listings across dozens of categories.",
                        icon: rsx! { Icon::<FaCircleCheck> { icon: FaCircleCheck, width: 22, height: 22 } },
                    }
                    FeatureTile {
                        title: "Fast support",
                        text: "A real person answers within a few hours.",
                        icon: rsx! { Icon::<FaHeadset> { icon: FaHeadset, width: 22, height: 22 } },
                    }
                }
            }

            // Popular listings, driven by the fetch controller
            section { class: "popular-section",
                div { class: "popular-header",
                    h2 { class: "popular-title", "Popular right now" }
                    Link { to: Route::Search { q: None }, class: "popular-browse",
                        "Browse everything"
                        Icon::<FaArrowRight> { icon: FaArrowRight, width: 14, height: 14 }
                    }
                }
                PopularListings { popular }
            }

            // How it works
            section { class: "steps-section",
                h2 { class: "steps-title", "How it works" }
                div { class: "steps-grid",
                    StepTile {
                        step: 1,
                        title: "Find it",
                        text: "Search the catalog or browse by category.",
                        icon: rsx! { Icon::<FaMagnifyingGlass> { icon: FaMagnifyingGlass, width: 22, height: 22 } },
                    }
                    StepTile {
                        step: 2,
                        title: "Book it",
                        text: "Pick your dates and reserve the listing.",
                        icon: rsx! { Icon::<FaListOl> { icon: FaListOl, width: 22, height: 22 } },
                    }
                    StepTile {
                        step: 3,
                        title: "Pick it up",
                        text: "Meet the owner or have it delivered.",
                        icon: rsx! { Icon::<FaTruck> { icon: FaTruck, width: 22, height: 22 } },
                    }
                    StepTile {
                        step: 4,
                        title: "Return it",
                        text: "Hand it back on time and get your deposit returned.",
                        icon: rsx! { Icon::<FaArrowRotateLeft> { icon: FaArrowRotateLeft, width: 22, height: 22 } },
                    }
                }
            }

            // Sign-up call to action, hidden for signed-in visitors
            if !session().is_authenticated {
                section { class: "cta-section",
                    Card { class: "cta-card",
                        CardHeader {
                            h3 { class: "cta-title", "Join for free today" }
                        }
                        CardContent {
                            p { class: "cta-text",
                                "Start renting out your own gear or borrowing from others in minutes."
                            }
                            Link { to: Route::Register {}, class: "cta-link",
                                Icon::<FaUserPlus> { icon: FaUserPlus, width: 16, height: 16 }
                                "Create an account"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Popular-listings section body. The display mode is taken from the
/// controller's classification; the branches never re-check raw state flags.
#[component]
fn PopularListings(popular: controller::PopularItems) -> Element {
    let state = popular.state();

    match classify_display(&state) {
        DisplayMode::Skeleton => rsx! {
            div { class: "product-grid",
                for _ in 0..4 {
                    Card {
                        CardContent {
                            div { class: "popular-skeleton-body",
                                Skeleton { style: "height: 140px;" }
                                Skeleton { style: "height: 20px; width: 70%;" }
                                Skeleton { style: "height: 16px; width: 40%;" }
                            }
                        }
                    }
                }
            }
        },
        DisplayMode::ErrorPanel => {
            let message = state.error_message().unwrap_or_default().to_string();
            rsx! {
                div { class: "popular-error",
                    p { class: "popular-error-message", "{message}" }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| popular.refetch(),
                        "Try again"
                    }
                }
            }
        }
        DisplayMode::Grid => rsx! {
            div { class: "product-grid",
                for product in state.items() {
                    ProductCard { key: "{product.id}", product: product.clone() }
                }
            }
        },
        DisplayMode::EmptyNotice => rsx! {
            div { class: "popular-empty",
                Icon::<FaBoxOpen> { icon: FaBoxOpen, width: 40, height: 40 }
                h3 { class: "popular-empty-title", "No popular listings right now" }
                p { class: "popular-empty-text", "Check back soon — new gear is added every day." }
            }
        },
    }
}

/// Single tile in the "why rent with us" row.
#[component]
fn FeatureTile(title: String, text: String, icon: Element) -> Element {
    rsx! {
        div { class: "feature-tile",
            div { class: "feature-icon", {icon} }
            div {
                h3 { class: "feature-title", "{title}" }
                p { class: "feature-text", "{text}" }
            }
        }
    }
}

/// Single tile in the "how it works" row.
#[component]
fn StepTile(step: u8, title: String, text: String, icon: Element) -> Element {
    rsx! {
        div { class: "step-tile",
            div { class: "step-icon", {icon} }
            span { class: "step-number", "{step}" }
            h3 { class: "step-title", "{title}" }
            p { class: "step-text", "{text}" }
        }
    }
}
