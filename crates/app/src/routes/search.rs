use dioxus::prelude::*;
use shared_types::ProductSearchResponse;
use shared_ui::{Card, CardContent, Input, PageHeader, PageTitle, SearchBar, Skeleton};

use crate::components::ProductCard;

const RESULTS_PAGE_SIZE: i64 = 24;

/// Catalog search results for `?q=`. The query box re-runs the search as the
/// visitor types; an empty query shows the whole catalog.
#[component]
pub fn Search(q: Option<String>) -> Element {
    let mut query = use_signal(move || q.unwrap_or_default());

    let results = use_resource(move || {
        let term = query.read().clone();
        async move {
            server::api::search_products(
                if term.is_empty() { None } else { Some(term) },
                Some(0),
                Some(RESULTS_PAGE_SIZE),
            )
            .await
            .ok()
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./search.css") }

        div { class: "search-page",
            PageHeader {
                PageTitle { "Browse listings" }
            }

            SearchBar {
                Input {
                    value: query(),
                    placeholder: "Search for cameras, tools, tents...",
                    label: "",
                    on_input: move |evt: FormEvent| query.set(evt.value()),
                }
            }

            match &*results.read() {
                Some(Some(resp)) => rsx! {
                    SearchResults { response: resp.clone() }
                },
                Some(None) => rsx! {
                    Card {
                        CardContent {
                            p { "Search is unavailable right now. Please try again shortly." }
                        }
                    }
                },
                None => rsx! {
                    div { class: "search-skeletons",
                        for _ in 0..3 {
                            Skeleton { style: "height: 120px;" }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SearchResults(response: ProductSearchResponse) -> Element {
    if response.products.is_empty() {
        return rsx! {
            Card {
                CardContent {
                    p { "No listings matched your search." }
                }
            }
        };
    }

    rsx! {
        p { class: "search-total",
            "{response.total} listings found"
        }
        div { class: "product-grid",
            for product in response.products.iter() {
                ProductCard { key: "{product.id}", product: product.clone() }
            }
        }
    }
}
