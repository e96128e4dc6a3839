use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaBoxOpen;
use dioxus_free_icons::Icon;
use shared_types::Product;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardHeader, CardTitle};

use crate::format_helpers::format_price;

/// Catalog listing card shared by the landing grid and search results.
#[component]
pub fn ProductCard(product: Product) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./product_card.css") }

        Card {
            if let Some(url) = &product.image_url {
                img {
                    class: "product-card-image",
                    src: "{url}",
                    alt: "{product.name}",
                }
            } else {
                div { class: "product-card-placeholder",
                    Icon::<FaBoxOpen> { icon: FaBoxOpen, width: 32, height: 32 }
                }
            }
            CardHeader {
                div { class: "product-card-header",
                    CardTitle { "{product.name}" }
                    Badge { variant: BadgeVariant::Secondary, "{product.category}" }
                }
            }
            CardContent {
                p { class: "product-card-price",
                    span { class: "product-card-price-amount", {format_price(product.price_per_day)} }
                    span { class: "product-card-price-unit", " / day" }
                }
                if !product.description.is_empty() {
                    p { class: "product-card-description", "{product.description}" }
                }
                p { class: "product-card-meta", "Rented {product.rental_count} times" }
            }
        }
    }
}
