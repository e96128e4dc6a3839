use dioxus::prelude::*;

mod auth;
mod components;
mod format_helpers;
mod routes;

use auth::{use_auth, AuthState};
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::telemetry::init_telemetry();

        let pool = server::db::create_pool();
        server::db::run_migrations(&pool).await;

        let router = dioxus::server::router(App)
            .layer(axum::middleware::from_fn(
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(AuthState::new);
    let mut auth = use_auth();

    // Resolve the current session once on entry. `?` propagates suspension so
    // SSR waits for the auth check; guests simply stay signed out.
    let session =
        use_server_future(move || async move { server::api::get_current_user().await })?;

    if let Some(Ok(Some(user))) = session.read().as_ref().cloned() {
        if !auth.is_authenticated() {
            auth.set_user(user);
        }
    }

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "page-loading",
                    p { "Loading..." }
                }
            },
            Router::<Route> {}
        }
    }
}
