//! View-state controller for the landing page's popular-listings section.
//!
//! The state machine itself (`PopularFetch`) is plain data so it can be unit
//! tested without a running renderer; `use_popular_items` wires it to signals
//! and the catalog server function.

use dioxus::prelude::*;
use shared_types::Product;

use crate::auth::AuthState;
use crate::routes::Route;

/// Number of popular listings requested for the landing page.
pub const POPULAR_PAGE_SIZE: i64 = 8;

/// Shown when a failed fetch carries no usable message of its own.
pub const FETCH_ERROR_FALLBACK: &str = "Could not load popular listings. Please try again.";

/// Lifecycle of the popular-listings request. Exactly one variant is active
/// at any instant; every transition is a single signal write.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No request issued yet. Only observable before the mount effect runs.
    Idle,
    /// Request in flight. Previously loaded listings are already discarded,
    /// so a refetch shows the skeleton rather than flashing stale data.
    Loading,
    /// Request succeeded; listings preserve server order and may be empty.
    Loaded(Vec<Product>),
    /// Request failed; the message is surfaced to the user as-is.
    Failed(String),
}

impl FetchState {
    /// Loaded listings, or an empty slice in every other state.
    pub fn items(&self) -> &[Product] {
        match self {
            FetchState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What the popular-listings section should render. One mode at a time;
/// the mapping from `FetchState` is total, so rendering never has to
/// re-derive these rules from raw flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    Skeleton,
    ErrorPanel,
    Grid,
    EmptyNotice,
}

pub fn classify_display(state: &FetchState) -> DisplayMode {
    match state {
        FetchState::Idle | FetchState::Loading => DisplayMode::Skeleton,
        FetchState::Failed(_) => DisplayMode::ErrorPanel,
        FetchState::Loaded(items) if items.is_empty() => DisplayMode::EmptyNotice,
        FetchState::Loaded(_) => DisplayMode::Grid,
    }
}

/// Read-only projection of the authentication context. The identity provider
/// owns the underlying state; the landing page only reads this snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionView {
    pub is_authenticated: bool,
    pub is_admin: bool,
}

impl SessionView {
    pub fn from_auth(auth: &AuthState) -> Self {
        let user = auth.current_user.read();
        Self {
            is_authenticated: user.is_some(),
            is_admin: user.as_ref().map(|u| u.is_admin()).unwrap_or(false),
        }
    }
}

/// Outcome of the entry guard: either render the storefront or leave for the
/// admin dashboard before any marketplace content is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDecision {
    Proceed,
    Redirect(Route),
}

/// Pure entry guard: admins never see the end-user landing experience.
pub fn evaluate_entry(session: &SessionView) -> EntryDecision {
    if session.is_admin {
        EntryDecision::Redirect(Route::AdminDashboard {})
    } else {
        EntryDecision::Proceed
    }
}

/// Navigation target for a submitted search. The term is passed through
/// untrimmed and unvalidated; an empty term means "show everything".
pub fn search_destination(term: &str) -> Route {
    Route::Search {
        q: Some(term.to_string()),
    }
}

/// Sequence-tagged fetch machine for the popular-listings request.
///
/// Every invocation gets a monotonically increasing tag from [`begin`]; a
/// response only lands if its tag is still the newest one issued. Responses
/// for superseded requests are dropped silently, so rapid retries can never
/// clobber a newer result with an older one. The in-flight request itself is
/// not cancelled; only its effect on the state is suppressed.
///
/// [`begin`]: PopularFetch::begin
#[derive(Debug, Clone, PartialEq)]
pub struct PopularFetch {
    state: FetchState,
    latest: u64,
}

impl PopularFetch {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Start a request: discard whatever was shown, enter `Loading`, and
    /// return the tag the eventual response must present to `settle`.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.state = FetchState::Loading;
        self.latest
    }

    /// Apply a response. Stale tags are ignored without any observable effect.
    ///
    /// A success payload that is not a JSON array is treated as an empty
    /// catalog rather than an error. A failure with a blank message falls
    /// back to [`FETCH_ERROR_FALLBACK`].
    pub fn settle(&mut self, tag: u64, outcome: Result<serde_json::Value, String>) {
        if tag != self.latest {
            return;
        }
        self.state = match outcome {
            Ok(payload) => FetchState::Loaded(normalize_items(payload)),
            Err(message) => {
                let message = if message.trim().is_empty() {
                    FETCH_ERROR_FALLBACK.to_string()
                } else {
                    message
                };
                FetchState::Failed(message)
            }
        };
    }
}

impl Default for PopularFetch {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce a raw catalog payload into a listing sequence. Anything that is not
/// an array becomes empty, and entries that fail to decode are skipped.
pub fn normalize_items(payload: serde_json::Value) -> Vec<Product> {
    match payload {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Handle exposed to the landing page: the current fetch state plus the
/// user-facing retry command. The page reads, never writes.
#[derive(Clone, Copy, PartialEq)]
pub struct PopularItems {
    machine: Signal<PopularFetch>,
    refetch: Callback<()>,
}

impl PopularItems {
    pub fn state(&self) -> FetchState {
        self.machine.read().state().clone()
    }

    pub fn refetch(&self) {
        self.refetch.call(());
    }
}

/// Drive the popular-listings fetch for the landing page.
///
/// The first request is issued once, after the entry guard allows it; a
/// privileged session never starts a fetch. Retries re-enter through the
/// same tagged path, so only the newest request can settle the state.
pub fn use_popular_items(entry: Memo<EntryDecision>) -> PopularItems {
    let mut machine = use_signal(PopularFetch::new);

    let refetch = use_callback(move |_: ()| {
        let tag = machine.write().begin();
        spawn(async move {
            let outcome = match server::api::get_popular_products(POPULAR_PAGE_SIZE).await {
                Ok(raw) => Ok(serde_json::from_str::<serde_json::Value>(&raw)
                    .unwrap_or(serde_json::Value::Null)),
                Err(err) => Err(shared_types::AppError::friendly_message(&err.to_string())),
            };
            machine.write().settle(tag, outcome);
        });
    });

    use_effect(move || {
        if matches!(entry(), EntryDecision::Proceed)
            && matches!(machine.peek().state(), FetchState::Idle)
        {
            refetch.call(());
        }
    });

    PopularItems { machine, refetch }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn listing_json(id: i64) -> Value {
        json!({
            "id": id,
            "name": format!("Listing {id}"),
            "description": "Well maintained",
            "category": "cameras",
            "price_per_day": 25.0,
            "deposit": 100.0,
            "status": "active",
            "rental_count": 3,
            "created_at": "2026-01-10T09:00:00+00:00",
        })
    }

    fn page(count: i64) -> Value {
        Value::Array((1..=count).map(listing_json).collect())
    }

    #[test]
    fn begin_enters_loading_and_discards_previous_items() {
        let mut fetch = PopularFetch::new();
        let tag = fetch.begin();
        assert_eq!(fetch.state(), &FetchState::Loading);

        fetch.settle(tag, Ok(page(2)));
        assert_eq!(fetch.state().items().len(), 2);

        // A refetch must show loading again, never the stale grid.
        fetch.begin();
        assert_eq!(fetch.state(), &FetchState::Loading);
        assert!(fetch.state().items().is_empty());
    }

    #[test]
    fn full_page_resolves_to_grid() {
        let mut fetch = PopularFetch::new();
        let tag = fetch.begin();
        fetch.settle(tag, Ok(page(8)));

        assert_eq!(fetch.state().items().len(), 8);
        assert_eq!(classify_display(fetch.state()), DisplayMode::Grid);
    }

    #[test]
    fn empty_page_resolves_to_empty_notice() {
        let mut fetch = PopularFetch::new();
        let tag = fetch.begin();
        fetch.settle(tag, Ok(json!([])));

        assert_eq!(fetch.state(), &FetchState::Loaded(vec![]));
        assert_eq!(classify_display(fetch.state()), DisplayMode::EmptyNotice);
    }

    #[test]
    fn failure_surfaces_message_and_retry_reenters_loading() {
        let mut fetch = PopularFetch::new();
        let tag = fetch.begin();
        fetch.settle(tag, Err("timeout".to_string()));

        assert_eq!(fetch.state(), &FetchState::Failed("timeout".to_string()));
        assert_eq!(classify_display(fetch.state()), DisplayMode::ErrorPanel);

        let retry = fetch.begin();
        assert_eq!(classify_display(fetch.state()), DisplayMode::Skeleton);
        fetch.settle(retry, Ok(page(3)));
        assert_eq!(classify_display(fetch.state()), DisplayMode::Grid);
    }

    #[test]
    fn blank_failure_message_falls_back_to_default() {
        let mut fetch = PopularFetch::new();
        let tag = fetch.begin();
        fetch.settle(tag, Err("   ".to_string()));

        assert_eq!(
            fetch.state().error_message(),
            Some(FETCH_ERROR_FALLBACK)
        );
    }

    #[test]
    fn non_array_payload_normalizes_to_empty_not_failed() {
        for payload in [Value::Null, json!({"error": "upstream degraded"}), json!("oops")] {
            let mut fetch = PopularFetch::new();
            let tag = fetch.begin();
            fetch.settle(tag, Ok(payload));
            assert_eq!(fetch.state(), &FetchState::Loaded(vec![]));
        }
    }

    #[test]
    fn undecodable_entries_are_skipped() {
        let mut fetch = PopularFetch::new();
        let tag = fetch.begin();
        fetch.settle(
            tag,
            Ok(json!([listing_json(1), {"garbage": true}, listing_json(2)])),
        );

        let ids: Vec<i64> = fetch.state().items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn stale_success_is_discarded_while_newer_request_pends() {
        let mut fetch = PopularFetch::new();
        let first = fetch.begin();
        let second = fetch.begin();

        // First response arrives after being superseded: no visible effect.
        fetch.settle(first, Ok(page(3)));
        assert_eq!(fetch.state(), &FetchState::Loading);

        fetch.settle(second, Ok(page(8)));
        assert_eq!(fetch.state().items().len(), 8);
    }

    #[test]
    fn stale_response_cannot_overwrite_a_settled_newer_one() {
        let mut fetch = PopularFetch::new();
        let first = fetch.begin();
        let second = fetch.begin();

        fetch.settle(second, Ok(page(8)));
        fetch.settle(first, Err("timeout".to_string()));

        assert_eq!(fetch.state().items().len(), 8);
        assert_eq!(classify_display(fetch.state()), DisplayMode::Grid);
    }

    #[test]
    fn rapid_double_refetch_matches_single_refetch() {
        let mut single = PopularFetch::new();
        let tag = single.begin();
        single.settle(tag, Ok(page(8)));

        let mut double = PopularFetch::new();
        let first = double.begin();
        let second = double.begin();
        double.settle(first, Ok(page(8)));
        double.settle(second, Ok(page(8)));

        assert_eq!(single.state(), double.state());
    }

    #[test]
    fn sequence_tags_increase_monotonically() {
        let mut fetch = PopularFetch::new();
        let a = fetch.begin();
        let b = fetch.begin();
        let c = fetch.begin();
        assert!(a < b && b < c);
    }

    #[test]
    fn display_modes_are_mutually_exclusive_over_all_states() {
        let loaded = FetchState::Loaded(vec![Product {
            id: 1,
            name: "Tent".into(),
            description: String::new(),
            category: "outdoors".into(),
            price_per_day: 12.0,
            deposit: 40.0,
            image_url: None,
            status: "active".into(),
            rental_count: 0,
            created_at: String::new(),
        }]);
        let cases = [
            (FetchState::Idle, DisplayMode::Skeleton),
            (FetchState::Loading, DisplayMode::Skeleton),
            (FetchState::Failed("boom".into()), DisplayMode::ErrorPanel),
            (FetchState::Loaded(vec![]), DisplayMode::EmptyNotice),
            (loaded, DisplayMode::Grid),
        ];
        for (state, expected) in cases {
            assert_eq!(classify_display(&state), expected);
        }
    }

    #[test]
    fn admin_session_redirects_before_anything_else() {
        let session = SessionView {
            is_authenticated: true,
            is_admin: true,
        };
        assert_eq!(
            evaluate_entry(&session),
            EntryDecision::Redirect(Route::AdminDashboard {})
        );
    }

    #[test]
    fn member_and_guest_sessions_proceed() {
        let member = SessionView {
            is_authenticated: true,
            is_admin: false,
        };
        let guest = SessionView {
            is_authenticated: false,
            is_admin: false,
        };
        assert_eq!(evaluate_entry(&member), EntryDecision::Proceed);
        assert_eq!(evaluate_entry(&guest), EntryDecision::Proceed);
    }

    #[test]
    fn search_destination_carries_the_term() {
        assert_eq!(
            search_destination("camera"),
            Route::Search {
                q: Some("camera".to_string())
            }
        );
    }

    #[test]
    fn empty_search_term_passes_through_unchanged() {
        assert_eq!(
            search_destination(""),
            Route::Search {
                q: Some(String::new())
            }
        );
    }
}
