//! # Address Autocomplete Adapter
//!
//! Holds the dropdown state of one address input and turns provider calls
//! into `options` / `loading` / `error`.
//!
//! ## Request Ordering
//! ```text
//! search("via rom")     id=1 ──────────────► response (discarded, id 1 < 2)
//! search("via roma 1")  id=2 ─────► response (committed)
//! search("via")         id=3  short query: options cleared, no call
//! ```
//!
//! Every call takes the next request id; only the latest id may write
//! options or flip `loading` back to false. Provider failures surface as a
//! fixed message, never the underlying error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use merchant_core::AddressOption;

use crate::config::AutocompleteSettings;
use crate::provider::AddressSearchProvider;

/// Shown under the input when the provider call fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Errore nella ricerca";

/// What the input renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteState {
    pub options: Vec<AddressOption>,
    pub loading: bool,
    pub error: Option<String>,
}

/// How a [`AddressAutocomplete::search`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query under the minimum length; options cleared, provider not called.
    TooShort,
    /// Provider answered and the options were replaced.
    Committed,
    /// A newer call started meanwhile; the response was dropped.
    Superseded,
    /// Provider failed; error message set, options cleared.
    Failed,
}

/// Autocomplete state for one address input.
#[derive(Clone)]
pub struct AddressAutocomplete {
    provider: Arc<dyn AddressSearchProvider>,
    min_query_chars: usize,
    state: Arc<RwLock<AutocompleteState>>,
    latest_request: Arc<AtomicU64>,
}

impl AddressAutocomplete {
    pub fn new(provider: Arc<dyn AddressSearchProvider>, settings: &AutocompleteSettings) -> Self {
        AddressAutocomplete {
            provider,
            min_query_chars: settings.min_query_chars,
            state: Arc::new(RwLock::new(AutocompleteState::default())),
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }

    fn next_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, request_id: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == request_id
    }

    /// Runs one search for `query`.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let request_id = self.next_request();

        if query.trim().chars().count() < self.min_query_chars {
            let mut state = self.state.write().await;
            state.options.clear();
            state.loading = false;
            return SearchOutcome::TooShort;
        }

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.provider.search(query).await;

        let mut state = self.state.write().await;
        if !self.is_latest(request_id) {
            debug!(request_id, "Stale address response dropped");
            return SearchOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(response) => {
                debug!(request_id, results = response.result_items.len(), "Address options updated");
                state.options = response.result_items;
                SearchOutcome::Committed
            }
            Err(e) => {
                warn!(request_id, error = %e, "Address search failed");
                state.options.clear();
                state.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                SearchOutcome::Failed
            }
        }
    }

    pub async fn snapshot(&self) -> AutocompleteState {
        self.state.read().await.clone()
    }

    /// Option at `index` in the current dropdown.
    pub async fn option(&self, index: usize) -> Option<AddressOption> {
        self.state.read().await.options.get(index).cloned()
    }

    /// Empties the dropdown and orphans any in-flight request.
    pub async fn clear(&self) {
        self.next_request();
        *self.state.write().await = AutocompleteState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{option, Reply, ScriptedProvider};

    fn adapter(provider: ScriptedProvider) -> (AddressAutocomplete, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let adapter = AddressAutocomplete::new(provider.clone(), &AutocompleteSettings::default());
        (adapter, provider)
    }

    #[tokio::test]
    async fn test_short_query_never_calls_provider() {
        let (adapter, provider) = adapter(ScriptedProvider::new());

        assert_eq!(adapter.search("abcd").await, SearchOutcome::TooShort);
        assert_eq!(adapter.search("   ab   ").await, SearchOutcome::TooShort);

        assert!(provider.calls().is_empty());
        let state = adapter.snapshot().await;
        assert!(state.options.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_successful_search_commits_options() {
        let (adapter, provider) = adapter(ScriptedProvider::new().reply(
            "via roma 1",
            0,
            Reply::Items(vec![option("A"), option("B")]),
        ));

        assert_eq!(adapter.search("via roma 1").await, SearchOutcome::Committed);

        let state = adapter.snapshot().await;
        assert_eq!(state.options, vec![option("A"), option("B")]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(provider.calls(), vec!["via roma 1".to_string()]);
        assert_eq!(adapter.option(1).await, Some(option("B")));
        assert_eq!(adapter.option(2).await, None);
    }

    #[tokio::test]
    async fn test_failure_sets_fixed_message() {
        let (adapter, _) = adapter(
            ScriptedProvider::new()
                .reply("via roma 1", 0, Reply::Items(vec![option("A")]))
                .reply("via milano", 0, Reply::Fail),
        );

        adapter.search("via roma 1").await;
        assert_eq!(adapter.search("via milano").await, SearchOutcome::Failed);

        let state = adapter.snapshot().await;
        assert!(state.options.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(SEARCH_ERROR_MESSAGE));

        // A later success clears the message.
        adapter.search("via roma 1").await;
        assert_eq!(adapter.snapshot().await.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_response_never_overwrites_newer() {
        let (adapter, _) = adapter(
            ScriptedProvider::new()
                .reply("via rom", 500, Reply::Items(vec![option("OLD")]))
                .reply("via roma 1", 10, Reply::Items(vec![option("NEW")])),
        );

        let slow = adapter.clone();
        let first = tokio::spawn(async move { slow.search("via rom").await });
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        assert_eq!(adapter.search("via roma 1").await, SearchOutcome::Committed);
        assert_eq!(first.await.unwrap(), SearchOutcome::Superseded);

        let state = adapter.snapshot().await;
        assert_eq!(state.options, vec![option("NEW")]);
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_orphans_in_flight_request() {
        let (adapter, _) = adapter(ScriptedProvider::new().reply(
            "via roma 1",
            500,
            Reply::Items(vec![option("A")]),
        ));

        let pending = adapter.clone();
        let first = tokio::spawn(async move { pending.search("via roma 1").await });
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        assert!(adapter.snapshot().await.loading);

        assert_eq!(adapter.search("via").await, SearchOutcome::TooShort);
        assert_eq!(first.await.unwrap(), SearchOutcome::Superseded);

        let state = adapter.snapshot().await;
        assert!(state.options.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let (adapter, _) = adapter(
            ScriptedProvider::new().reply("via roma 1", 0, Reply::Items(vec![option("A")])),
        );

        adapter.search("via roma 1").await;
        adapter.clear().await;
        assert_eq!(adapter.snapshot().await, AutocompleteState::default());
    }
}
