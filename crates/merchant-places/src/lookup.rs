//! # Per-Entry Address Lookup
//!
//! Every point-of-sale entry has its own address input, hence its own
//! dropdown and its own debounce timer. Both are keyed by the entry's
//! stable `id`, never its list position, so removing entry 0 while entry 1
//! is mid-search cannot misroute the result.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use merchant_core::form::{FormListener, PointOfSaleForm};

use crate::autocomplete::{AddressAutocomplete, AutocompleteState};
use crate::config::AutocompleteSettings;
use crate::debounce::Debouncer;
use crate::error::{PlacesError, PlacesResult};
use crate::provider::AddressSearchProvider;

/// Debounced autocomplete for all address inputs of one form.
pub struct AddressLookup {
    provider: Arc<dyn AddressSearchProvider>,
    settings: AutocompleteSettings,
    adapters: Mutex<HashMap<String, AddressAutocomplete>>,
    debouncer: Debouncer,
}

impl AddressLookup {
    pub fn new(provider: Arc<dyn AddressSearchProvider>, settings: AutocompleteSettings) -> Self {
        let debouncer = Debouncer::new(settings.debounce());
        AddressLookup {
            provider,
            settings,
            adapters: Mutex::new(HashMap::new()),
            debouncer,
        }
    }

    /// The adapter for `entry_id`, created on first use.
    pub async fn adapter(&self, entry_id: &str) -> AddressAutocomplete {
        let mut adapters = self.adapters.lock().await;
        adapters
            .entry(entry_id.to_string())
            .or_insert_with(|| AddressAutocomplete::new(self.provider.clone(), &self.settings))
            .clone()
    }

    /// Records a keystroke; the search fires after the quiet window.
    pub async fn input(&self, entry_id: &str, text: &str) {
        let adapter = self.adapter(entry_id).await;
        let query = text.to_string();
        self.debouncer
            .schedule(entry_id, async move {
                adapter.search(&query).await;
            })
            .await;
    }

    /// Current dropdown state for `entry_id`.
    pub async fn state(&self, entry_id: &str) -> AutocompleteState {
        match self.adapters.lock().await.get(entry_id) {
            Some(adapter) => adapter.snapshot().await,
            None => AutocompleteState::default(),
        }
    }

    /// True while a keystroke for `entry_id` is waiting out the window.
    pub async fn is_pending(&self, entry_id: &str) -> bool {
        self.debouncer.is_pending(entry_id).await
    }

    /// Applies dropdown option `option_index` of `entry_id` to the form.
    ///
    /// # Errors
    ///
    /// [`PlacesError::OptionNotFound`] when the dropdown has no such option,
    /// [`PlacesError::Core`] when the entry is no longer in the form.
    pub async fn select<L: FormListener>(
        &self,
        form: &mut PointOfSaleForm<L>,
        entry_id: &str,
        option_index: usize,
    ) -> PlacesResult<()> {
        let adapter = self.adapter(entry_id).await;
        let option = adapter
            .option(option_index)
            .await
            .ok_or(PlacesError::OptionNotFound(option_index))?;

        form.apply_address_selection(entry_id, &option)?;
        adapter.clear().await;
        debug!(entry_id, option_index, "Address option applied");
        Ok(())
    }

    /// Drops timers and dropdowns of entries no longer in `form`.
    pub async fn retain<L: FormListener>(&self, form: &PointOfSaleForm<L>) {
        let live: Vec<String> = form.entries().into_iter().map(|e| e.id).collect();

        let stale: Vec<String> = {
            let mut adapters = self.adapters.lock().await;
            let stale = adapters
                .keys()
                .filter(|id| !live.contains(*id))
                .cloned()
                .collect::<Vec<_>>();
            for id in &stale {
                adapters.remove(id);
            }
            stale
        };

        for id in &stale {
            self.debouncer.cancel(id).await;
        }
        if !stale.is_empty() {
            info!(removed = stale.len(), "Dropped address lookups of removed entries");
        }
    }

    /// Cancels every pending timer and forgets all dropdowns.
    pub async fn reset(&self) {
        self.debouncer.cancel_all().await;
        self.adapters.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use merchant_core::form::{FormOptions, NoopListener};
    use merchant_core::validation::MSG_INCOMPLETE_ADDRESS;
    use merchant_core::{AddressOption, PosField};

    use crate::test_support::{option, Reply, ScriptedProvider};

    fn lookup(provider: ScriptedProvider) -> (AddressLookup, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let lookup = AddressLookup::new(provider.clone(), AutocompleteSettings::default());
        (lookup, provider)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_searches_once_with_last_text() {
        let (lookup, provider) = lookup(ScriptedProvider::new().reply(
            "via roma 1",
            0,
            Reply::Items(vec![option("A"), option("B")]),
        ));

        for text in ["via", "via r", "via roma", "via roma 1"] {
            lookup.input("entry-1", text).await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(provider.calls().is_empty());
        assert!(lookup.is_pending("entry-1").await);

        tokio::time::sleep(Duration::from_millis(800)).await;

        assert_eq!(provider.calls(), vec!["via roma 1".to_string()]);
        let state = lookup.state("entry-1").await;
        assert_eq!(state.options, vec![option("A"), option("B")]);
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_have_separate_dropdowns() {
        let (lookup, _) = lookup(
            ScriptedProvider::new()
                .reply("via roma 1", 0, Reply::Items(vec![option("A")]))
                .reply("corso como", 0, Reply::Items(vec![option("C")])),
        );

        lookup.input("entry-1", "via roma 1").await;
        lookup.input("entry-2", "corso como").await;
        tokio::time::sleep(Duration::from_millis(900)).await;

        assert_eq!(lookup.state("entry-1").await.options, vec![option("A")]);
        assert_eq!(lookup.state("entry-2").await.options, vec![option("C")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_fills_entry_by_id() {
        let (lookup, _) = lookup(
            ScriptedProvider::new().reply("via roma 1", 0, Reply::Items(vec![option("A")])),
        );
        let mut form = PointOfSaleForm::new(FormOptions::default(), NoopListener);
        form.add_entry();
        let id = form.entries()[1].id.clone();

        lookup.input(&id, "via roma 1").await;
        tokio::time::sleep(Duration::from_millis(900)).await;

        // The first entry goes away; the selection still lands on `id`.
        form.remove_entry(0);
        lookup.select(&mut form, &id, 0).await.unwrap();

        let entries = form.entries();
        let entry = &entries[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.address, "Via Roma 1");
        assert_eq!(entry.city, "Milano");
        assert_eq!(entry.zip_code, "20121");
        assert_eq!(entry.province, "MI");
        assert_eq!(entry.region, "Lombardia");
        assert!(lookup.state(&id).await.options.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_incomplete_option_sets_address_error() {
        let incomplete = AddressOption {
            title: Some("Milano".into()),
            ..AddressOption::default()
        };
        let (lookup, _) = lookup(
            ScriptedProvider::new().reply("milano centro", 0, Reply::Items(vec![incomplete])),
        );
        let mut form = PointOfSaleForm::new(FormOptions::default(), NoopListener);
        let id = form.entries()[0].id.clone();

        lookup.input(&id, "milano centro").await;
        tokio::time::sleep(Duration::from_millis(900)).await;
        lookup.select(&mut form, &id, 0).await.unwrap();

        assert_eq!(form.errors()[&0][&PosField::Address], MSG_INCOMPLETE_ADDRESS);
        assert_eq!(form.entries()[0].address, "");
    }

    #[tokio::test]
    async fn test_select_unknown_option() {
        let (lookup, _) = lookup(ScriptedProvider::new());
        let mut form = PointOfSaleForm::new(FormOptions::default(), NoopListener);
        let id = form.entries()[0].id.clone();

        let err = lookup.select(&mut form, &id, 0).await.unwrap_err();
        assert!(matches!(err, PlacesError::OptionNotFound(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retain_cancels_timers_of_removed_entries() {
        let (lookup, provider) = lookup(ScriptedProvider::new());
        let mut form = PointOfSaleForm::new(FormOptions::default(), NoopListener);
        form.add_entry();
        let removed = form.entries()[1].id.clone();

        lookup.input(&removed, "via roma 1").await;
        form.remove_entry(1);
        lookup.retain(&form).await;

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(provider.calls().is_empty());
        assert!(!lookup.is_pending(&removed).await);
    }
}
