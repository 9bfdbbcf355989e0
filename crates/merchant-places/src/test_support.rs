//! Scripted provider shared by the async unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use merchant_core::address::{AddressRegion, AddressSubRegion, StructuredAddress};
use merchant_core::{AddressOption, SearchResponse};

use crate::error::{PlacesError, PlacesResult};
use crate::provider::AddressSearchProvider;

#[derive(Clone)]
pub(crate) enum Reply {
    Items(Vec<AddressOption>),
    Fail,
}

/// Answers each query from a script, after an optional delay.
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    script: HashMap<String, (Duration, Reply)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, query: &str, delay_ms: u64, reply: Reply) -> Self {
        self.script
            .insert(query.to_string(), (Duration::from_millis(delay_ms), reply));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddressSearchProvider for ScriptedProvider {
    async fn search(&self, query: &str) -> PlacesResult<SearchResponse> {
        self.calls.lock().unwrap().push(query.to_string());

        let (delay, reply) = self
            .script
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Items(Vec::new())));
        tokio::time::sleep(delay).await;

        match reply {
            Reply::Items(result_items) => Ok(SearchResponse { result_items }),
            Reply::Fail => Err(PlacesError::Status {
                status: 500,
                body: "boom".into(),
            }),
        }
    }
}

/// A complete Milan address titled `title`.
pub(crate) fn option(title: &str) -> AddressOption {
    AddressOption {
        place_id: Some(format!("place-{title}")),
        title: Some(title.to_string()),
        address: Some(StructuredAddress {
            label: Some(format!("{title}, Milano")),
            street: Some("Via Roma".into()),
            address_number: Some("1".into()),
            locality: Some("Milano".into()),
            postal_code: Some("20121".into()),
            region: Some(AddressRegion {
                name: Some("Lombardia".into()),
                code: Some("LOM".into()),
            }),
            sub_region: Some(AddressSubRegion {
                code: Some("MI".into()),
                name: Some("Milano".into()),
            }),
        }),
    }
}
