//! # Address Search Providers
//!
//! [`AddressSearchProvider`] is the seam between the autocomplete adapter
//! and whatever answers "which addresses match this text".
//! [`HttpPlacesProvider`] talks to a geocode-style JSON endpoint:
//!
//! ```text
//! POST {endpoint}?key={api_key}
//! {"QueryText":"via roma 1","MaxResults":5,
//!  "Filter":{"IncludeCountries":["ITA"]},"Language":"it"}
//!
//! 200 {"ResultItems":[{"PlaceId":"..","Title":"..","Address":{..}}]}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, warn};

use merchant_core::SearchResponse;

use crate::config::ProviderSettings;
use crate::error::{PlacesError, PlacesResult};

/// Anything that can turn free text into address candidates.
#[async_trait]
pub trait AddressSearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> PlacesResult<SearchResponse>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchRequest<'a> {
    query_text: &'a str,
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<SearchFilter<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchFilter<'a> {
    include_countries: &'a [String],
}

/// HTTP client for a geocode/autocomplete endpoint.
///
/// Use [`HttpPlacesProvider::new`] with loaded settings or
/// [`HttpPlacesProvider::with_endpoint`] to point at a mock server in tests.
pub struct HttpPlacesProvider {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    max_results: u32,
    countries: Vec<String>,
    language: Option<String>,
}

impl HttpPlacesProvider {
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`PlacesError::InvalidUrl`] for an unparseable endpoint.
    pub fn new(settings: &ProviderSettings) -> PlacesResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .connect_timeout(Duration::from_secs(5))
            .user_agent("merchant-portal/0.1 (address-autocomplete)")
            .build()?;

        let endpoint = Url::parse(&settings.endpoint)?;

        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key.clone(),
            max_results: settings.max_results,
            countries: settings.countries.clone(),
            language: settings.language.clone(),
        })
    }

    /// Default settings aimed at `endpoint`.
    pub fn with_endpoint(endpoint: &str) -> PlacesResult<Self> {
        Self::new(&ProviderSettings {
            endpoint: endpoint.to_string(),
            ..ProviderSettings::default()
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }

    fn request_body<'a>(&'a self, query: &'a str) -> SearchRequest<'a> {
        SearchRequest {
            query_text: query,
            max_results: self.max_results,
            filter: (!self.countries.is_empty()).then(|| SearchFilter {
                include_countries: &self.countries,
            }),
            language: self.language.as_deref(),
        }
    }
}

#[async_trait]
impl AddressSearchProvider for HttpPlacesProvider {
    async fn search(&self, query: &str) -> PlacesResult<SearchResponse> {
        debug!(query, endpoint = %self.endpoint, "Searching addresses");

        let response = self
            .client
            .post(self.request_url())
            .json(&self.request_body(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Address provider rejected search");
            return Err(PlacesError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        debug!(results = parsed.result_items.len(), "Address search completed");
        Ok(parsed)
    }
}
