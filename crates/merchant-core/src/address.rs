//! # Address Candidates
//!
//! Shapes returned by the address-search provider, and the mapping from a
//! selected candidate to the flat address block of an entry.
//!
//! ```text
//! Provider item                     Entry fields
//! ─────────────────────────         ─────────────────────────────
//! Street + AddressNumber   ───────► address   ("Via Roma 1", "Via Po SNC")
//! Locality                 ───────► city
//! PostalCode               ───────► zipCode
//! Region.Name              ───────► region
//! SubRegion.Code           ───────► province
//! ```
//!
//! A candidate missing any of street/locality/postal code/region/sub-region
//! is rejected as incomplete; the house number alone may be absent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{PointOfSaleEntry, PosField};

/// House number used when the provider returns none.
pub const MISSING_HOUSE_NUMBER: &str = "SNC";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct AddressRegion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct AddressSubRegion {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Structured address as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct StructuredAddress {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub address_number: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub region: Option<AddressRegion>,
    #[serde(default)]
    pub sub_region: Option<AddressSubRegion>,
}

/// One autocomplete option.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct AddressOption {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address: Option<StructuredAddress>,
}

impl AddressOption {
    /// Text shown in the dropdown.
    pub fn display_label(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.address.as_ref().and_then(|a| a.label.clone()))
            .unwrap_or_default()
    }
}

/// Provider response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_items: Vec<AddressOption>,
}

/// The flat address block written into an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub region: String,
    pub province: String,
}

impl AddressFields {
    /// Writes the block into an entry.
    pub fn apply_to(&self, entry: &mut PointOfSaleEntry) {
        entry.address = self.address.clone();
        entry.city = self.city.clone();
        entry.zip_code = self.zip_code.clone();
        entry.region = self.region.clone();
        entry.province = self.province.clone();
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Maps a structured address to entry fields.
///
/// Returns the list of missing address parts when the candidate is
/// incomplete.
pub fn normalize_address(address: &StructuredAddress) -> Result<AddressFields, Vec<PosField>> {
    let street = present(address.street.as_ref());
    let city = present(address.locality.as_ref());
    let zip_code = present(address.postal_code.as_ref());
    let region = present(address.region.as_ref().and_then(|r| r.name.as_ref()));
    let province = present(address.sub_region.as_ref().and_then(|s| s.code.as_ref()));

    match (street, city, zip_code, region, province) {
        (Some(street), Some(city), Some(zip_code), Some(region), Some(province)) => {
            let number =
                present(address.address_number.as_ref()).unwrap_or(MISSING_HOUSE_NUMBER);
            Ok(AddressFields {
                address: format!("{street} {number}"),
                city: city.to_string(),
                zip_code: zip_code.to_string(),
                region: region.to_string(),
                province: province.to_string(),
            })
        }
        _ => {
            let missing = [
                (PosField::Address, street),
                (PosField::City, city),
                (PosField::ZipCode, zip_code),
                (PosField::Region, region),
                (PosField::Province, province),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.is_none().then_some(field))
            .collect();
            Err(missing)
        }
    }
}
