//! # Domain Types
//!
//! Types describing one point-of-sale draft in the registration form.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │  PointOfSaleEntry    │   │ SalesPointType  │   │    PosField     │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id (UUID, local)    │   │  PHYSICAL       │   │  one variant    │  │
//! │  │  type                │   │  ONLINE         │   │  per form input │  │
//! │  │  franchiseName       │   └─────────────────┘   └─────────────────┘  │
//! │  │  address block       │                                              │
//! │  │  website             │   PHYSICAL → address block required,        │
//! │  │  contact block       │              channel fields rendered        │
//! │  │  channel block       │   ONLINE   → website required               │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;

// =============================================================================
// Sales Point Type
// =============================================================================

/// Whether a point of sale is a shop with an address or a website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesPointType {
    /// Physical shop. Address comes from the autocomplete only.
    #[default]
    Physical,
    /// E-commerce site. Website is mandatory.
    Online,
}

impl SalesPointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesPointType::Physical => "PHYSICAL",
            SalesPointType::Online => "ONLINE",
        }
    }
}

impl fmt::Display for SalesPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalesPointType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PHYSICAL" => Ok(SalesPointType::Physical),
            "ONLINE" => Ok(SalesPointType::Online),
            other => Err(ValidationError::InvalidFormat {
                field: "type".to_string(),
                reason: format!("unknown point of sale type '{other}'"),
            }),
        }
    }
}

// =============================================================================
// Form Fields
// =============================================================================

/// Every input of a point-of-sale entry, as named by the frontend.
///
/// `ConfirmContactEmail` has no slot in [`PointOfSaleEntry`]: it only lives
/// in the validation shadow kept by the form container.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum PosField {
    Type,
    FranchiseName,
    Address,
    City,
    ZipCode,
    Region,
    Province,
    Website,
    ContactName,
    ContactSurname,
    ContactEmail,
    ConfirmContactEmail,
    ChannelEmail,
    ChannelPhone,
    ChannelGeolink,
    ChannelWebsite,
}

impl PosField {
    pub const ALL: [PosField; 16] = [
        PosField::Type,
        PosField::FranchiseName,
        PosField::Address,
        PosField::City,
        PosField::ZipCode,
        PosField::Region,
        PosField::Province,
        PosField::Website,
        PosField::ContactName,
        PosField::ContactSurname,
        PosField::ContactEmail,
        PosField::ConfirmContactEmail,
        PosField::ChannelEmail,
        PosField::ChannelPhone,
        PosField::ChannelGeolink,
        PosField::ChannelWebsite,
    ];

    /// Field name as used in the frontend and in serialized error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosField::Type => "type",
            PosField::FranchiseName => "franchiseName",
            PosField::Address => "address",
            PosField::City => "city",
            PosField::ZipCode => "zipCode",
            PosField::Region => "region",
            PosField::Province => "province",
            PosField::Website => "website",
            PosField::ContactName => "contactName",
            PosField::ContactSurname => "contactSurname",
            PosField::ContactEmail => "contactEmail",
            PosField::ConfirmContactEmail => "confirmContactEmail",
            PosField::ChannelEmail => "channelEmail",
            PosField::ChannelPhone => "channelPhone",
            PosField::ChannelGeolink => "channelGeolink",
            PosField::ChannelWebsite => "channelWebsite",
        }
    }

    /// Fields written by an autocomplete selection.
    pub fn is_address_block(&self) -> bool {
        matches!(
            self,
            PosField::Address
                | PosField::City
                | PosField::ZipCode
                | PosField::Region
                | PosField::Province
        )
    }

    /// Read-only to the user: the address block minus the free-text
    /// `address` input.
    pub fn is_selection_only(&self) -> bool {
        self.is_address_block() && *self != PosField::Address
    }
}

impl fmt::Display for PosField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Some portal screens spell it `webSite`.
        if s == "webSite" {
            return Ok(PosField::Website);
        }
        PosField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "field".to_string(),
                reason: format!("unknown point of sale field '{s}'"),
            })
    }
}

// =============================================================================
// Point of Sale Entry
// =============================================================================

/// One point of sale being drafted.
///
/// All text fields default to the empty string so that a blank entry
/// serializes the same way the frontend initializes its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PointOfSaleEntry {
    /// Client-generated id. Used for list keys and async correlation,
    /// stripped by [`PointOfSaleEntry::to_submission`].
    pub id: String,

    #[serde(rename = "type")]
    pub sales_point_type: SalesPointType,

    #[serde(default)]
    pub franchise_name: String,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub province: String,

    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_surname: String,
    #[serde(default)]
    pub contact_email: String,

    #[serde(default)]
    pub channel_email: String,
    #[serde(default)]
    pub channel_phone: String,
    #[serde(default)]
    pub channel_geolink: String,
    #[serde(default)]
    pub channel_website: String,
}

impl PointOfSaleEntry {
    /// Creates a blank PHYSICAL entry with a fresh UUID v4 id.
    pub fn blank() -> Self {
        PointOfSaleEntry {
            id: Uuid::new_v4().to_string(),
            sales_point_type: SalesPointType::Physical,
            franchise_name: String::new(),
            address: String::new(),
            city: String::new(),
            zip_code: String::new(),
            region: String::new(),
            province: String::new(),
            website: String::new(),
            contact_name: String::new(),
            contact_surname: String::new(),
            contact_email: String::new(),
            channel_email: String::new(),
            channel_phone: String::new(),
            channel_geolink: String::new(),
            channel_website: String::new(),
        }
    }

    pub fn is_physical(&self) -> bool {
        self.sales_point_type == SalesPointType::Physical
    }

    pub fn is_online(&self) -> bool {
        self.sales_point_type == SalesPointType::Online
    }

    /// Reads a text field. `Type` and `ConfirmContactEmail` have no text
    /// slot here and return `None`.
    pub fn value(&self, field: PosField) -> Option<&str> {
        let value = match field {
            PosField::Type | PosField::ConfirmContactEmail => return None,
            PosField::FranchiseName => &self.franchise_name,
            PosField::Address => &self.address,
            PosField::City => &self.city,
            PosField::ZipCode => &self.zip_code,
            PosField::Region => &self.region,
            PosField::Province => &self.province,
            PosField::Website => &self.website,
            PosField::ContactName => &self.contact_name,
            PosField::ContactSurname => &self.contact_surname,
            PosField::ContactEmail => &self.contact_email,
            PosField::ChannelEmail => &self.channel_email,
            PosField::ChannelPhone => &self.channel_phone,
            PosField::ChannelGeolink => &self.channel_geolink,
            PosField::ChannelWebsite => &self.channel_website,
        };
        Some(value.as_str())
    }

    /// Writes a text field. Returns `false` when the field has no text slot.
    pub fn set_value(&mut self, field: PosField, value: &str) -> bool {
        let slot = match field {
            PosField::Type | PosField::ConfirmContactEmail => return false,
            PosField::FranchiseName => &mut self.franchise_name,
            PosField::Address => &mut self.address,
            PosField::City => &mut self.city,
            PosField::ZipCode => &mut self.zip_code,
            PosField::Region => &mut self.region,
            PosField::Province => &mut self.province,
            PosField::Website => &mut self.website,
            PosField::ContactName => &mut self.contact_name,
            PosField::ContactSurname => &mut self.contact_surname,
            PosField::ContactEmail => &mut self.contact_email,
            PosField::ChannelEmail => &mut self.channel_email,
            PosField::ChannelPhone => &mut self.channel_phone,
            PosField::ChannelGeolink => &mut self.channel_geolink,
            PosField::ChannelWebsite => &mut self.channel_website,
        };
        *slot = value.to_string();
        true
    }

    /// JSON body sent to the registration API: the entry without its
    /// client-only `id`.
    pub fn to_submission(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        if let Some(object) = value.as_object_mut() {
            object.remove("id");
        }
        value
    }
}

impl Default for PointOfSaleEntry {
    fn default() -> Self {
        PointOfSaleEntry::blank()
    }
}
