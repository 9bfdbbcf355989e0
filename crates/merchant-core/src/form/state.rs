//! # Multi-Entry State Container
//!
//! Owns the 1..=5 point-of-sale drafts, their validation shadows and their
//! errors, and republishes entries + errors to the parent after every
//! change.
//!
//! ## Slot Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  slots: Vec<EntrySlot>                                                  │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ entry (id=…) │  │ entry (id=…) │  │ entry (id=…) │   id: stable,     │
//! │  │ shadow       │  │ shadow       │  │ shadow       │   async key       │
//! │  │ errors       │  │ errors       │  │ errors       │   errors travel   │
//! │  └──────────────┘  └──────────────┘  └──────────────┘   with the entry  │
//! │        0                  1                 2        ◄── public index   │
//! │                                                                         │
//! │  publish(): entries[] + ErrorMap{index → errors} → FormListener         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Event Flow
//! ```text
//! keystroke ──► change_field(i, field, value)
//!                  │
//!                  ├── engine::validate_field ──► slot.errors updated
//!                  ├── value written into slot.entry (not city/zip/
//!                  │   region/province: selection only)
//!                  └── publish() ──► on_form_change / on_error_change
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::address::{normalize_address, AddressOption};
use crate::error::{CoreError, CoreResult};
use crate::form::engine::{
    missing_required_fields, validate_field, FieldTrigger, ValidationShadow,
};
use crate::form::errors::{merge_errors, ErrorMap, FieldErrors};
use crate::types::{PointOfSaleEntry, PosField, SalesPointType};
use crate::validation::MSG_INCOMPLETE_ADDRESS;
use crate::MAX_POINTS_OF_SALE;

// =============================================================================
// Options & Listener
// =============================================================================

/// Tunables for the form container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    /// Upper bound on the number of entries.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// When true, switching one entry between PHYSICAL and ONLINE wipes the
    /// errors of every entry, not only the switched one.
    #[serde(default)]
    pub clear_all_errors_on_type_change: bool,
}

fn default_max_entries() -> usize {
    MAX_POINTS_OF_SALE
}

impl Default for FormOptions {
    fn default() -> Self {
        FormOptions {
            max_entries: default_max_entries(),
            clear_all_errors_on_type_change: false,
        }
    }
}

/// Parent-side sink for form updates.
pub trait FormListener {
    fn on_form_change(&mut self, entries: &[PointOfSaleEntry]);
    fn on_error_change(&mut self, errors: &ErrorMap);
}

/// Listener that drops every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl FormListener for NoopListener {
    fn on_form_change(&mut self, _entries: &[PointOfSaleEntry]) {}
    fn on_error_change(&mut self, _errors: &ErrorMap) {}
}

// =============================================================================
// Slots
// =============================================================================

#[derive(Debug, Clone)]
struct EntrySlot {
    entry: PointOfSaleEntry,
    shadow: ValidationShadow,
    errors: FieldErrors,
}

impl EntrySlot {
    fn blank() -> Self {
        EntrySlot {
            entry: PointOfSaleEntry::blank(),
            shadow: ValidationShadow::default(),
            errors: FieldErrors::new(),
        }
    }
}

// =============================================================================
// Form
// =============================================================================

/// The point-of-sale multi-entry form.
///
/// ## Invariants
/// - At most `min(options.max_entries, 5)` entries (`add_entry` is a no-op past it)
/// - Entry ids are unique for the lifetime of the form
/// - Published error maps never contain an index with no field errors
pub struct PointOfSaleForm<L: FormListener> {
    slots: Vec<EntrySlot>,
    options: FormOptions,
    listener: L,
    points_of_sale_loaded: bool,
    published: Option<(Vec<PointOfSaleEntry>, ErrorMap)>,
}

impl<L: FormListener> PointOfSaleForm<L> {
    /// Mounts the form with one blank PHYSICAL entry and publishes it.
    pub fn new(options: FormOptions, listener: L) -> Self {
        let mut form = PointOfSaleForm {
            slots: vec![EntrySlot::blank()],
            options,
            listener,
            points_of_sale_loaded: false,
            published: None,
        };
        form.publish();
        form
    }

    fn slot_mut(&mut self, index: usize) -> CoreResult<&mut EntrySlot> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Current entries, in display order.
    pub fn entries(&self) -> Vec<PointOfSaleEntry> {
        self.slots.iter().map(|slot| slot.entry.clone()).collect()
    }

    pub fn entry(&self, index: usize) -> Option<&PointOfSaleEntry> {
        self.slots.get(index).map(|slot| &slot.entry)
    }

    /// Current index of the entry with this id.
    pub fn entry_index(&self, entry_id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.entry.id == entry_id)
    }

    /// The confirm-email value typed for entry `index`.
    pub fn confirm_contact_email(&self, index: usize) -> Option<&str> {
        self.slots
            .get(index)
            .map(|slot| slot.shadow.confirm_contact_email.as_str())
    }

    /// Local errors keyed by current index.
    pub fn errors(&self) -> ErrorMap {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.errors.is_empty())
            .map(|(index, slot)| (index, slot.errors.clone()))
            .collect()
    }

    /// Errors to render: local errors overlaid with server-side ones.
    pub fn display_errors(&self, external: Option<&ErrorMap>) -> ErrorMap {
        match external {
            Some(external) => merge_errors(&self.errors(), external),
            None => self.errors(),
        }
    }

    /// `max_entries` never lifts the cap above [`MAX_POINTS_OF_SALE`].
    pub fn can_add(&self) -> bool {
        self.slots.len() < self.max_entries()
    }

    fn max_entries(&self) -> usize {
        self.options.max_entries.min(MAX_POINTS_OF_SALE)
    }

    /// Whether the UI offers a delete button for entry `index`.
    pub fn can_remove(&self, index: usize) -> bool {
        index > 0 && index < self.slots.len()
    }

    /// True when no entry has errors or blank required fields.
    pub fn is_submittable(&self) -> bool {
        !self.slots.is_empty()
            && self.slots.iter().all(|slot| {
                slot.errors.is_empty() && missing_required_fields(&slot.entry, &slot.shadow).is_empty()
            })
    }

    // =========================================================================
    // Field Events
    // =========================================================================

    /// Handles a change event on a field of entry `index`.
    ///
    /// `Type` changes are routed to [`PointOfSaleForm::change_type`].
    /// City, zip code, region and province are validated but never written:
    /// only [`PointOfSaleForm::apply_address_selection`] fills them.
    pub fn change_field(&mut self, index: usize, field: PosField, value: &str) -> CoreResult<()> {
        if field == PosField::Type {
            let sales_point_type = value.parse::<SalesPointType>()?;
            return self.change_type(index, sales_point_type);
        }
        self.apply_event(index, field, value, FieldTrigger::Change)
    }

    /// Handles a blur event. Writes the value and runs blur-only rules.
    pub fn blur_field(&mut self, index: usize, field: PosField, value: &str) -> CoreResult<()> {
        if field == PosField::Type {
            return Ok(());
        }
        self.apply_event(index, field, value, FieldTrigger::Blur)
    }

    fn apply_event(
        &mut self,
        index: usize,
        field: PosField,
        value: &str,
        trigger: FieldTrigger,
    ) -> CoreResult<()> {
        let slot = self.slot_mut(index)?;

        let outcome = validate_field(&slot.entry, &slot.shadow, field, value, trigger);
        outcome.apply_to(&mut slot.errors);

        if field == PosField::ConfirmContactEmail {
            slot.shadow.confirm_contact_email = value.to_string();
        } else if !field.is_selection_only() {
            slot.entry.set_value(field, value);
        }

        debug!(
            index,
            field = %field,
            ?trigger,
            errors = slot.errors.len(),
            "Point of sale field updated"
        );

        self.publish();
        Ok(())
    }

    /// Switches entry `index` between PHYSICAL and ONLINE.
    ///
    /// No field rule runs. The switched entry's errors are wiped, or every
    /// entry's when `clear_all_errors_on_type_change` is set.
    pub fn change_type(&mut self, index: usize, sales_point_type: SalesPointType) -> CoreResult<()> {
        let clear_all = self.options.clear_all_errors_on_type_change;
        self.slot_mut(index)?.entry.sales_point_type = sales_point_type;

        if clear_all {
            for slot in &mut self.slots {
                slot.errors.clear();
            }
        } else {
            self.slots[index].errors.clear();
        }

        debug!(index, %sales_point_type, clear_all, "Point of sale type changed");
        self.publish();
        Ok(())
    }

    /// Fills the address block of the entry with `entry_id` from an
    /// autocomplete selection.
    ///
    /// Incomplete candidates set the address error and leave every address
    /// field as it was.
    pub fn apply_address_selection(
        &mut self,
        entry_id: &str,
        option: &AddressOption,
    ) -> CoreResult<()> {
        let index = self
            .entry_index(entry_id)
            .ok_or_else(|| CoreError::EntryNotFound(entry_id.to_string()))?;
        let slot = self.slot_mut(index)?;

        let normalized = option
            .address
            .as_ref()
            .ok_or_else(Vec::new)
            .and_then(normalize_address);

        match normalized {
            Ok(fields) => {
                fields.apply_to(&mut slot.entry);
                slot.errors.remove(&PosField::Address);
                debug!(index, city = %fields.city, "Address selected");
            }
            Err(missing) => {
                slot.errors
                    .insert(PosField::Address, MSG_INCOMPLETE_ADDRESS.to_string());
                debug!(index, ?missing, "Incomplete address rejected");
            }
        }

        self.publish();
        Ok(())
    }

    // =========================================================================
    // List Operations
    // =========================================================================

    /// Appends a blank PHYSICAL entry. No-op at capacity.
    pub fn add_entry(&mut self) {
        if !self.can_add() {
            debug!(max = self.max_entries(), "Point of sale limit reached");
            return;
        }
        self.slots.push(EntrySlot::blank());
        self.publish();
    }

    /// Removes the entry at `index`. Any index is accepted, including the
    /// last remaining entry (which leaves the list empty); out-of-range
    /// indices match nothing.
    pub fn remove_entry(&mut self, index: usize) {
        if index >= self.slots.len() {
            warn!(index, len = self.slots.len(), "Remove ignored, no such entry");
            return;
        }
        self.slots.remove(index);
        self.publish();
    }

    /// Back to exactly one blank PHYSICAL entry with no errors.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.slots.push(EntrySlot::blank());
        self.publish();
    }

    /// Mirrors the parent's `pointsOfSaleLoaded` flag; resets on the
    /// false → true edge.
    pub fn set_points_of_sale_loaded(&mut self, loaded: bool) {
        let rising = loaded && !self.points_of_sale_loaded;
        self.points_of_sale_loaded = loaded;
        if rising {
            debug!("Points of sale loaded, resetting form");
            self.reset();
        }
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    fn publish(&mut self) {
        let entries = self.entries();
        let errors = self.errors();

        let unchanged = matches!(
            &self.published,
            Some((last_entries, last_errors)) if *last_entries == entries && *last_errors == errors
        );
        if unchanged {
            return;
        }

        self.listener.on_form_change(&entries);
        self.listener.on_error_change(&errors);
        self.published = Some((entries, errors));
    }
}

impl Default for PointOfSaleForm<NoopListener> {
    fn default() -> Self {
        PointOfSaleForm::new(FormOptions::default(), NoopListener)
    }
}
