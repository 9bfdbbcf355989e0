//! Error map shapes shared by the engine, the container and the parent.
//!
//! ```text
//! ErrorMap
//! ├── 0 → { franchiseName: "Campo obbligatorio" }
//! └── 2 → { contactEmail: "Email non valida",
//!           confirmContactEmail: "Le email non coincidono" }
//! ```
//!
//! An index with no remaining field errors is removed, never left as `{}`.

use std::collections::BTreeMap;

use crate::types::PosField;

/// Field name → message for one entry.
pub type FieldErrors = BTreeMap<PosField, String>;

/// Entry index → field errors.
pub type ErrorMap = BTreeMap<usize, FieldErrors>;

/// Records `message` for `field` of entry `index`.
pub fn set_field_error(map: &mut ErrorMap, index: usize, field: PosField, message: &str) {
    map.entry(index)
        .or_default()
        .insert(field, message.to_string());
}

/// Removes the error for `field` of entry `index`, pruning the entry when
/// it has nothing left.
pub fn clear_field_error(map: &mut ErrorMap, index: usize, field: PosField) {
    if let Some(fields) = map.get_mut(&index) {
        fields.remove(&field);
        if fields.is_empty() {
            map.remove(&index);
        }
    }
}

/// Overlays `external` on `local`. External messages win on matching
/// (index, field) keys; everything else from both sides is kept.
pub fn merge_errors(local: &ErrorMap, external: &ErrorMap) -> ErrorMap {
    let mut merged = local.clone();
    for (index, fields) in external {
        if fields.is_empty() {
            continue;
        }
        let target = merged.entry(*index).or_default();
        for (field, message) in fields {
            target.insert(*field, message.clone());
        }
    }
    merged
}

/// Total number of field errors across every entry.
pub fn error_count(map: &ErrorMap) -> usize {
    map.values().map(BTreeMap::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_prunes_empty_entries() {
        let mut map = ErrorMap::new();
        set_field_error(&mut map, 1, PosField::City, " ");
        set_field_error(&mut map, 1, PosField::ZipCode, " ");
        assert_eq!(error_count(&map), 2);

        clear_field_error(&mut map, 1, PosField::City);
        assert_eq!(map[&1].len(), 1);

        clear_field_error(&mut map, 1, PosField::ZipCode);
        assert!(map.is_empty());

        // Clearing something absent is a no-op.
        clear_field_error(&mut map, 4, PosField::City);
        assert!(map.is_empty());
    }

    #[test]
    fn test_merge_prefers_external_messages() {
        let mut local = ErrorMap::new();
        set_field_error(&mut local, 0, PosField::FranchiseName, "Campo obbligatorio");
        set_field_error(&mut local, 0, PosField::ContactName, "Campo obbligatorio");

        let mut external = ErrorMap::new();
        set_field_error(&mut external, 0, PosField::FranchiseName, "Insegna già registrata");
        set_field_error(&mut external, 3, PosField::Website, "Dominio non raggiungibile");
        external.insert(5, FieldErrors::new());

        let merged = merge_errors(&local, &external);
        assert_eq!(merged[&0][&PosField::FranchiseName], "Insegna già registrata");
        assert_eq!(merged[&0][&PosField::ContactName], "Campo obbligatorio");
        assert_eq!(merged[&3][&PosField::Website], "Dominio non raggiungibile");
        assert!(!merged.contains_key(&5));
    }

    #[test]
    fn test_error_map_serializes_with_field_names() {
        let mut map = ErrorMap::new();
        set_field_error(&mut map, 0, PosField::ZipCode, " ");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["0"]["zipCode"], " ");
    }
}
