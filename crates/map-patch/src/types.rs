//! Core types for the map patch module.
//!
//! A [`MapPatch`] is an immutable descriptor of up to seven
//! independently-optional operations over a `string → i32` map. Each field
//! is tri-state in spirit: absent (`None`) means "no-op for that step" and
//! is a different value than a present-but-empty collection.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

/// The map type a patch applies to.
pub type Entries = IndexMap<String, i32>;

/// The key set carried by the `remove` operation.
pub type Keys = IndexSet<String>;

/// Nested value patches keyed by the map key they refine.
pub type ValuePatches = IndexMap<String, I32Patch>;

// ── Value patch seam ──────────────────────────────────────────────────────

/// Anything that can transform one value into another.
///
/// Map patches, struct patches, and scalar patches all share this contract,
/// which is what lets the apply engine treat nested patches as black boxes.
pub trait ValuePatch<V> {
    /// Applies this patch to `value`, producing the patched value.
    fn apply(&self, value: V) -> V;
}

// ── Field identity ────────────────────────────────────────────────────────

/// The seven operations a [`MapPatch`] may carry.
///
/// Used by the validator to report which field triggered a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Assign,
    Clear,
    PatchPrior,
    Add,
    Patch,
    Remove,
    Put,
}

impl Field {
    /// Returns the field name as it appears in the schema.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Assign => "assign",
            Field::Clear => "clear",
            Field::PatchPrior => "patchPrior",
            Field::Add => "add",
            Field::Patch => "patch",
            Field::Remove => "remove",
            Field::Put => "put",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── I32Patch ──────────────────────────────────────────────────────────────

/// A patch for a single `i32` value.
///
/// `assign` wins over everything else; otherwise `clear` resets the value
/// to zero and `add` adds a delta (wrapping, so apply is total).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct I32Patch {
    assign: Option<i32>,
    clear: Option<bool>,
    add: Option<i32>,
}

impl I32Patch {
    /// Constructs a patch from its three optional operations.
    pub fn new(assign: Option<i32>, clear: Option<bool>, add: Option<i32>) -> Self {
        Self { assign, clear, add }
    }

    /// A patch that replaces the value outright.
    pub fn assign_to(value: i32) -> Self {
        Self::new(Some(value), None, None)
    }

    /// A patch that adds `delta` to the value.
    pub fn add_delta(delta: i32) -> Self {
        Self::new(None, None, Some(delta))
    }

    /// The replacement value, if set.
    pub fn assign(&self) -> Option<i32> {
        self.assign
    }

    /// The clear flag, if set.
    pub fn clear(&self) -> Option<bool> {
        self.clear
    }

    /// The additive delta, if set.
    pub fn add(&self) -> Option<i32> {
        self.add
    }
}

impl ValuePatch<i32> for I32Patch {
    fn apply(&self, value: i32) -> i32 {
        if let Some(assign) = self.assign {
            return assign;
        }
        let mut val = if self.clear == Some(true) { 0 } else { value };
        if let Some(delta) = self.add {
            val = val.wrapping_add(delta);
        }
        val
    }
}

// ── MapPatch ──────────────────────────────────────────────────────────────

/// An immutable descriptor of partial mutations for a `string → i32` map.
///
/// Every field is independently optional; an all-absent descriptor is the
/// identity patch. Fields cannot be mutated after construction — build a
/// descriptor with [`MapPatch::new`] or
/// [`MapPatchBuilder`](crate::builder::MapPatchBuilder) and apply it with
/// [`apply`](crate::apply::apply).
///
/// Structural equality includes presence: a descriptor with `add: None`
/// differs from one with `add: Some(empty)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPatch {
    /// Full replacement value. If set, all other operations are ignored.
    assign: Option<Entries>,
    /// Empties the map. Applies first.
    clear: Option<bool>,
    /// Patches entries that survive `clear`. Applies second.
    patch_prior: Option<ValuePatches>,
    /// Inserts values where the key is not already present. Applies fourth.
    add: Option<Entries>,
    /// Patches any present entry, including newly inserted ones. Applies last.
    patch: Option<ValuePatches>,
    /// Removes entries, if present. Applies third.
    remove: Option<Keys>,
    /// Inserts or overwrites key/value pairs. Applies fifth.
    put: Option<Entries>,
}

impl MapPatch {
    /// Constructs a descriptor from its seven optional operations.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        assign: Option<Entries>,
        clear: Option<bool>,
        patch_prior: Option<ValuePatches>,
        add: Option<Entries>,
        patch: Option<ValuePatches>,
        remove: Option<Keys>,
        put: Option<Entries>,
    ) -> Self {
        Self {
            assign,
            clear,
            patch_prior,
            add,
            patch,
            remove,
            put,
        }
    }

    /// The identity patch: every field absent, `apply` returns the base map
    /// unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The full replacement value, if set.
    pub fn assign(&self) -> Option<&Entries> {
        self.assign.as_ref()
    }

    /// The clear flag, if set.
    pub fn clear(&self) -> Option<bool> {
        self.clear
    }

    /// Patches for entries that predate this patch application, if set.
    pub fn patch_prior(&self) -> Option<&ValuePatches> {
        self.patch_prior.as_ref()
    }

    /// Insert-if-absent entries, if set.
    pub fn add(&self) -> Option<&Entries> {
        self.add.as_ref()
    }

    /// Patches applied to the final key set, if set.
    pub fn patch(&self) -> Option<&ValuePatches> {
        self.patch.as_ref()
    }

    /// Keys to delete, if set.
    pub fn remove(&self) -> Option<&Keys> {
        self.remove.as_ref()
    }

    /// Unconditional insert-or-overwrite entries, if set.
    pub fn put(&self) -> Option<&Entries> {
        self.put.as_ref()
    }

    /// Whether the full replacement value is set.
    pub fn has_assign(&self) -> bool {
        self.assign.is_some()
    }

    /// Whether the clear flag is set.
    pub fn has_clear(&self) -> bool {
        self.clear.is_some()
    }

    /// Whether prior-entry patches are set.
    pub fn has_patch_prior(&self) -> bool {
        self.patch_prior.is_some()
    }

    /// Whether insert-if-absent entries are set.
    pub fn has_add(&self) -> bool {
        self.add.is_some()
    }

    /// Whether final-key-set patches are set.
    pub fn has_patch(&self) -> bool {
        self.patch.is_some()
    }

    /// Whether keys to delete are set.
    pub fn has_remove(&self) -> bool {
        self.remove.is_some()
    }

    /// Whether insert-or-overwrite entries are set.
    pub fn has_put(&self) -> bool {
        self.put.is_some()
    }

    /// Returns true if every field is absent.
    pub fn is_identity(&self) -> bool {
        self.present_fields().is_empty()
    }

    /// The fields that are present, in apply order.
    pub fn present_fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.assign.is_some() {
            fields.push(Field::Assign);
        }
        if self.clear.is_some() {
            fields.push(Field::Clear);
        }
        if self.patch_prior.is_some() {
            fields.push(Field::PatchPrior);
        }
        if self.remove.is_some() {
            fields.push(Field::Remove);
        }
        if self.add.is_some() {
            fields.push(Field::Add);
        }
        if self.put.is_some() {
            fields.push(Field::Put);
        }
        if self.patch.is_some() {
            fields.push(Field::Patch);
        }
        fields
    }
}

impl ValuePatch<Entries> for MapPatch {
    fn apply(&self, value: Entries) -> Entries {
        crate::apply::apply(&value, self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_differs_from_empty() {
        let absent = MapPatch::identity();
        let empty_add = MapPatch::new(
            None,
            None,
            None,
            Some(Entries::new()),
            None,
            None,
            None,
        );
        assert_ne!(absent, empty_add);
    }

    #[test]
    fn identity_has_no_present_fields() {
        assert!(MapPatch::identity().is_identity());
        assert_eq!(MapPatch::identity().present_fields(), vec![]);
    }

    #[test]
    fn present_fields_in_apply_order() {
        let patch = MapPatch::new(
            None,
            Some(true),
            None,
            Some(Entries::new()),
            None,
            Some(Keys::new()),
            None,
        );
        assert_eq!(
            patch.present_fields(),
            vec![Field::Clear, Field::Remove, Field::Add]
        );
    }

    #[test]
    fn presence_queries_track_optional_fields() {
        let patch = MapPatch::new(None, Some(false), None, None, None, None, None);
        assert!(patch.has_clear());
        assert!(!patch.has_assign());
        assert!(!patch.has_patch_prior());
        assert!(!patch.has_add());
        assert!(!patch.has_patch());
        assert!(!patch.has_remove());
        assert!(!patch.has_put());

        let patch = MapPatch::new(
            Some(Entries::new()),
            None,
            Some(ValuePatches::new()),
            Some(Entries::new()),
            Some(ValuePatches::new()),
            Some(Keys::new()),
            Some(Entries::new()),
        );
        assert!(patch.has_assign());
        assert!(!patch.has_clear());
        assert!(patch.has_patch_prior());
        assert!(patch.has_add());
        assert!(patch.has_patch());
        assert!(patch.has_remove());
        assert!(patch.has_put());
    }

    #[test]
    fn clone_is_deep() {
        let mut entries = Entries::new();
        entries.insert("a".to_string(), 1);
        let patch = MapPatch::new(Some(entries), None, None, None, None, None, None);
        let copy = patch.clone();
        assert_eq!(patch, copy);
        drop(patch);
        assert_eq!(copy.assign().unwrap().get("a"), Some(&1));
    }

    #[test]
    fn i32_patch_assign_wins() {
        let patch = I32Patch::new(Some(7), Some(true), Some(100));
        assert_eq!(patch.apply(42), 7);
    }

    #[test]
    fn i32_patch_clear_then_add() {
        let patch = I32Patch::new(None, Some(true), Some(5));
        assert_eq!(patch.apply(42), 5);
    }

    #[test]
    fn i32_patch_add_only() {
        assert_eq!(I32Patch::add_delta(3).apply(4), 7);
    }

    #[test]
    fn i32_patch_add_wraps() {
        assert_eq!(I32Patch::add_delta(1).apply(i32::MAX), i32::MIN);
    }

    #[test]
    fn i32_patch_identity() {
        assert_eq!(I32Patch::default().apply(42), 42);
    }

    #[test]
    fn field_names() {
        assert_eq!(Field::PatchPrior.name(), "patchPrior");
        assert_eq!(Field::Put.to_string(), "put");
    }
}
