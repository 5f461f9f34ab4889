//! [`MapPatchBuilder`] — fluent builder for constructing [`MapPatch`]es.
//!
//! The descriptor itself is immutable; the builder is the one place where a
//! patch is assembled field by field before being frozen with
//! [`build`](MapPatchBuilder::build).

use crate::types::{Entries, I32Patch, Keys, MapPatch, ValuePatches};

/// Accumulates the seven optional operations of a [`MapPatch`].
///
/// Whole-field setters replace the field; entry-level helpers materialize
/// the field on first use, so a never-touched field stays absent rather
/// than becoming an empty collection.
///
/// # Example
///
/// ```
/// use map_patch::{I32Patch, MapPatchBuilder};
///
/// let patch = MapPatchBuilder::new()
///     .remove_key("b")
///     .add_entry("c", 3)
///     .put_entry("a", 5)
///     .patch_entry("a", I32Patch::add_delta(1))
///     .build();
/// assert_eq!(patch.present_fields().len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapPatchBuilder {
    assign: Option<Entries>,
    clear: Option<bool>,
    patch_prior: Option<ValuePatches>,
    add: Option<Entries>,
    patch: Option<ValuePatches>,
    remove: Option<Keys>,
    put: Option<Entries>,
}

impl MapPatchBuilder {
    /// Creates a builder with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full replacement value.
    pub fn assign(mut self, entries: Entries) -> Self {
        self.assign = Some(entries);
        self
    }

    /// Sets the clear flag.
    pub fn clear(mut self, clear: bool) -> Self {
        self.clear = Some(clear);
        self
    }

    /// Sets the whole `patchPrior` field.
    pub fn patch_prior(mut self, patches: ValuePatches) -> Self {
        self.patch_prior = Some(patches);
        self
    }

    /// Sets the whole `add` field.
    pub fn add(mut self, entries: Entries) -> Self {
        self.add = Some(entries);
        self
    }

    /// Sets the whole `patch` field.
    pub fn patch(mut self, patches: ValuePatches) -> Self {
        self.patch = Some(patches);
        self
    }

    /// Sets the whole `remove` field.
    pub fn remove(mut self, keys: Keys) -> Self {
        self.remove = Some(keys);
        self
    }

    /// Sets the whole `put` field.
    pub fn put(mut self, entries: Entries) -> Self {
        self.put = Some(entries);
        self
    }

    /// Adds one nested patch to `patchPrior`.
    pub fn patch_prior_entry(mut self, key: impl Into<String>, vp: I32Patch) -> Self {
        self.patch_prior
            .get_or_insert_with(ValuePatches::new)
            .insert(key.into(), vp);
        self
    }

    /// Adds one insert-if-absent entry.
    pub fn add_entry(mut self, key: impl Into<String>, value: i32) -> Self {
        self.add
            .get_or_insert_with(Entries::new)
            .insert(key.into(), value);
        self
    }

    /// Adds one nested patch to `patch`.
    pub fn patch_entry(mut self, key: impl Into<String>, vp: I32Patch) -> Self {
        self.patch
            .get_or_insert_with(ValuePatches::new)
            .insert(key.into(), vp);
        self
    }

    /// Adds one key to `remove`.
    pub fn remove_key(mut self, key: impl Into<String>) -> Self {
        self.remove
            .get_or_insert_with(Keys::new)
            .insert(key.into());
        self
    }

    /// Adds one insert-or-overwrite entry.
    pub fn put_entry(mut self, key: impl Into<String>, value: i32) -> Self {
        self.put
            .get_or_insert_with(Entries::new)
            .insert(key.into(), value);
        self
    }

    /// Freezes the accumulated fields into an immutable [`MapPatch`].
    pub fn build(self) -> MapPatch {
        MapPatch::new(
            self.assign,
            self.clear,
            self.patch_prior,
            self.add,
            self.patch,
            self.remove,
            self.put,
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
