//! Map patch apply logic.
//!
//! [`apply`] is a pure function from a base map and a descriptor to a new
//! map; the base is never mutated and there is no error path — every
//! combination of present and absent fields has a defined result.

use crate::types::{Entries, MapPatch, ValuePatch};

/// Applies `patch` to `base`, producing the patched map.
///
/// Operations run in a fixed order:
///
/// 1. `assign` — if present, its value is returned directly and every other
///    field is ignored.
/// 2. `clear` — empties the working map, so "reset, then rebuild" is
///    expressible.
/// 3. `patchPrior` — refines values that survived `clear`; keys absent from
///    the working map are silently skipped, so this step only ever touches
///    entries that predate the patch.
/// 4. `remove` — deletes keys; absent keys are a no-op.
/// 5. `add` — inserts only where the key is currently absent.
/// 6. `put` — inserts or overwrites unconditionally.
/// 7. `patch` — refines values on the final key set, including entries that
///    `add`/`put` just inserted.
pub fn apply(base: &Entries, patch: &MapPatch) -> Entries {
    if let Some(assign) = patch.assign() {
        return assign.clone();
    }

    let mut working = base.clone();

    if patch.clear() == Some(true) {
        working = Entries::new();
    }

    if let Some(prior) = patch.patch_prior() {
        for (key, vp) in prior {
            if let Some(slot) = working.get_mut(key) {
                *slot = vp.apply(*slot);
            }
        }
    }

    if let Some(remove) = patch.remove() {
        for key in remove {
            working.shift_remove(key);
        }
    }

    if let Some(add) = patch.add() {
        for (key, value) in add {
            if !working.contains_key(key) {
                working.insert(key.clone(), *value);
            }
        }
    }

    if let Some(put) = patch.put() {
        for (key, value) in put {
            working.insert(key.clone(), *value);
        }
    }

    if let Some(after) = patch.patch() {
        for (key, vp) in after {
            if let Some(slot) = working.get_mut(key) {
                *slot = vp.apply(*slot);
            }
        }
    }

    working
}

// ── Tests ─────────────────────────────────────────────────────────────────
