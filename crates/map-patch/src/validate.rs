//! Map patch descriptor validator.
//!
//! The default behavior accepts every field combination, matching the
//! reference semantics where `validate` checks nothing. The hardened checks
//! are opt-in via the `strict` flag; [`lints`] reports contradictions that
//! the apply order already resolves deterministically and which are
//! therefore never errors.

use thiserror::Error;

use crate::types::{Field, MapPatch};

// ── Errors ────────────────────────────────────────────────────────────────

/// Semantic validation failure: the descriptor was well-formed on the wire
/// but its content is contradictory. Distinct from
/// [`CodecError`](crate::codec::CodecError).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// `assign` silently overrides every other operation, so a descriptor
    /// that sets both looks like it performs several operations but
    /// performs one.
    #[error("assign is set together with {others:?}; assign overrides all other operations")]
    AssignNotExclusive { others: Vec<Field> },
}

/// A non-fatal diagnostic about a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lint {
    /// A key is deleted by `remove` and reinserted by `add` or `put` in the
    /// same patch. The apply order makes the net effect well defined
    /// (remove runs first), but the caller may not have meant it.
    RemoveReinserted {
        key: String,
        reinserted_by: Field,
    },
}

// ── Public API ────────────────────────────────────────────────────────────

/// Validates a descriptor.
///
/// With `strict == false` this mirrors the reference behavior and always
/// succeeds — the type system already guarantees structural sanity. With
/// `strict == true`, a descriptor that sets `assign` together with any
/// other field is rejected, naming the overridden fields.
pub fn validate(patch: &MapPatch, strict: bool) -> Result<(), ValidateError> {
    if !strict {
        return Ok(());
    }
    if patch.assign().is_some() {
        let others: Vec<Field> = patch
            .present_fields()
            .into_iter()
            .filter(|f| *f != Field::Assign)
            .collect();
        if !others.is_empty() {
            return Err(ValidateError::AssignNotExclusive { others });
        }
    }
    Ok(())
}

/// Reports lint-level diagnostics for a descriptor.
///
/// Currently flags keys that `remove` deletes and `add`/`put` reinsert in
/// the same patch.
pub fn lints(patch: &MapPatch) -> Vec<Lint> {
    let mut out = Vec::new();
    let Some(remove) = patch.remove() else {
        return out;
    };
    for key in remove {
        if patch.add().is_some_and(|m| m.contains_key(key)) {
            out.push(Lint::RemoveReinserted {
                key: key.clone(),
                reinserted_by: Field::Add,
            });
        }
        if patch.put().is_some_and(|m| m.contains_key(key)) {
            out.push(Lint::RemoveReinserted {
                key: key.clone(),
                reinserted_by: Field::Put,
            });
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MapPatchBuilder;
    use crate::types::Entries;

    #[test]
    fn non_strict_accepts_everything() {
        let patch = MapPatchBuilder::new()
            .assign(Entries::new())
            .clear(true)
            .put_entry("a", 1)
            .build();
        assert_eq!(validate(&patch, false), Ok(()));
    }

    #[test]
    fn strict_accepts_identity() {
        assert_eq!(validate(&MapPatch::identity(), true), Ok(()));
    }

    #[test]
    fn strict_accepts_lone_assign() {
        let patch = MapPatchBuilder::new().assign(Entries::new()).build();
        assert_eq!(validate(&patch, true), Ok(()));
    }

    #[test]
    fn strict_rejects_assign_with_other_fields() {
        let patch = MapPatchBuilder::new()
            .assign(Entries::new())
            .clear(true)
            .put_entry("a", 1)
            .build();
        let err = validate(&patch, true).unwrap_err();
        assert_eq!(
            err,
            ValidateError::AssignNotExclusive {
                others: vec![Field::Clear, Field::Put],
            }
        );
    }

    #[test]
    fn strict_accepts_everything_but_assign() {
        let patch = MapPatchBuilder::new()
            .clear(true)
            .remove_key("a")
            .add_entry("b", 1)
            .put_entry("c", 2)
            .build();
        assert_eq!(validate(&patch, true), Ok(()));
    }

    #[test]
    fn no_lints_without_remove() {
        let patch = MapPatchBuilder::new().add_entry("a", 1).build();
        assert!(lints(&patch).is_empty());
    }

    #[test]
    fn lints_flag_remove_add_overlap() {
        let patch = MapPatchBuilder::new()
            .remove_key("k")
            .add_entry("k", 9)
            .build();
        assert_eq!(
            lints(&patch),
            vec![Lint::RemoveReinserted {
                key: "k".to_string(),
                reinserted_by: Field::Add,
            }]
        );
    }

    #[test]
    fn lints_flag_remove_put_overlap() {
        let patch = MapPatchBuilder::new()
            .remove_key("k")
            .put_entry("k", 9)
            .build();
        assert_eq!(
            lints(&patch),
            vec![Lint::RemoveReinserted {
                key: "k".to_string(),
                reinserted_by: Field::Put,
            }]
        );
    }

    #[test]
    fn disjoint_remove_and_add_are_clean() {
        let patch = MapPatchBuilder::new()
            .remove_key("a")
            .add_entry("b", 1)
            .put_entry("c", 2)
            .build();
        assert!(lints(&patch).is_empty());
    }
}
