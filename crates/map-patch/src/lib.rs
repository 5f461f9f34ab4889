//! Structured patches for keyed map values.
//!
//! A [`MapPatch`] describes a sequence of partial mutations over a
//! `string → i32` map — assign, clear, patch-prior, remove, add, put, and
//! patch-final — without transmitting the whole map. Descriptors are
//! immutable values: construct one, then apply, re-encode, or discard it.
//!
//! # Components
//!
//! - [`types`] — the descriptor model, the nested [`I32Patch`], and the
//!   [`ValuePatch`] seam shared by all patch families.
//! - [`apply`](apply::apply) — the pure, total apply engine with its fixed
//!   operation order.
//! - [`validate`](validate::validate) — opt-in strict checks and lints.
//! - [`codec`] — the forward-compatible framed binary encoding.
//!
//! # Example
//!
//! ```
//! use map_patch::{apply, decode, encode, Entries, MapPatchBuilder};
//!
//! let base: Entries = [("a".to_string(), 1), ("b".to_string(), 2)]
//!     .into_iter()
//!     .collect();
//!
//! let patch = MapPatchBuilder::new()
//!     .remove_key("b")
//!     .add_entry("b", 9)
//!     .add_entry("c", 3)
//!     .put_entry("a", 5)
//!     .build();
//!
//! let result = apply(&base, &patch);
//! assert_eq!(result.get("a"), Some(&5));
//! assert_eq!(result.get("b"), Some(&9));
//! assert_eq!(result.get("c"), Some(&3));
//!
//! let bytes = encode(&patch);
//! assert_eq!(decode(&bytes), Ok(patch));
//! ```
//!
//! Descriptors are plain values with no interior mutability, so they are
//! `Send + Sync` and `apply` may run concurrently over shared base maps.

pub mod apply;
pub mod builder;
pub mod codec;
pub mod types;
pub mod validate;

pub use apply::apply;
pub use builder::MapPatchBuilder;
pub use codec::{decode, encode, CodecError};
pub use types::{Entries, Field, I32Patch, Keys, MapPatch, ValuePatch, ValuePatches};
pub use validate::{lints, validate, Lint, ValidateError};
