//! Klass IR - shared vocabulary for record method generation.
//!
//! This crate contains the small, dependency-light types every other Klass
//! crate agrees on:
//! - `Name` for interned identifiers, with `StringInterner`/`SharedInterner`
//! - `MethodKind` and `ReprStyle`, the generated behaviors
//! - `MethodSet`, the per-declaration selection of kinds
//! - `ConfigError`, raised while a type is being declared
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: field and type names are `Name(u32)`, so keyword
//!   argument matching and field lookup compare integers.
//! - **Fail at Declaration**: everything that can be wrong about a record's
//!   shape is reported as a `ConfigError` before any instance exists.

mod errors;
mod interner;
mod method_kind;
mod name;

pub use errors::ConfigError;
pub use interner::{InternError, SharedInterner, StringInterner};
pub use method_kind::{MethodKind, MethodSet, ReprStyle};
pub use name::Name;
