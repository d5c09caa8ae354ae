//! Declaration-time errors.
//!
//! Everything here is raised while a record type is being declared, before
//! any instance exists. A `ConfigError` is fatal to that declaration.

use crate::InternError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A field without a default follows a field with one.
    #[error("{type_name}: non-default field `{field}` follows a defaulted field")]
    NonContiguousDefaults { type_name: String, field: String },

    /// The same field name was declared twice.
    #[error("{type_name}: duplicate field `{field}`")]
    DuplicateField { type_name: String, field: String },

    /// A method kind name that no synthesis rule exists for.
    #[error("unknown method kind `{name}`")]
    UnknownMethodKind { name: String },

    /// An initializer signature with more defaults than fields.
    #[error("invalid initializer signature: {defaults} defaults for {arity} fields")]
    InvalidSignature { arity: usize, defaults: usize },

    #[error(transparent)]
    Intern(#[from] InternError),
}
