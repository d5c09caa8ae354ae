//! Structural signatures: the cache key for compiled bodies.

use klass_ir::{MethodKind, ReprStyle};

use super::FieldBinding;

/// The part of a type's shape that a compiled body depends on.
///
/// Only the initializer unrolls per position, so only it is keyed by arity.
/// Defaults are always a contiguous suffix, which makes their count a
/// complete description of the default mask. The other kinds iterate the
/// bound fields at call time and need one body each, whatever the arity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signature {
    Initializer { arity: usize, defaults: usize },
    Representation(ReprStyle),
    EqualityTest,
    Iteration,
    Hashing,
}

impl Signature {
    /// Derive the signature `kind` needs for a type bound as `binding`.
    pub fn derive(kind: MethodKind, style: ReprStyle, binding: &FieldBinding) -> Signature {
        match kind {
            MethodKind::Initializer => Signature::Initializer {
                arity: binding.arity(),
                defaults: binding.default_count(),
            },
            MethodKind::Representation => Signature::Representation(style),
            MethodKind::EqualityTest => Signature::EqualityTest,
            MethodKind::Iteration => Signature::Iteration,
            MethodKind::Hashing => Signature::Hashing,
        }
    }

    /// The method kind bodies of this signature implement.
    pub fn kind(self) -> MethodKind {
        match self {
            Signature::Initializer { .. } => MethodKind::Initializer,
            Signature::Representation(_) => MethodKind::Representation,
            Signature::EqualityTest => MethodKind::EqualityTest,
            Signature::Iteration => MethodKind::Iteration,
            Signature::Hashing => MethodKind::Hashing,
        }
    }
}
