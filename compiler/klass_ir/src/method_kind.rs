//! Generated method kinds and the per-declaration selection of them.
//!
//! Each `MethodKind` has exactly one synthesis rule. Declarations choose which
//! kinds to generate through a `MethodSet`; there are no other knobs.

use crate::ConfigError;

/// A behavior that can be generated for a record type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MethodKind {
    /// Positional/keyword initializer that fills every field slot.
    Initializer,
    /// `TypeName(field=value, ...)` rendering.
    Representation,
    /// Field-tuple equality within one record type.
    EqualityTest,
    /// Yields field values in declaration order.
    Iteration,
    /// Hash of the field tuple, consistent with `EqualityTest`.
    Hashing,
}

impl MethodKind {
    /// Every kind, in attachment order.
    pub const ALL: [MethodKind; 5] = [
        MethodKind::Initializer,
        MethodKind::Representation,
        MethodKind::EqualityTest,
        MethodKind::Iteration,
        MethodKind::Hashing,
    ];

    /// Number of kinds; sizes per-type method tables.
    pub const COUNT: usize = Self::ALL.len();

    /// Parse a well-known method name into a `MethodKind`.
    pub fn from_name(s: &str) -> Option<MethodKind> {
        match s {
            "init" => Some(MethodKind::Initializer),
            "repr" => Some(MethodKind::Representation),
            "eq" => Some(MethodKind::EqualityTest),
            "iter" => Some(MethodKind::Iteration),
            "hash" => Some(MethodKind::Hashing),
            _ => None,
        }
    }

    /// The name the generated method is registered under.
    pub fn method_name(self) -> &'static str {
        match self {
            MethodKind::Initializer => "init",
            MethodKind::Representation => "repr",
            MethodKind::EqualityTest => "eq",
            MethodKind::Iteration => "iter",
            MethodKind::Hashing => "hash",
        }
    }

    /// Dense index in `0..COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The `MethodSet` flag selecting this kind.
    pub fn flag(self) -> MethodSet {
        match self {
            MethodKind::Initializer => MethodSet::INIT,
            MethodKind::Representation => MethodSet::REPR,
            MethodKind::EqualityTest => MethodSet::EQ,
            MethodKind::Iteration => MethodSet::ITER,
            MethodKind::Hashing => MethodSet::HASH,
        }
    }
}

/// How a generated representation lists field values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReprStyle {
    /// `Point(x=1, y=2)`
    #[default]
    Keyword,
    /// `Point(1, 2)`
    Positional,
}

bitflags::bitflags! {
    /// Which method kinds to generate for a declared record type.
    ///
    /// Defaults to initializer, representation and equality. Iteration and
    /// hashing are opt-in.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct MethodSet: u8 {
        const INIT = 1 << 0;
        const REPR = 1 << 1;
        const EQ = 1 << 2;
        const ITER = 1 << 3;
        const HASH = 1 << 4;
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        MethodSet::INIT | MethodSet::REPR | MethodSet::EQ
    }
}

impl MethodSet {
    /// Build a set from method names such as `["init", "eq"]`.
    ///
    /// An unrecognized name fails the whole set.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<MethodSet, ConfigError> {
        names.iter().try_fold(MethodSet::empty(), |set, name| {
            let name = name.as_ref();
            MethodKind::from_name(name)
                .map(|kind| set | kind.flag())
                .ok_or_else(|| ConfigError::UnknownMethodKind {
                    name: name.to_string(),
                })
        })
    }

    /// True when `kind` is selected.
    pub fn includes(self, kind: MethodKind) -> bool {
        self.contains(kind.flag())
    }

    /// Selected kinds in attachment order.
    pub fn kinds(self) -> impl Iterator<Item = MethodKind> {
        MethodKind::ALL
            .into_iter()
            .filter(move |kind| self.includes(*kind))
    }

    /// Remove a kind from the set.
    #[must_use]
    pub fn without(self, kind: MethodKind) -> MethodSet {
        self.difference(kind.flag())
    }
}
