//! `Name`: an interned field, type or method name.

use std::fmt;

/// Handle to a string in a `StringInterner`.
///
/// The top `SHARD_BITS` bits select the interner shard, the rest index into
/// it. Two names are equal exactly when they were interned from the same text
/// in the same interner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    const SHARD_BITS: u32 = 4;
    const LOCAL_BITS: u32 = u32::BITS - Self::SHARD_BITS;

    /// The empty string, interned up front in shard 0.
    pub const EMPTY: Name = Name(0);

    /// Largest index a shard can hand out.
    pub const MAX_LOCAL: u32 = (1 << Self::LOCAL_BITS) - 1;

    pub const NUM_SHARDS: usize = 1 << Self::SHARD_BITS;

    #[inline]
    pub(crate) const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << Self::LOCAL_BITS) | local)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> Self::LOCAL_BITS) as usize
    }

    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_and_local_survive_packing() {
        let name = Name::new(15, Name::MAX_LOCAL);
        assert_eq!(name.shard(), 15);
        assert_eq!(name.local() as u32, Name::MAX_LOCAL);
        assert_eq!(format!("{name:?}"), format!("Name(15:{})", Name::MAX_LOCAL));
    }

    #[test]
    fn default_is_the_empty_name() {
        assert_eq!(Name::default(), Name::EMPTY);
        assert_eq!(Name::EMPTY.shard(), 0);
        assert_eq!(Name::EMPTY.local(), 0);
    }
}
