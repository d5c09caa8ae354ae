//! Sharded string interner for field and type names.
//!
//! Record declarations intern every field name once; generated initializers
//! then match keyword arguments by comparing `Name`s instead of strings.
//! Interned text is leaked, which is what lets `lookup_static` hand out
//! `&'static str` labels for rendering. Factories share
//! `SharedInterner::global`, so the leak grows with the number of distinct
//! names in the process rather than with the number of factories.

use std::hash::{BuildHasher, BuildHasherDefault};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::{MethodKind, Name};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("interner shard {shard} is full ({len} names)")]
    ShardOverflow { shard: usize, len: usize },
}

#[derive(Default)]
struct Shard {
    index: FxHashMap<&'static str, u32>,
    texts: Vec<&'static str>,
}

impl Shard {
    fn find(&self, text: &str) -> Option<u32> {
        self.index.get(text).copied()
    }

    fn push(&mut self, shard: usize, text: &str) -> Result<u32, InternError> {
        let len = self.texts.len();
        let local = u32::try_from(len)
            .ok()
            .filter(|local| *local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow { shard, len })?;
        let text: &'static str = Box::leak(text.into());
        self.texts.push(text);
        self.index.insert(text, local);
        Ok(local)
    }
}

/// Thread-safe interner. Each shard has its own lock, so declarations on
/// different threads contend only when their names land in the same shard.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    len: AtomicUsize,
}

impl StringInterner {
    /// An interner holding the empty string and every generated method name.
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            len: AtomicUsize::new(0),
        };
        // The empty string must land at shard 0, index 0.
        let seeded = interner.try_intern_in(0, "").and_then(|_| {
            MethodKind::ALL
                .iter()
                .try_for_each(|kind| interner.try_intern(kind.method_name()).map(drop))
        });
        debug_assert!(seeded.is_ok(), "a fresh interner has room for its seed names");
        interner
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "reduced modulo NUM_SHARDS first"
    )]
    fn shard_of(text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let hash = BuildHasherDefault::<FxHasher>::default().hash_one(text);
        (hash % Name::NUM_SHARDS as u64) as usize
    }

    fn try_intern_in(&self, shard: usize, text: &str) -> Result<Name, InternError> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard is below NUM_SHARDS"
        )]
        let tag = shard as u32;
        let lock = &self.shards[shard];

        if let Some(local) = lock.read().find(text) {
            return Ok(Name::new(tag, local));
        }

        let mut guard = lock.write();
        // Raced with another writer between the two locks.
        if let Some(local) = guard.find(text) {
            return Ok(Name::new(tag, local));
        }
        let local = guard.push(shard, text)?;
        self.len.fetch_add(1, Ordering::Relaxed);
        Ok(Name::new(tag, local))
    }

    /// Intern `text`, failing only when its shard is full.
    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        self.try_intern_in(Self::shard_of(text), text)
    }

    /// Intern `text`.
    ///
    /// # Panics
    /// If the shard is full; `try_intern` reports that as an error instead.
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Text of `name`; `""` for a name from another interner.
    pub fn lookup_static(&self, name: Name) -> &'static str {
        self.shards[name.shard()]
            .read()
            .texts
            .get(name.local())
            .copied()
            .unwrap_or_default()
    }

    /// Number of distinct strings interned, the empty string included.
    pub fn count(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to one `StringInterner`.
///
/// A `Name` is only meaningful to the table that produced it, so everything
/// that compares names (keyword arguments against field names, most notably)
/// must go through the same handle. `RecordFactory` uses `global` unless told
/// otherwise.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// A private table, independent of `global`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<SharedInterner> = OnceLock::new();
        GLOBAL.get_or_init(SharedInterner::new).clone()
    }

    /// Whether both handles point at one table.
    pub fn same_table(&self, other: &SharedInterner) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}
