//! Signature cache: one compiled body per structural signature.
//!
//! Lookups take the read lock; only a miss takes the write lock, and the
//! entry is re-checked under it so concurrent declarations of the same
//! shape compile once.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use klass_ir::{ConfigError, MethodKind, ReprStyle};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::{CompiledBody, FieldBinding, GeneratedCallable, Signature, TemplateCompiler};

/// Memoizes compiled bodies by signature.
///
/// Implementations must be safe to share between threads, and must hand
/// out the same `Arc` for equal signatures for as long as they live.
pub trait SignatureCache: Send + Sync {
    /// The body for `signature`, compiling it on first request.
    fn get_or_compile(&self, signature: Signature) -> Result<Arc<CompiledBody>, ConfigError>;

    /// Number of distinct signatures compiled so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total compilations performed.
    fn compilations(&self) -> usize;

    /// Requests answered without compiling.
    fn hits(&self) -> usize;

    /// Derive the signature `kind` needs for `binding`, fetch its body, and
    /// bind the two into a callable.
    fn resolve(
        &self,
        kind: MethodKind,
        style: ReprStyle,
        binding: &Arc<FieldBinding>,
    ) -> Result<GeneratedCallable, ConfigError> {
        let signature = Signature::derive(kind, style, binding);
        let body = self.get_or_compile(signature)?;
        Ok(GeneratedCallable::bind(body, Arc::clone(binding)))
    }
}

/// Thread-safe `SignatureCache` backed by a hash map.
///
/// Entries are never evicted.
#[derive(Default)]
pub struct ShapeCache {
    bodies: RwLock<FxHashMap<Signature, Arc<CompiledBody>>>,
    compilations: AtomicUsize,
    hits: AtomicUsize,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by every default `RecordFactory`.
    pub fn global() -> Arc<ShapeCache> {
        static GLOBAL: OnceLock<Arc<ShapeCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(ShapeCache::new())))
    }

    /// The cached body for `signature`, without compiling.
    pub fn peek(&self, signature: &Signature) -> Option<Arc<CompiledBody>> {
        self.bodies.read().get(signature).cloned()
    }
}

impl SignatureCache for ShapeCache {
    fn get_or_compile(&self, signature: Signature) -> Result<Arc<CompiledBody>, ConfigError> {
        if let Some(body) = self.bodies.read().get(&signature) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(?signature, "shape cache hit");
            return Ok(Arc::clone(body));
        }

        let mut bodies = self.bodies.write();
        // Another thread may have compiled it between the two locks.
        if let Some(body) = bodies.get(&signature) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(body));
        }

        let body = Arc::new(TemplateCompiler::compile(signature)?);
        self.compilations.fetch_add(1, Ordering::Relaxed);
        debug!(?signature, cached = bodies.len() + 1, "compiled method body");
        bodies.insert(signature, Arc::clone(&body));
        Ok(body)
    }

    fn len(&self) -> usize {
        self.bodies.read().len()
    }

    fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for ShapeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeCache")
            .field("signatures", &self.len())
            .field("compilations", &self.compilations())
            .field("hits", &self.hits())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_signatures_share_one_body() {
        let cache = ShapeCache::new();
        let sig = Signature::Initializer {
            arity: 2,
            defaults: 0,
        };

        let first = cache.get_or_compile(sig).unwrap();
        let second = cache.get_or_compile(sig).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.compilations(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn initializer_keys_distinguish_arity_and_defaults() {
        let cache = ShapeCache::new();
        for (arity, defaults) in [(2, 0), (3, 0), (3, 1)] {
            cache
                .get_or_compile(Signature::Initializer { arity, defaults })
                .unwrap();
        }
        assert_eq!(cache.compilations(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn failed_compilation_leaves_no_entry() {
        let cache = ShapeCache::new();
        let bad = Signature::Initializer {
            arity: 1,
            defaults: 3,
        };

        assert!(cache.get_or_compile(bad).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.compilations(), 0);
        assert!(cache.peek(&bad).is_none());
    }

    #[test]
    fn repr_styles_are_separate_entries() {
        let cache = ShapeCache::new();
        let keyword = cache
            .get_or_compile(Signature::Representation(ReprStyle::Keyword))
            .unwrap();
        let positional = cache
            .get_or_compile(Signature::Representation(ReprStyle::Positional))
            .unwrap();
        assert!(!Arc::ptr_eq(&keyword, &positional));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn global_cache_is_a_single_instance() {
        assert!(Arc::ptr_eq(&ShapeCache::global(), &ShapeCache::global()));
    }
}
