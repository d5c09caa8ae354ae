//! Record factory: turns declarations into record types with generated methods.

use std::fmt;
use std::sync::Arc;

use klass_ir::{ConfigError, Name, SharedInterner};
use tracing::debug;

use crate::codegen::{FieldBinding, ShapeCache, SignatureCache};
use crate::fields::{FieldList, RecordDecl};
use crate::record::{MethodTable, RecordType, RecordTypeId};

/// Declares record types against a signature cache.
///
/// Factories are cheap to clone. Clones share both the interner and the
/// cache, so types declared through any of them reuse each other's bodies.
/// Unless built with `with_interner`, every factory interns into
/// `SharedInterner::global`, so a `Name` from one default factory is valid
/// keyword input for types declared by another.
#[derive(Clone)]
pub struct RecordFactory {
    interner: SharedInterner,
    cache: Arc<dyn SignatureCache>,
}

impl RecordFactory {
    /// A factory using the process-wide `ShapeCache`.
    pub fn new() -> Self {
        Self::with_cache(ShapeCache::global())
    }

    /// A factory using its own cache, e.g. to observe compilation counts.
    pub fn with_cache(cache: Arc<dyn SignatureCache>) -> Self {
        Self::with_interner(cache, SharedInterner::global())
    }

    /// A factory with its own cache and interner. Names passed to its types
    /// must come from `interner` (or from this factory's `name`).
    pub fn with_interner(cache: Arc<dyn SignatureCache>, interner: SharedInterner) -> Self {
        RecordFactory { interner, cache }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn cache(&self) -> &Arc<dyn SignatureCache> {
        &self.cache
    }

    /// Intern `text`, for field lookups and keyword arguments.
    ///
    /// # Panics
    /// If the interner shard for `text` is full.
    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Validate `decl` and build its type.
    ///
    /// Every selected method kind is resolved through the cache and bound to
    /// the new type's fields. Nothing is attached if any step fails.
    pub fn declare(&self, decl: RecordDecl) -> Result<Arc<RecordType>, ConfigError> {
        let type_name = self.interner.try_intern(&decl.name)?;
        let fields = FieldList::from_descriptors(&decl.name, &decl.fields, &self.interner)?;

        let binding = Arc::new(FieldBinding::new(
            RecordTypeId::fresh(),
            type_name,
            &fields,
            self.interner.clone(),
        ));

        let mut methods = MethodTable::new();
        for kind in decl.methods.kinds() {
            let callable = self.cache.resolve(kind, decl.repr_style, &binding)?;
            let method_name = self.interner.try_intern(kind.method_name())?;
            methods.attach(method_name, callable);
        }

        debug!(
            record = %decl.name,
            arity = fields.arity(),
            defaults = fields.default_count(),
            methods = ?decl.methods,
            "declared record type"
        );

        Ok(Arc::new(RecordType::new(binding, methods)))
    }
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFactory")
            .field("signatures", &self.cache.len())
            .field("compilations", &self.cache.compilations())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
