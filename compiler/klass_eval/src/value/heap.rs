//! Shared immutable storage for field values.

use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted, immutable allocation behind a `Value`.
///
/// Only this crate can allocate one, so strings, sequences and record field
/// slots always enter through `Value`'s constructors or a generated
/// initializer. Equality and hashing of the contents are left to `Value`;
/// `Heap` itself only knows about identity.
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Same allocation, not merely equal contents.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Feed the allocation address to `state`.
    pub(crate) fn hash_identity<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{BuildHasher, BuildHasherDefault};

    use rustc_hash::FxHasher;

    #[test]
    fn clones_share_one_allocation() {
        let a = Heap::new(String::from("abc"));
        let b = a.clone();
        let c = Heap::new(String::from("abc"));

        assert!(Heap::ptr_eq(&a, &b));
        assert!(!Heap::ptr_eq(&a, &c));
        assert_eq!(&*c, "abc");
    }

    #[test]
    fn identity_hash_follows_allocation() {
        let build = BuildHasherDefault::<FxHasher>::default();
        let identity = |h: &Heap<String>| {
            let mut state = build.build_hasher();
            h.hash_identity(&mut state);
            std::hash::Hasher::finish(&state)
        };

        let a = Heap::new(String::from("abc"));
        assert_eq!(identity(&a), identity(&a.clone()));
    }
}
