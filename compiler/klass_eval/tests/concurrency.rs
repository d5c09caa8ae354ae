//! Concurrent declaration against one shared cache.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::sync::Arc;

use klass_eval::{MethodKind, RecordDecl, RecordFactory, ShapeCache, SignatureCache, Value};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

fn point(name: String) -> RecordDecl {
    RecordDecl::new(name)
        .field("x")
        .field("y")
        .field_with_default("z", Value::int(0))
}

#[test]
fn parallel_declarations_compile_each_signature_once() {
    let cache = Arc::new(ShapeCache::new());
    let factory = RecordFactory::with_cache(Arc::clone(&cache) as Arc<dyn SignatureCache>);

    let types: Vec<_> = (0..256)
        .into_par_iter()
        .map(|i| factory.declare(point(format!("P{i}"))).unwrap())
        .collect();

    assert_eq!(cache.compilations(), 3);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.hits(), 256 * 3 - 3);

    let first = types[0].methods().get(MethodKind::Initializer).unwrap();
    for ty in &types {
        let init = ty.methods().get(MethodKind::Initializer).unwrap();
        assert!(Arc::ptr_eq(first.body(), init.body()));
    }
}

#[test]
fn parallel_instances_render_their_own_type() {
    let factory = RecordFactory::with_cache(Arc::new(ShapeCache::new()));

    let rendered: Vec<String> = (0..64)
        .into_par_iter()
        .map(|i| {
            let ty = factory.declare(point(format!("P{i}"))).unwrap();
            ty.instantiate(&[Value::int(i), Value::int(i + 1)], &[])
                .unwrap()
                .to_string()
        })
        .collect();

    for (i, text) in rendered.iter().enumerate() {
        assert_eq!(text, &format!("P{i}(x={i}, y={}, z=0)", i + 1));
    }
}
