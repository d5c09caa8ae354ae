use super::*;
use crate::codegen::Comparison;
use crate::errors::EvalErrorKind;
use crate::value::Value;
use klass_ir::{MethodKind, MethodSet, ReprStyle};
use pretty_assertions::assert_eq;

fn fresh_factory() -> RecordFactory {
    RecordFactory::with_cache(Arc::new(ShapeCache::new()))
}

fn point(factory: &RecordFactory, name: &str) -> Arc<RecordType> {
    factory
        .declare(
            RecordDecl::new(name)
                .field("x")
                .field("y")
                .field_with_default("z", Value::int(0)),
        )
        .unwrap()
}

fn body_of(ty: &RecordType, kind: MethodKind) -> Arc<crate::codegen::CompiledBody> {
    Arc::clone(ty.methods().get(kind).unwrap().body())
}

#[test]
fn same_shape_types_share_bodies() {
    let factory = fresh_factory();
    let a = point(&factory, "A");
    let b = point(&factory, "B");

    for kind in [
        MethodKind::Initializer,
        MethodKind::Representation,
        MethodKind::EqualityTest,
    ] {
        assert!(Arc::ptr_eq(&body_of(&a, kind), &body_of(&b, kind)));
    }
    assert_eq!(factory.cache().compilations(), 3);
}

#[test]
fn callables_are_never_shared() {
    let factory = fresh_factory();
    let a = point(&factory, "A");
    let b = point(&factory, "B");

    let init_a = a.methods().get(MethodKind::Initializer).unwrap();
    let init_b = b.methods().get(MethodKind::Initializer).unwrap();
    assert!(!Arc::ptr_eq(init_a.binding(), init_b.binding()));
    assert_ne!(a.id(), b.id());
}

#[test]
fn initializer_is_arity_sensitive_but_repr_and_eq_are_not() {
    let factory = fresh_factory();
    let pair = factory
        .declare(RecordDecl::new("Pair").field("a").field("b"))
        .unwrap();
    let triple = factory
        .declare(RecordDecl::new("Triple").field("a").field("b").field("c"))
        .unwrap();

    assert!(!Arc::ptr_eq(
        &body_of(&pair, MethodKind::Initializer),
        &body_of(&triple, MethodKind::Initializer)
    ));
    assert!(Arc::ptr_eq(
        &body_of(&pair, MethodKind::Representation),
        &body_of(&triple, MethodKind::Representation)
    ));
    assert!(Arc::ptr_eq(
        &body_of(&pair, MethodKind::EqualityTest),
        &body_of(&triple, MethodKind::EqualityTest)
    ));
}

#[test]
fn default_count_is_part_of_the_initializer_key() {
    let factory = fresh_factory();
    let plain = factory
        .declare(RecordDecl::new("Plain").field("a").field("b"))
        .unwrap();
    let defaulted = factory
        .declare(
            RecordDecl::new("Defaulted")
                .field("a")
                .field_with_default("b", Value::int(1)),
        )
        .unwrap();

    assert!(!Arc::ptr_eq(
        &body_of(&plain, MethodKind::Initializer),
        &body_of(&defaulted, MethodKind::Initializer)
    ));
}

#[test]
fn construct_and_render_with_default() {
    let factory = fresh_factory();
    let ty = point(&factory, "T");

    let value = ty.instantiate(&[Value::int(2), Value::int(3)], &[]).unwrap();
    let record = value.as_record().unwrap();

    assert_eq!(record.get_field(factory.name("x")), Some(&Value::int(2)));
    assert_eq!(record.get_field(factory.name("y")), Some(&Value::int(3)));
    assert_eq!(record.get_field(factory.name("z")), Some(&Value::int(0)));
    assert_eq!(value.to_string(), "T(x=2, y=3, z=0)");
}

#[test]
fn keyword_arguments_fill_fields_by_name() {
    let factory = fresh_factory();
    let ty = point(&factory, "T");

    let value = ty
        .instantiate(
            &[Value::int(1)],
            &[
                (factory.name("z"), Value::int(9)),
                (factory.name("y"), Value::int(5)),
            ],
        )
        .unwrap();
    assert_eq!(value.to_string(), "T(x=1, y=5, z=9)");
}

#[test]
fn equality_follows_fields_and_type() {
    let factory = fresh_factory();
    let t = point(&factory, "T");
    let u = point(&factory, "U");

    let t1 = t.instantiate(&[Value::int(1), Value::int(2)], &[]).unwrap();
    let t2 = t.instantiate(&[Value::int(1), Value::int(2)], &[]).unwrap();
    let t3 = t.instantiate(&[Value::int(1), Value::int(3)], &[]).unwrap();
    let u1 = u.instantiate(&[Value::int(1), Value::int(2)], &[]).unwrap();

    assert_eq!(t1, t2);
    assert_ne!(t1, t3);
    assert_ne!(t1, u1);

    let record = t1.as_record().unwrap();
    assert_eq!(record.compare(&u1).unwrap(), Comparison::Incomparable);
    assert_eq!(record.compare(&Value::int(1)).unwrap(), Comparison::Incomparable);
    assert_eq!(record.compare(&t2).unwrap(), Comparison::Equal);
}

#[test]
fn non_contiguous_defaults_fail_declaration() {
    let factory = fresh_factory();
    let err = factory
        .declare(
            RecordDecl::new("Bad")
                .field_with_default("a", Value::int(0))
                .field("b"),
        )
        .unwrap_err();

    assert_eq!(
        err,
        ConfigError::NonContiguousDefaults {
            type_name: "Bad".to_string(),
            field: "b".to_string(),
        }
    );
    assert_eq!(factory.cache().compilations(), 0);
}

#[test]
fn empty_type_constructs_and_renders() {
    let factory = fresh_factory();
    let empty = factory.declare(RecordDecl::new("T")).unwrap();

    let a = empty.instantiate(&[], &[]).unwrap();
    let b = empty.instantiate(&[], &[]).unwrap();
    assert_eq!(a.to_string(), "T()");
    assert_eq!(a, b);
}

#[test]
fn suppressed_methods_are_not_attached() {
    let factory = fresh_factory();
    let ty = factory
        .declare(
            RecordDecl::new("Opaque")
                .field("a")
                .methods(MethodSet::INIT),
        )
        .unwrap();

    assert_eq!(ty.methods().len(), 1);
    assert!(!ty.methods().has_method(factory.name("repr")));
    assert_eq!(factory.cache().compilations(), 1);

    let a = ty.instantiate(&[Value::int(1)], &[]).unwrap();
    let b = ty.instantiate(&[Value::int(1)], &[]).unwrap();
    assert_eq!(a.to_string(), "<Opaque object>");
    // No generated equality: identity decides.
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn suppressed_initializer_reports_missing_method() {
    let factory = fresh_factory();
    let ty = factory
        .declare(
            RecordDecl::new("NoInit")
                .field("a")
                .methods(MethodSet::default().without(MethodKind::Initializer)),
        )
        .unwrap();

    let err = ty.instantiate(&[Value::int(1)], &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedMethod {
            method: "init".to_string(),
            type_name: "NoInit".to_string(),
        }
    );
}

#[test]
fn methods_are_registered_under_well_known_names() {
    let factory = fresh_factory();
    let ty = point(&factory, "T");

    for kind in [
        MethodKind::Initializer,
        MethodKind::Representation,
        MethodKind::EqualityTest,
    ] {
        let callable = ty.methods().lookup(factory.name(kind.method_name())).unwrap();
        assert_eq!(callable.kind(), kind);
    }
    assert!(ty.methods().get(MethodKind::Iteration).is_none());
    assert!(ty.methods().get(MethodKind::Hashing).is_none());
}

#[test]
fn positional_repr_style_is_a_separate_body() {
    let factory = fresh_factory();
    let keyword = point(&factory, "K");
    let positional = factory
        .declare(
            RecordDecl::new("P")
                .field("x")
                .field("y")
                .field_with_default("z", Value::int(0))
                .repr_style(ReprStyle::Positional),
        )
        .unwrap();

    assert!(!Arc::ptr_eq(
        &body_of(&keyword, MethodKind::Representation),
        &body_of(&positional, MethodKind::Representation)
    ));
    let value = positional
        .instantiate(&[Value::int(2), Value::int(3)], &[])
        .unwrap();
    assert_eq!(value.to_string(), "P(2, 3, 0)");
}

#[test]
fn default_factory_uses_the_global_cache() {
    let factory = RecordFactory::default();
    let global: Arc<dyn SignatureCache> = ShapeCache::global();
    assert!(std::ptr::addr_eq(
        Arc::as_ptr(factory.cache()),
        Arc::as_ptr(&global)
    ));
}

#[test]
fn factories_share_the_global_interner() {
    let a = fresh_factory();
    let b = RecordFactory::new();
    assert!(a.interner().same_table(b.interner()));
    assert!(a.interner().same_table(&SharedInterner::global()));

    let isolated = RecordFactory::with_interner(Arc::new(ShapeCache::new()), SharedInterner::new());
    assert!(!isolated.interner().same_table(a.interner()));
}

#[test]
fn keyword_names_from_another_default_factory_resolve() {
    let declaring = fresh_factory();
    let caller = RecordFactory::new();
    let ty = point(&declaring, "T");

    let value = ty
        .instantiate(&[Value::int(1)], &[(caller.name("y"), Value::int(4))])
        .unwrap();
    assert_eq!(value.to_string(), "T(x=1, y=4, z=0)");
}
