//! `klass demo`: a tour of the generated methods.

use std::error::Error;

use klass_eval::{
    MethodKind, MethodSet, RecordDecl, RecordFactory, ReprStyle, Value,
};

pub fn run_demo() -> Result<(), Box<dyn Error>> {
    let factory = RecordFactory::new();

    let point = factory.declare(
        RecordDecl::new("Point")
            .field("x")
            .field("y")
            .field_with_default("z", Value::int(0)),
    )?;
    let color = factory.declare(
        RecordDecl::new("Color")
            .field("r")
            .field("g")
            .field_with_default("b", Value::int(0)),
    )?;

    let p = point.instantiate(&[Value::int(2), Value::int(3)], &[])?;
    let q = point.instantiate(&[Value::int(2)], &[(factory.name("y"), Value::int(3))])?;
    let c = color.instantiate(&[Value::int(2), Value::int(3)], &[])?;

    println!("{p}");
    println!("{c}");
    println!("{p} == {q}: {}", p == q);
    println!("{p} == {c}: {}", p == c);

    let shared = point
        .methods()
        .get(MethodKind::Initializer)
        .zip(color.methods().get(MethodKind::Initializer))
        .is_some_and(|(a, b)| std::sync::Arc::ptr_eq(a.body(), b.body()));
    println!("Point and Color share an initializer body: {shared}");

    if let Err(err) = point.instantiate(&[Value::int(1)], &[]) {
        println!("Point(1): {err}");
    }

    let pair = factory.declare(
        RecordDecl::new("Pair")
            .field("left")
            .field("right")
            .methods(MethodSet::all())
            .repr_style(ReprStyle::Positional),
    )?;
    let value = pair.instantiate(&[Value::string("a"), Value::int(1)], &[])?;
    if let Some(record) = value.as_record() {
        let items: Vec<String> = record.iter_fields()?.iter().map(ToString::to_string).collect();
        println!("{value} iterates as [{}]", items.join(", "));

        let swapped = record.with_field(factory.name("right"), Value::int(2))?;
        println!("with right=2: {swapped}");
    }

    let cache = factory.cache();
    println!(
        "{} signatures compiled, {} cache hits",
        cache.compilations(),
        cache.hits()
    );
    Ok(())
}
