use super::*;
use pretty_assertions::assert_eq;

fn validate(decl: &RecordDecl) -> Result<FieldList, ConfigError> {
    let interner = StringInterner::new();
    FieldList::from_descriptors(&decl.name, &decl.fields, &interner)
}

#[test]
fn required_then_defaulted_fields_validate() {
    let decl = RecordDecl::new("Point")
        .field("x")
        .field("y")
        .field_with_default("z", Value::int(0));

    let fields = validate(&decl).unwrap();
    assert_eq!(fields.arity(), 3);
    assert_eq!(fields.required(), 2);
    assert_eq!(fields.default_count(), 1);

    let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
    assert_eq!(labels, vec!["x", "y", "z"]);

    let defaults: Vec<&Value> = fields.defaults().collect();
    assert_eq!(defaults, vec![&Value::int(0)]);
}

#[test]
fn required_field_after_default_is_rejected() {
    let decl = RecordDecl::new("Bad")
        .field("a")
        .field_with_default("b", Value::int(1))
        .field("c");

    assert_eq!(
        validate(&decl).unwrap_err(),
        ConfigError::NonContiguousDefaults {
            type_name: "Bad".to_string(),
            field: "c".to_string(),
        }
    );
}

#[test]
fn duplicate_field_is_rejected() {
    let decl = RecordDecl::new("Twice").field("a").field("a");

    assert_eq!(
        validate(&decl).unwrap_err(),
        ConfigError::DuplicateField {
            type_name: "Twice".to_string(),
            field: "a".to_string(),
        }
    );
}

#[test]
fn empty_field_list_is_legal() {
    let fields = validate(&RecordDecl::new("Unit")).unwrap();
    assert!(fields.is_empty());
    assert_eq!(fields.required(), 0);
    assert_eq!(fields.default_count(), 0);
}

#[test]
fn all_defaulted_fields() {
    let decl = RecordDecl::new("Config")
        .descriptor(FieldDescriptor::with_default("debug", Value::Bool(false)))
        .descriptor(FieldDescriptor::with_default("level", Value::int(3)));

    let fields = validate(&decl).unwrap();
    assert_eq!(fields.required(), 0);
    assert_eq!(fields.default_count(), 2);
}

#[test]
fn builder_sets_methods_and_style() {
    let decl = RecordDecl::new("P")
        .methods(MethodSet::EQ)
        .repr_style(ReprStyle::Positional);
    assert_eq!(decl.methods, MethodSet::EQ);
    assert_eq!(decl.repr_style, ReprStyle::Positional);
}
