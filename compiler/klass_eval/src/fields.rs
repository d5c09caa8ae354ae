//! Field declarations.
//!
//! `RecordDecl` is how a type author lists a record's fields; there is no
//! reflection step. `FieldList::from_descriptors` turns the declared
//! descriptors into interned, validated fields, and is where the two
//! declaration invariants are enforced:
//! - field names are unique within the type
//! - defaulted fields form a contiguous suffix

use klass_ir::{ConfigError, MethodSet, Name, ReprStyle, StringInterner};
use rustc_hash::FxHashSet;

use crate::value::Value;

/// One declared field: a name and an optional default value.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub default: Option<Value>,
}

impl FieldDescriptor {
    /// A field that must be supplied to the initializer.
    pub fn required(name: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            default: None,
        }
    }

    /// A field that falls back to `default` when not supplied.
    pub fn with_default(name: impl Into<String>, default: Value) -> Self {
        FieldDescriptor {
            name: name.into(),
            default: Some(default),
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A validated field with its interned name.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: Name,
    /// Interned text of `name`, kept for rendering.
    pub label: &'static str,
    pub default: Option<Value>,
}

/// The ordered, validated fields of one record type.
#[derive(Clone, Debug, Default)]
pub struct FieldList {
    fields: Vec<Field>,
    /// Number of leading fields without a default.
    required: usize,
}

impl FieldList {
    /// Intern and validate declared fields.
    ///
    /// Fails on a duplicate name or on a field without a default that follows
    /// a defaulted one.
    pub fn from_descriptors(
        type_name: &str,
        descriptors: &[FieldDescriptor],
        interner: &StringInterner,
    ) -> Result<FieldList, ConfigError> {
        let mut seen = FxHashSet::default();
        let mut fields = Vec::with_capacity(descriptors.len());
        let mut required = 0;

        for descriptor in descriptors {
            let name = interner.try_intern(&descriptor.name)?;
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateField {
                    type_name: type_name.to_string(),
                    field: descriptor.name.clone(),
                });
            }

            // `required < fields.len()` once any earlier field had a default.
            if !descriptor.has_default() {
                if required < fields.len() {
                    return Err(ConfigError::NonContiguousDefaults {
                        type_name: type_name.to_string(),
                        field: descriptor.name.clone(),
                    });
                }
                required += 1;
            }

            fields.push(Field {
                name,
                label: interner.lookup_static(name),
                default: descriptor.default.clone(),
            });
        }

        Ok(FieldList { fields, required })
    }

    /// Number of fields.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields without a default.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Number of defaulted fields; they are always the trailing ones.
    pub fn default_count(&self) -> usize {
        self.fields.len().saturating_sub(self.required)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Default values of the trailing defaulted fields, in order.
    pub fn defaults(&self) -> impl Iterator<Item = &Value> + '_ {
        self.fields.iter().filter_map(|f| f.default.as_ref())
    }
}

/// Declaration of a record type: its name, fields and generated methods.
#[derive(Clone, Debug)]
pub struct RecordDecl {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub methods: MethodSet,
    pub repr_style: ReprStyle,
}

impl RecordDecl {
    /// Start a declaration with no fields and the default method set.
    pub fn new(name: impl Into<String>) -> Self {
        RecordDecl {
            name: name.into(),
            fields: Vec::new(),
            methods: MethodSet::default(),
            repr_style: ReprStyle::default(),
        }
    }

    /// Append a required field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::required(name));
        self
    }

    /// Append a field with a default value.
    #[must_use]
    pub fn field_with_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.fields.push(FieldDescriptor::with_default(name, default));
        self
    }

    #[must_use]
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Replace the set of generated methods.
    #[must_use]
    pub fn methods(mut self, methods: MethodSet) -> Self {
        self.methods = methods;
        self
    }

    #[must_use]
    pub fn repr_style(mut self, style: ReprStyle) -> Self {
        self.repr_style = style;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
