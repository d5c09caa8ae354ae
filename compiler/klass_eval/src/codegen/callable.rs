//! Generated callables: a shared compiled body bound to one type's fields.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use klass_ir::{MethodKind, Name, ReprStyle, SharedInterner};
use rustc_hash::FxHasher;

use super::{CompiledBody, InitPlan};
use crate::errors::{
    duplicate_argument, method_kind_mismatch, missing_argument, too_many_arguments,
    unexpected_keyword, EvalError,
};
use crate::fields::FieldList;
use crate::record::{RecordTypeId, RecordValue};
use crate::value::Value;

/// Per-type data a compiled body is bound to.
///
/// Built once per declared type and shared by that type's callables. Holds
/// everything the name-agnostic bodies leave out: which type they belong
/// to, what the fields are called, and the default values.
pub struct FieldBinding {
    type_id: RecordTypeId,
    type_name: Name,
    type_label: &'static str,
    names: Box<[Name]>,
    labels: Box<[&'static str]>,
    /// Defaults of the trailing defaulted fields.
    defaults: Box<[Value]>,
    interner: SharedInterner,
}

impl FieldBinding {
    pub fn new(
        type_id: RecordTypeId,
        type_name: Name,
        fields: &FieldList,
        interner: SharedInterner,
    ) -> Self {
        FieldBinding {
            type_id,
            type_name,
            type_label: interner.lookup_static(type_name),
            names: fields.names().collect(),
            labels: fields.iter().map(|f| f.label).collect(),
            defaults: fields.defaults().cloned().collect(),
            interner,
        }
    }

    pub fn type_id(&self) -> RecordTypeId {
        self.type_id
    }

    pub fn type_name(&self) -> Name {
        self.type_name
    }

    pub fn type_label(&self) -> &'static str {
        self.type_label
    }

    pub fn arity(&self) -> usize {
        self.names.len()
    }

    pub fn default_count(&self) -> usize {
        self.defaults.len()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn defaults(&self) -> &[Value] {
        &self.defaults
    }

    /// Positional index of the field called `name`.
    pub fn position(&self, name: Name) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    /// Text of any interned name, for diagnostics.
    pub(crate) fn text(&self, name: Name) -> &'static str {
        self.interner.lookup_static(name)
    }

    /// Like `text`, but a name unknown to this type's interner still
    /// produces something readable.
    fn describe(&self, name: Name) -> String {
        match self.text(name) {
            "" if name != Name::EMPTY => format!("{name:?}"),
            text => text.to_string(),
        }
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("type_id", &self.type_id)
            .field("type", &self.type_label)
            .field("fields", &self.labels)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Outcome of a generated equality test.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    /// The operand is not an instance of the same record type. The caller
    /// should defer to the other operand's equality, then to identity.
    Incomparable,
}

impl Comparison {
    fn from_bool(equal: bool) -> Self {
        if equal {
            Comparison::Equal
        } else {
            Comparison::NotEqual
        }
    }
}

/// A method generated for one record type.
///
/// Cloning is cheap: both the body and the binding are reference counted.
/// Two types of the same shape hold the same `body` but different
/// `binding`s.
#[derive(Clone)]
pub struct GeneratedCallable {
    body: Arc<CompiledBody>,
    binding: Arc<FieldBinding>,
}

impl GeneratedCallable {
    /// Pair a compiled body with a type's field binding.
    pub fn bind(body: Arc<CompiledBody>, binding: Arc<FieldBinding>) -> Self {
        GeneratedCallable { body, binding }
    }

    pub fn kind(&self) -> MethodKind {
        self.body.kind()
    }

    /// The shared compiled body.
    pub fn body(&self) -> &Arc<CompiledBody> {
        &self.body
    }

    /// The per-type data this callable closes over.
    pub fn binding(&self) -> &Arc<FieldBinding> {
        &self.binding
    }

    /// Run the initializer, producing field slots in declaration order.
    ///
    /// Positional arguments fill slots from the left; keyword arguments are
    /// matched against the bound field names; trailing slots still empty
    /// take the bound defaults.
    ///
    /// Keyword names are compared as interned handles, so they must come from
    /// the interner the type was declared with (`RecordFactory::name`).
    pub fn initialize(
        &self,
        args: &[Value],
        kwargs: &[(Name, Value)],
    ) -> Result<Vec<Value>, EvalError> {
        let CompiledBody::Initializer(plan) = &*self.body else {
            return Err(method_kind_mismatch(MethodKind::Initializer, self.kind()));
        };
        self.run_initializer(plan, args, kwargs)
    }

    fn run_initializer(
        &self,
        plan: &InitPlan,
        args: &[Value],
        kwargs: &[(Name, Value)],
    ) -> Result<Vec<Value>, EvalError> {
        let binding = &*self.binding;
        if args.len() > plan.arity() {
            return Err(too_many_arguments(
                binding.type_label,
                plan.arity(),
                args.len(),
            ));
        }

        let mut supplied: Vec<Option<Value>> = vec![None; plan.arity()];
        for (slot, arg) in supplied.iter_mut().zip(args) {
            *slot = Some(arg.clone());
        }

        for (keyword, value) in kwargs {
            let Some(index) = binding.position(*keyword) else {
                return Err(unexpected_keyword(
                    binding.type_label,
                    &binding.describe(*keyword),
                ));
            };
            let slot = &mut supplied[index];
            if slot.is_some() {
                return Err(duplicate_argument(
                    binding.type_label,
                    binding.labels[index],
                ));
            }
            *slot = Some(value.clone());
        }

        plan.params()
            .iter()
            .map(|param| {
                if let Some(value) = supplied[param.slot].take() {
                    return Ok(value);
                }
                param
                    .default
                    .and_then(|index| binding.defaults.get(index))
                    .cloned()
                    .ok_or_else(|| {
                        missing_argument(binding.type_label, binding.labels[param.slot])
                    })
            })
            .collect()
    }

    /// Render `TypeName(field=value, ...)` or `TypeName(value, ...)`.
    pub fn render(&self, record: &RecordValue) -> Result<String, EvalError> {
        let CompiledBody::Representation(style) = &*self.body else {
            return Err(method_kind_mismatch(MethodKind::Representation, self.kind()));
        };

        let binding = &*self.binding;
        let capacity = binding
            .type_label
            .len()
            .saturating_add(binding.arity().saturating_mul(12))
            .saturating_add(2);
        let mut out = String::with_capacity(capacity);
        out.push_str(binding.type_label);
        out.push('(');
        for (i, (label, value)) in binding.labels.iter().zip(record.fields()).enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if *style == ReprStyle::Keyword {
                out.push_str(label);
                out.push('=');
            }
            out.push_str(&value.to_string());
        }
        out.push(')');
        Ok(out)
    }

    /// Compare `lhs`, an instance of this callable's type, against `rhs`.
    pub fn compare(&self, lhs: &RecordValue, rhs: &Value) -> Result<Comparison, EvalError> {
        match rhs {
            Value::Record(other) => self.compare_records(lhs, other),
            _ => self.expect_kind(MethodKind::EqualityTest, Comparison::Incomparable),
        }
    }

    pub(crate) fn compare_records(
        &self,
        lhs: &RecordValue,
        rhs: &RecordValue,
    ) -> Result<Comparison, EvalError> {
        let CompiledBody::EqualityTest = &*self.body else {
            return Err(method_kind_mismatch(MethodKind::EqualityTest, self.kind()));
        };

        let type_id = self.binding.type_id;
        if lhs.type_id() != type_id || rhs.type_id() != type_id {
            return Ok(Comparison::Incomparable);
        }
        // An instance equals itself even when a field (a NaN float) does not.
        if lhs.is_same_object(rhs) {
            return Ok(Comparison::Equal);
        }
        Ok(Comparison::from_bool(lhs.fields() == rhs.fields()))
    }

    /// Field values in declaration order.
    pub fn iterate(&self, record: &RecordValue) -> Result<Vec<Value>, EvalError> {
        let CompiledBody::Iteration = &*self.body else {
            return Err(method_kind_mismatch(MethodKind::Iteration, self.kind()));
        };
        Ok(record
            .fields()
            .iter()
            .take(self.binding.arity())
            .cloned()
            .collect())
    }

    /// Hash of the field tuple.
    pub fn hash_fields(&self, record: &RecordValue) -> Result<u64, EvalError> {
        let CompiledBody::Hashing = &*self.body else {
            return Err(method_kind_mismatch(MethodKind::Hashing, self.kind()));
        };
        Ok(hash_field_tuple(record.fields()))
    }

    fn expect_kind<T>(&self, expected: MethodKind, ok: T) -> Result<T, EvalError> {
        if self.kind() == expected {
            Ok(ok)
        } else {
            Err(method_kind_mismatch(expected, self.kind()))
        }
    }
}

/// Hash of a field tuple: its length, then each value in order.
///
/// Records whose type has generated equality but no generated hashing hash
/// through here too, so equal instances hash equal either way.
pub(crate) fn hash_field_tuple(fields: &[Value]) -> u64 {
    let mut hasher = FxHasher::default();
    fields.len().hash(&mut hasher);
    for value in fields {
        value.hash(&mut hasher);
    }
    hasher.finish()
}

impl fmt::Debug for GeneratedCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedCallable")
            .field("body", &self.body)
            .field("binding", &self.binding)
            .finish()
    }
}
