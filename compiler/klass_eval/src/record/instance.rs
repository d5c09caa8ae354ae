//! Record instances.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use klass_ir::{MethodKind, Name};

use super::{RecordType, RecordTypeId};
use crate::codegen::{hash_field_tuple, Comparison};
use crate::errors::{no_field_on_record, no_such_method, EvalError};
use crate::value::{Heap, Value};

/// An instance of a declared record type.
///
/// Field values are stored in declaration order. Instances are immutable;
/// `with_field` produces an updated copy.
#[derive(Clone)]
pub struct RecordValue {
    ty: Arc<RecordType>,
    fields: Heap<Vec<Value>>,
}

impl RecordValue {
    pub(crate) fn new(ty: Arc<RecordType>, fields: Heap<Vec<Value>>) -> Self {
        RecordValue { ty, fields }
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    pub fn type_id(&self) -> RecordTypeId {
        self.ty.id()
    }

    /// Field values in declaration order.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn get_field(&self, name: Name) -> Option<&Value> {
        let index = self.ty.field_index(name)?;
        self.fields.get(index)
    }

    /// Value for positional sub-pattern `index`, with the field it binds.
    pub fn match_positional(&self, index: usize) -> Option<(Name, &Value)> {
        let name = *self.ty.match_args().get(index)?;
        Some((name, self.fields.get(index)?))
    }

    /// A copy of this instance with one field replaced.
    pub fn with_field(&self, name: Name, value: Value) -> Result<RecordValue, EvalError> {
        let Some(index) = self.ty.field_index(name) else {
            return Err(no_field_on_record(
                self.ty.binding().text(name),
                self.ty.label(),
            ));
        };
        let mut fields = (*self.fields).clone();
        fields[index] = value;
        Ok(RecordValue::new(Arc::clone(&self.ty), Heap::new(fields)))
    }

    /// True when both handles are the same instance.
    pub fn is_same_object(&self, other: &RecordValue) -> bool {
        Heap::ptr_eq(&self.fields, &other.fields)
    }

    /// Run the generated equality of this instance's type against `other`.
    ///
    /// `Incomparable` when the type has no generated equality.
    pub fn compare(&self, other: &Value) -> Result<Comparison, EvalError> {
        match self.ty.methods().get(MethodKind::EqualityTest) {
            Some(eq) => eq.compare(self, other),
            None => Ok(Comparison::Incomparable),
        }
    }

    fn compare_record(&self, other: &RecordValue) -> Comparison {
        match self.ty.methods().get(MethodKind::EqualityTest) {
            Some(eq) => eq
                .compare_records(self, other)
                .unwrap_or(Comparison::Incomparable),
            None => Comparison::Incomparable,
        }
    }

    /// Host equality: identity, then this side's generated equality, then
    /// the other side's.
    pub fn equals(&self, other: &RecordValue) -> bool {
        if self.is_same_object(other) {
            return true;
        }
        let outcome = match self.compare_record(other) {
            Comparison::Incomparable => other.compare_record(self),
            decided => decided,
        };
        outcome == Comparison::Equal
    }

    /// Field values via the generated iteration method.
    pub fn iter_fields(&self) -> Result<Vec<Value>, EvalError> {
        match self.ty.methods().get(MethodKind::Iteration) {
            Some(iter) => iter.iterate(self),
            None => Err(no_such_method(
                MethodKind::Iteration.method_name(),
                self.ty.label(),
            )),
        }
    }

    /// Hash from the generated hashing method, if the type has one.
    pub fn generated_hash(&self) -> Option<u64> {
        let hash = self.ty.methods().get(MethodKind::Hashing)?;
        hash.hash_fields(self).ok()
    }

    /// Representation from the generated method, if the type has one.
    pub fn repr(&self) -> Option<String> {
        let repr = self.ty.methods().get(MethodKind::Representation)?;
        repr.render(self).ok()
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{} object>", self.ty.label()),
        }
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(self.ty.label())
            .field(&*self.fields)
            .finish()
    }
}

/// Follows whichever equality the type ends up with: the generated hash if
/// there is one, the field tuple under generated equality, identity
/// otherwise.
impl Hash for RecordValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(hash) = self.generated_hash() {
            state.write_u64(hash);
        } else if self.ty.methods().get(MethodKind::EqualityTest).is_some() {
            state.write_u64(hash_field_tuple(&self.fields));
        } else {
            self.fields.hash_identity(state);
        }
    }
}
