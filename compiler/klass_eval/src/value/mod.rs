//! Values held in record fields and passed to generated methods.
//!
//! Scalars are stored inline; strings and sequences sit behind `Heap`, which
//! only this crate can allocate. A `Record` defers to its type's generated
//! methods for `Display`, `PartialEq` and `Hash`, falling back to identity
//! when the type was declared without them.

mod heap;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use heap::Heap;

use crate::record::RecordValue;

#[derive(Clone)]
pub enum Value {
    /// Absent value.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    Record(RecordValue),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Value::Float(x)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Value::Int(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        if let Value::Record(r) = self {
            Some(r)
        } else {
            None
        }
    }

    /// Name of the value's type; a record reports its declared type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Record(r) => r.record_type().label(),
        }
    }

    /// Stable per-variant tag, mixed into hashes.
    fn tag(&self) -> u8 {
        match self {
            Value::None => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::Str(_) => 4,
            Value::List(_) => 5,
            Value::Tuple(_) => 6,
            Value::Record(_) => 7,
        }
    }
}

/// Comma-separated items between `open` and `close`.
fn join(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{open}")?;
    let mut sep = "";
    for item in items {
        write!(f, "{sep}{item}")?;
        sep = ", ";
    }
    if open == '(' && items.len() == 1 {
        f.write_str(",")?;
    }
    write!(f, "{close}")
}

/// The form a representation shows a field value in: strings quoted and
/// escaped, sequences bracketed, records through their own representation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => join(f, '[', items, ']'),
            Value::Tuple(items) => join(f, '(', items, ')'),
            Value::Record(r) => fmt::Display::fmt(r, f),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::List(items) => f.debug_tuple("List").field(&**items).finish(),
            Value::Tuple(items) => f.debug_tuple("Tuple").field(&**items).finish(),
            Value::Record(r) => fmt::Debug::fmt(r, f),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::{Bool, Float, Int, List, Record, Str, Tuple};

        match (self, other) {
            (Value::None, Value::None) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => **a == **b,
            (List(a), List(b)) | (Tuple(a), Tuple(b)) => Heap::ptr_eq(a, b) || **a == **b,
            (Record(a), Record(b)) => a.equals(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            Value::None => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            // 0.0 and -0.0 compare equal, so they must hash alike.
            Value::Float(x) if *x == 0.0 => 0.0f64.to_bits().hash(state),
            Value::Float(x) => x.to_bits().hash(state),
            Value::Str(s) => s.as_str().hash(state),
            Value::List(items) | Value::Tuple(items) => items.as_slice().hash(state),
            Value::Record(r) => r.hash(state),
        }
    }
}
