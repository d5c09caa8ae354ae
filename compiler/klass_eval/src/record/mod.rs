//! Declared record types and the method tables generated methods attach to.

mod instance;

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use klass_ir::{MethodKind, Name};
use rustc_hash::FxHashMap;

pub use instance::RecordValue;

use crate::codegen::{FieldBinding, GeneratedCallable};
use crate::errors::{no_such_method, EvalResult};
use crate::value::{Heap, Value};

/// Process-unique identity of a declared record type.
///
/// Generated equality only compares instances carrying the same id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordTypeId(u32);

impl RecordTypeId {
    /// Allocate an id no other type in this process has.
    pub fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        RecordTypeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Generated methods of one record type, indexed by kind.
#[derive(Clone, Default)]
pub struct MethodTable {
    entries: [Option<(Name, GeneratedCallable)>; MethodKind::COUNT],
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callable` under its kind's well-known method name.
    ///
    /// Re-attaching a kind replaces the previous callable.
    pub fn attach(&mut self, method_name: Name, callable: GeneratedCallable) {
        let index = callable.kind().index();
        self.entries[index] = Some((method_name, callable));
    }

    /// The generated method of `kind`, unless it was suppressed.
    pub fn get(&self, kind: MethodKind) -> Option<&GeneratedCallable> {
        self.entries[kind.index()]
            .as_ref()
            .map(|(_, callable)| callable)
    }

    /// Look a method up by its registered name.
    pub fn lookup(&self, method_name: Name) -> Option<&GeneratedCallable> {
        self.entries
            .iter()
            .flatten()
            .find(|(name, _)| *name == method_name)
            .map(|(_, callable)| callable)
    }

    pub fn has_method(&self, method_name: Name) -> bool {
        self.lookup(method_name).is_some()
    }

    /// Attached kinds, in attachment order.
    pub fn kinds(&self) -> impl Iterator<Item = MethodKind> + '_ {
        self.entries
            .iter()
            .flatten()
            .map(|(_, callable)| callable.kind())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

/// A declared record type.
///
/// Created by `RecordFactory::declare`. Instances hold an `Arc` to their
/// type, so the type and its generated methods live as long as any instance.
pub struct RecordType {
    binding: Arc<FieldBinding>,
    /// Field name to slot index.
    layout: FxHashMap<Name, usize>,
    methods: MethodTable,
}

impl RecordType {
    pub(crate) fn new(binding: Arc<FieldBinding>, methods: MethodTable) -> Self {
        let layout = binding
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();
        RecordType {
            binding,
            layout,
            methods,
        }
    }

    pub fn id(&self) -> RecordTypeId {
        self.binding.type_id()
    }

    pub fn name(&self) -> Name {
        self.binding.type_name()
    }

    /// The type name as text.
    pub fn label(&self) -> &'static str {
        self.binding.type_label()
    }

    pub fn arity(&self) -> usize {
        self.binding.arity()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> &[Name] {
        self.binding.names()
    }

    /// Read-only field-name sequence for positional structural patterns.
    ///
    /// Positional sub-pattern `i` matches the field named `match_args()[i]`.
    pub fn match_args(&self) -> &[Name] {
        self.binding.names()
    }

    /// Slot index of the field called `name`.
    pub fn field_index(&self, name: Name) -> Option<usize> {
        self.layout.get(&name).copied()
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn binding(&self) -> &Arc<FieldBinding> {
        &self.binding
    }

    /// Construct an instance with the generated initializer.
    pub fn instantiate(self: &Arc<Self>, args: &[Value], kwargs: &[(Name, Value)]) -> EvalResult {
        let Some(init) = self.methods.get(MethodKind::Initializer) else {
            return Err(no_such_method(
                MethodKind::Initializer.method_name(),
                self.label(),
            ));
        };
        let fields = init.initialize(args, kwargs)?;
        Ok(Value::Record(RecordValue::new(
            Arc::clone(self),
            Heap::new(fields),
        )))
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("id", &self.id())
            .field("name", &self.label())
            .field("fields", &self.binding.labels())
            .field("methods", &self.methods)
            .finish()
    }
}
