//! Klass Eval - generated methods for lightweight record types.
//!
//! A record type is declared from an ordered list of fields. Its
//! initializer, representation and equality (and optionally iteration and
//! hashing) are not written by hand: they are produced by pairing a shared
//! compiled body with the type's own field names and defaults.
//!
//! # Architecture
//!
//! - `codegen::TemplateCompiler`: builds the one `CompiledBody` for a
//!   `Signature`. Initializer bodies are positional plans keyed by arity and
//!   default count; the other kinds have a single generic body each.
//! - `codegen::SignatureCache`: memoizes bodies by signature. `ShapeCache`
//!   is the thread-safe implementation and `ShapeCache::global()` the
//!   process-wide instance.
//! - `codegen::GeneratedCallable`: a cached body bound to one type's
//!   `FieldBinding`. Bodies are shared between types; callables never are.
//! - `RecordFactory`: validates a `RecordDecl`, resolves each selected
//!   method kind and attaches the callables to a new `RecordType`.
//!
//! Declaration cost is proportional to the number of distinct shapes in the
//! program, not to the number of declared types.

pub mod codegen;
pub mod errors;
mod factory;
mod fields;
mod record;
mod value;

pub use codegen::{
    CompiledBody, Comparison, FieldBinding, GeneratedCallable, ShapeCache, Signature,
    SignatureCache, TemplateCompiler,
};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use factory::RecordFactory;
pub use fields::{Field, FieldDescriptor, FieldList, RecordDecl};
pub use klass_ir::{ConfigError, MethodKind, MethodSet, Name, ReprStyle, SharedInterner};
pub use record::{MethodTable, RecordType, RecordTypeId, RecordValue};
pub use value::{Heap, Value};
