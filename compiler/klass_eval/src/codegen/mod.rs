//! Compiled bodies, the cache that shares them, and the callables that bind them.
//!
//! # Flow
//!
//! ```text
//! FieldBinding ──Signature::derive──▶ Signature
//!                                        │
//!                          SignatureCache::get_or_compile
//!                          hit ─┐        │ miss
//!                               │  TemplateCompiler::compile
//!                               ▼        ▼
//!                           Arc<CompiledBody>
//!                                        │
//!                         GeneratedCallable::bind(body, binding)
//! ```
//!
//! A body never holds field names or default values. Those belong to the
//! `FieldBinding` of the type the callable was built for, which is why one
//! body can serve every type of the same shape.

mod cache;
mod callable;
mod signature;
mod template;

pub use cache::{ShapeCache, SignatureCache};
pub use callable::{Comparison, FieldBinding, GeneratedCallable};
pub(crate) use callable::hash_field_tuple;
pub use signature::Signature;
pub use template::{CompiledBody, InitPlan, ParamSlot, TemplateCompiler};
