//! Template compiler: synthesizes the compiled body for a signature.
//!
//! Bodies reference fields by position only. An initializer body is a plan
//! with one slot per parameter; which name a slot answers to and which
//! default fills it come from the `FieldBinding` at call time. The generic
//! kinds carry no per-shape data at all.

use klass_ir::{ConfigError, MethodKind, ReprStyle};

use super::Signature;

/// One initializer parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParamSlot {
    /// Field slot the argument is stored into; also its positional index.
    pub slot: usize,
    /// Index into the bound defaults, for trailing optional parameters.
    pub default: Option<usize>,
}

/// Positional plan for an initializer of one arity and default count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitPlan {
    params: Box<[ParamSlot]>,
    required: usize,
}

impl InitPlan {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Number of leading parameters without a default.
    pub fn required(&self) -> usize {
        self.required
    }

    pub fn params(&self) -> &[ParamSlot] {
        &self.params
    }
}

/// An immutable, shareable implementation of one method kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompiledBody {
    Initializer(InitPlan),
    Representation(ReprStyle),
    EqualityTest,
    Iteration,
    Hashing,
}

impl CompiledBody {
    pub fn kind(&self) -> MethodKind {
        match self {
            CompiledBody::Initializer(_) => MethodKind::Initializer,
            CompiledBody::Representation(_) => MethodKind::Representation,
            CompiledBody::EqualityTest => MethodKind::EqualityTest,
            CompiledBody::Iteration => MethodKind::Iteration,
            CompiledBody::Hashing => MethodKind::Hashing,
        }
    }
}

/// Builds compiled bodies. Stateless; caching is the `SignatureCache`'s job.
pub struct TemplateCompiler;

impl TemplateCompiler {
    /// Compile the body for `signature`.
    ///
    /// Either returns a complete body or fails; nothing is partially built.
    pub fn compile(signature: Signature) -> Result<CompiledBody, ConfigError> {
        match signature {
            Signature::Initializer { arity, defaults } => {
                Self::compile_initializer(arity, defaults).map(CompiledBody::Initializer)
            }
            Signature::Representation(style) => Ok(CompiledBody::Representation(style)),
            Signature::EqualityTest => Ok(CompiledBody::EqualityTest),
            Signature::Iteration => Ok(CompiledBody::Iteration),
            Signature::Hashing => Ok(CompiledBody::Hashing),
        }
    }

    fn compile_initializer(arity: usize, defaults: usize) -> Result<InitPlan, ConfigError> {
        let required = arity
            .checked_sub(defaults)
            .ok_or(ConfigError::InvalidSignature { arity, defaults })?;

        let params = (0..arity)
            .map(|slot| ParamSlot {
                slot,
                default: slot.checked_sub(required),
            })
            .collect();

        Ok(InitPlan { params, required })
    }
}
