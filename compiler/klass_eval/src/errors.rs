//! Call-time errors for generated methods.
//!
//! Declaration problems are `ConfigError`s and never reach this module.
//! What remains are mistakes made by the caller of an already attached
//! method: wrong arguments to an initializer, a suppressed method, an unknown
//! field.
//!
//! Factory functions are the public API; they populate both `kind` and
//! `message`.

use std::fmt;

use klass_ir::MethodKind;

use crate::value::Value;

/// Result of calling a generated method.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// More positional arguments than the initializer has fields.
    TooManyArguments {
        type_name: String,
        max: usize,
        got: usize,
    },
    /// A keyword argument that names no field.
    UnexpectedKeyword { type_name: String, keyword: String },
    /// A field supplied both positionally and by keyword, or twice by keyword.
    DuplicateArgument { type_name: String, field: String },
    /// A field without a default that received no argument.
    MissingArgument { type_name: String, field: String },
    /// The method was suppressed for this type.
    UndefinedMethod { method: String, type_name: String },
    UndefinedField { field: String, type_name: String },
    /// A callable was invoked through the entry point of another kind.
    MethodKindMismatch {
        expected: MethodKind,
        got: MethodKind,
    },
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyArguments {
                type_name,
                max,
                got,
            } => {
                let arg_word = if *max == 1 { "argument" } else { "arguments" };
                write!(
                    f,
                    "{type_name} takes at most {max} positional {arg_word}, got {got}"
                )
            }
            Self::UnexpectedKeyword { type_name, keyword } => {
                write!(f, "{type_name} got an unexpected keyword argument `{keyword}`")
            }
            Self::DuplicateArgument { type_name, field } => {
                write!(f, "{type_name} got multiple values for argument `{field}`")
            }
            Self::MissingArgument { type_name, field } => {
                write!(f, "{type_name} missing required argument `{field}`")
            }
            Self::UndefinedMethod { method, type_name } => {
                write!(f, "no method '{method}' on type {type_name}")
            }
            Self::UndefinedField { field, type_name } => {
                write!(f, "no field {field} on {type_name}")
            }
            Self::MethodKindMismatch { expected, got } => {
                write!(
                    f,
                    "generated `{}` body invoked as `{}`",
                    got.method_name(),
                    expected.method_name()
                )
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Error raised by a generated method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Initializer Argument Errors

#[cold]
pub fn too_many_arguments(type_name: &str, max: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments {
        type_name: type_name.to_string(),
        max,
        got,
    })
}

#[cold]
pub fn unexpected_keyword(type_name: &str, keyword: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedKeyword {
        type_name: type_name.to_string(),
        keyword: keyword.to_string(),
    })
}

#[cold]
pub fn duplicate_argument(type_name: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateArgument {
        type_name: type_name.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn missing_argument(type_name: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument {
        type_name: type_name.to_string(),
        field: field.to_string(),
    })
}

// Method and Field Access Errors

/// The method kind was suppressed when the type was declared.
#[cold]
pub fn no_such_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn no_field_on_record(field: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn method_kind_mismatch(expected: MethodKind, got: MethodKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodKindMismatch { expected, got })
}
