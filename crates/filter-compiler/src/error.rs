use filter_syntax::EnvironmentError;
use model::core::value_type::ValueType;
use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Outward classification of a rejected expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidSyntax,
    InvalidType,
    TooLong,
    TooComplex,
    UnsupportedOperation,
    TypeMismatch,
    UnauthorizedField,
    ListTooLarge,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSyntax => "INVALID_SYNTAX",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::TooLong => "TOO_LONG",
            ErrorCode::TooComplex => "TOO_COMPLEX",
            ErrorCode::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::UnauthorizedField => "UNAUTHORIZED_FIELD",
            ErrorCode::ListTooLarge => "LIST_TOO_LARGE",
        }
    }

    /// Fixed text that is safe to show to whoever submitted the expression.
    pub fn public_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSyntax => "invalid filter expression syntax",
            ErrorCode::InvalidType => "filter expression must evaluate to boolean",
            ErrorCode::TooLong => "filter expression is too long",
            ErrorCode::TooComplex => "filter expression is too complex",
            ErrorCode::UnsupportedOperation => "unsupported filter operation",
            ErrorCode::TypeMismatch => "invalid comparison type",
            ErrorCode::UnauthorizedField => {
                "access denied: insufficient permissions for requested filter"
            }
            ErrorCode::ListTooLarge => "too many values in filter list",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected expression. `Display` yields only the public message; the
/// internal diagnostic may name fields or echo input and belongs in
/// server-side logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionError {
    code: ErrorCode,
    internal: String,
}

impl ConversionError {
    pub fn new(code: ErrorCode, internal: impl Into<String>) -> Self {
        ConversionError {
            code,
            internal: internal.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn public_message(&self) -> &'static str {
        self.code.public_message()
    }

    pub fn internal(&self) -> &str {
        &self.internal
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.public_message())
    }
}

impl std::error::Error for ConversionError {}

/// The typed tree broke an invariant the expression compiler promises.
/// Never caused by user input alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("'{function}' expects {expected} argument(s), found {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("'{0}' called without a receiver")]
    MissingReceiver(String),

    #[error("literal of type {0} used as a predicate")]
    NonBooleanLiteral(ValueType),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Rejected(#[from] ConversionError),

    #[error("internal error while converting filter expression")]
    Contract(#[from] ContractViolation),
}

impl ConvertError {
    /// Outward code, if this is a user-facing rejection.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ConvertError::Rejected(err) => Some(err.code()),
            ConvertError::Contract(_) => None,
        }
    }
}

/// Errors raised while building a converter from its configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid field declaration: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
