use crate::ast::span::Span;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct BuildError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl BuildError {
    pub fn at(span: Span, message: impl Into<String>) -> Self {
        BuildError {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for BuildError {}

/// Stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Check,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Parse => write!(f, "syntax"),
            Phase::Check => write!(f, "type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn check(span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            phase: Phase::Check,
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }
}

impl From<BuildError> for Diagnostic {
    fn from(err: BuildError) -> Self {
        Diagnostic {
            phase: Phase::Parse,
            message: err.message,
            line: err.line,
            column: err.column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error at {}:{}: {}",
            self.phase, self.line, self.column, self.message
        )
    }
}

/// Every problem found while compiling one expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    pub issues: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(issues: Vec<Diagnostic>) -> Self {
        Diagnostics { issues }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn first(&self) -> Option<&Diagnostic> {
        self.issues.first()
    }
}

impl From<BuildError> for Diagnostics {
    fn from(err: BuildError) -> Self {
        Diagnostics::new(vec![err.into()])
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.issues.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for Diagnostics {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("invalid variable name '{0}'")]
    InvalidName(String),
    #[error("variable '{0}' is declared more than once")]
    Duplicate(String),
}
