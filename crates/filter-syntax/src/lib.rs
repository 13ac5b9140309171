//! Parser and type checker for boolean filter expressions.
//!
//! [`Environment::compile`](semantic::environment::Environment::compile) turns
//! source text into a [`model::checked::expr::CheckedExpr`] or a list of
//! diagnostics.

pub mod ast;
pub mod builder;
pub mod errors;
pub mod parser;
pub mod semantic;

pub use errors::{Diagnostic, Diagnostics, EnvironmentError};
pub use semantic::environment::Environment;
