//! Compiles type-checked filter expressions into parameterized SQL
//! predicates, enforcing size limits and field-level authorization.
//!
//! ```ignore
//! let converter = Converter::new(Config::default().field("status", ValueType::String))?;
//! let conversion = converter.convert(r#"status == "active""#)?;
//! let (sql, params) = conversion.render(&Postgres);
//! ```

pub mod auth;
pub mod config;
pub mod convert;
pub mod converter;
pub mod error;
pub mod escape;
pub mod limits;
pub mod observer;
pub mod schema;

pub use config::{Config, ConfigError, FieldConfig};
pub use converter::{Conversion, Converter, ExpressionCompiler};
pub use error::{ContractViolation, ConversionError, ConvertError, ErrorCode, SetupError};
pub use observer::{SECURITY_TARGET, SecurityObserver, TracingObserver};
