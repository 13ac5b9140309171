//! Size and nesting limits enforced on every conversion.

use crate::error::{ConversionError, ErrorCode};
use model::checked::expr::{CheckedExpr, CheckedKind};

pub const DEFAULT_MAX_LENGTH: usize = 10_000;
pub const DEFAULT_MAX_DEPTH: usize = 50;
pub const DEFAULT_MAX_IN_SIZE: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_length: usize,
    pub max_depth: usize,
    pub max_in_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_length: DEFAULT_MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
            max_in_size: DEFAULT_MAX_IN_SIZE,
        }
    }
}

impl Limits {
    /// Zero means "use the default" for each limit.
    pub fn new(max_length: usize, max_depth: usize, max_in_size: usize) -> Self {
        let or_default = |value: usize, default: usize| if value == 0 { default } else { value };
        Limits {
            max_length: or_default(max_length, DEFAULT_MAX_LENGTH),
            max_depth: or_default(max_depth, DEFAULT_MAX_DEPTH),
            max_in_size: or_default(max_in_size, DEFAULT_MAX_IN_SIZE),
        }
    }

    /// Returns the length in characters when within the limit.
    pub fn check_length(&self, source: &str) -> Result<usize, ConversionError> {
        let length = source.chars().count();
        if length > self.max_length {
            return Err(ConversionError::new(
                ErrorCode::TooLong,
                format!(
                    "expression exceeds maximum length of {} characters (got {})",
                    self.max_length, length
                ),
            ));
        }
        Ok(length)
    }

    pub fn check_depth(&self, depth: usize) -> Result<(), ConversionError> {
        if depth > self.max_depth {
            return Err(ConversionError::new(
                ErrorCode::TooComplex,
                format!(
                    "expression exceeds maximum depth of {} (got {})",
                    self.max_depth, depth
                ),
            ));
        }
        Ok(())
    }

    pub fn check_in_size(&self, size: usize) -> Result<(), ConversionError> {
        if size > self.max_in_size {
            return Err(ConversionError::new(
                ErrorCode::ListTooLarge,
                format!(
                    "IN clause size {} exceeds maximum of {}",
                    size, self.max_in_size
                ),
            ));
        }
        Ok(())
    }

    /// Past half of either limit an expression is worth reporting.
    pub fn is_complex(&self, depth: usize, length: usize) -> bool {
        depth > self.max_depth / 2 || length > self.max_length / 2
    }
}

/// Nesting depth of a typed tree. Leaves count 1; every call, select and
/// list adds one level over its deepest child.
pub fn depth(expr: &CheckedExpr) -> usize {
    match &expr.kind {
        CheckedKind::Literal(_) | CheckedKind::Identifier(_) => 1,
        CheckedKind::Select { .. } | CheckedKind::Call { .. } | CheckedKind::List(_) => {
            1 + expr.children().into_iter().map(depth).max().unwrap_or(0)
        }
    }
}
