//! LIKE pattern construction for the string operators.

/// Escape `\ % _ [ ]` so none of them act as pattern syntax. Backslash goes
/// first so the escapes added afterwards are not doubled. Not idempotent.
pub fn escape_like_pattern(literal: &str) -> String {
    literal
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

/// String operators that compile to a LIKE match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOp {
    Contains,
    StartsWith,
    EndsWith,
}

impl StringOp {
    pub fn from_function(name: &str) -> Option<Self> {
        match name {
            model::checked::functions::CONTAINS => Some(StringOp::Contains),
            model::checked::functions::STARTS_WITH => Some(StringOp::StartsWith),
            model::checked::functions::ENDS_WITH => Some(StringOp::EndsWith),
            _ => None,
        }
    }

    /// Escaped literal with this operator's wildcards added.
    pub fn pattern(&self, literal: &str) -> String {
        let escaped = escape_like_pattern(literal);
        match self {
            StringOp::Contains => format!("%{escaped}%"),
            StringOp::StartsWith => format!("{escaped}%"),
            StringOp::EndsWith => format!("%{escaped}"),
        }
    }
}
