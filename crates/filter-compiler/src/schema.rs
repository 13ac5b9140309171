//! Declared fields and their backing columns.

use model::core::value_type::ValueType;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: ValueType,
    pub column: String,
}

impl FieldDecl {
    /// Column defaults to the field name when `column` is `None` or empty.
    pub fn new(name: impl Into<String>, ty: ValueType, column: Option<String>) -> Self {
        let name = name.into();
        let column = column
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| name.clone());
        FieldDecl { name, ty, column }
    }
}

/// Immutable field table shared by every conversion.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldDecl>,
}

impl Schema {
    /// A later declaration of the same name replaces an earlier one; the
    /// expression environment is what rejects duplicates.
    pub fn new(fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        let fields = fields
            .into_iter()
            .map(|decl| (decl.name.clone(), decl))
            .collect();
        Schema { fields }
    }

    /// Backing column for `field`, or `field` itself when undeclared.
    pub fn resolve_column<'a>(&'a self, field: &'a str) -> &'a str {
        self.fields
            .get(field)
            .map(|decl| decl.column.as_str())
            .unwrap_or(field)
    }

    pub fn type_of(&self, field: &str) -> Option<&ValueType> {
        self.fields.get(field).map(|decl| &decl.ty)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
