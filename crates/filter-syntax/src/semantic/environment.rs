use crate::{
    builder,
    errors::{Diagnostics, EnvironmentError},
    semantic::checker::Checker,
};
use model::{checked::expr::CheckedExpr, core::value_type::ValueType};
use std::collections::HashMap;
use tracing::debug;

/// Typed variable declarations against which expressions are checked.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    declarations: HashMap<String, ValueType>,
}

impl Environment {
    /// Declare variables. Names are identifiers optionally joined by dots
    /// (`user.name`); each may be declared once.
    pub fn new<I, S>(declarations: I) -> Result<Self, EnvironmentError>
    where
        I: IntoIterator<Item = (S, ValueType)>,
        S: Into<String>,
    {
        let mut env = Environment::default();
        for (name, ty) in declarations {
            env.declare(name, ty)?;
        }
        Ok(env)
    }

    pub fn declare(&mut self, name: impl Into<String>, ty: ValueType) -> Result<(), EnvironmentError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(EnvironmentError::InvalidName(name));
        }
        if self.declarations.contains_key(&name) {
            return Err(EnvironmentError::Duplicate(name));
        }
        self.declarations.insert(name, ty);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&ValueType> {
        self.declarations.get(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Parse and type-check `source`.
    pub fn compile(&self, source: &str) -> Result<CheckedExpr, Diagnostics> {
        let ast = builder::parse(source)?;
        let checked = Checker::new(self).check(&ast)?;
        debug!(ty = %checked.ty, "expression compiled");
        Ok(checked)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
