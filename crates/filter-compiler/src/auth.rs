//! Field-level authorization.

use model::checked::expr::{CheckedExpr, CheckedKind};
use std::collections::{HashMap, HashSet};

/// Which fields a caller may reference. A policy with neither public fields
/// nor ACL entries is disabled and authorizes everything.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    public_fields: HashSet<String>,
    field_acl: HashMap<String, HashSet<String>>,
}

impl Policy {
    pub fn new<P, A, R>(public_fields: P, field_acl: A) -> Self
    where
        P: IntoIterator<Item = String>,
        A: IntoIterator<Item = (String, R)>,
        R: IntoIterator<Item = String>,
    {
        Policy {
            public_fields: public_fields.into_iter().collect(),
            field_acl: field_acl
                .into_iter()
                .map(|(field, roles)| (field, roles.into_iter().collect()))
                .collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.public_fields.is_empty() || !self.field_acl.is_empty()
    }

    pub fn is_authorized(&self, field: &str, roles: &[String]) -> bool {
        if self.public_fields.contains(field) {
            return true;
        }
        self.field_acl
            .get(field)
            .is_some_and(|allowed| roles.iter().any(|role| allowed.contains(role)))
    }

    /// First referenced field (in tree order) the caller may not use.
    pub fn first_unauthorized(&self, expr: &CheckedExpr, roles: &[String]) -> Option<String> {
        referenced_fields(expr)
            .into_iter()
            .find(|field| !self.is_authorized(field, roles))
    }
}

/// Distinct field names referenced by the tree, in pre-order of first
/// appearance: every identifier plus the field name of every selection.
/// Literal values are never included.
pub fn referenced_fields(expr: &CheckedExpr) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();
    walk(expr, &mut |node| {
        let name = match &node.kind {
            CheckedKind::Identifier(name) => name,
            CheckedKind::Select { field, .. } => field,
            _ => return,
        };
        if seen.insert(name.clone()) {
            fields.push(name.clone());
        }
    });
    fields
}

fn walk(expr: &CheckedExpr, visit: &mut impl FnMut(&CheckedExpr)) {
    visit(expr);
    for child in expr.children() {
        walk(child, visit);
    }
}
