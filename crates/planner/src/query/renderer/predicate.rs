use crate::query::{
    ast::predicate::Predicate,
    dialect::Dialect,
    renderer::{Render, Renderer},
};
use model::core::value::Value;

impl Render for Predicate {
    fn render(&self, r: &mut Renderer) {
        match self {
            Predicate::Comparison { column, op, value } => {
                r.add_column(column);
                r.sql.push(' ');
                r.sql.push_str(op.as_sql());
                r.sql.push(' ');
                r.add_param(value.clone());
            }
            Predicate::NullCheck { column, is_null } => {
                r.add_column(column);
                r.sql
                    .push_str(if *is_null { " IS NULL" } else { " IS NOT NULL" });
            }
            Predicate::And(left, right) => render_connective(r, left, "AND", right),
            Predicate::Or(left, right) => render_connective(r, left, "OR", right),
            Predicate::Not(inner) => {
                r.sql.push_str("NOT (");
                inner.render(r);
                r.sql.push(')');
            }
            Predicate::Like { column, pattern } => {
                r.add_column(column);
                r.sql.push_str(" LIKE ");
                r.add_param(Value::String(pattern.clone()));
            }
            Predicate::In { column, values } => {
                r.add_column(column);
                r.sql.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        r.sql.push(',');
                    }
                    r.add_param(value.clone());
                }
                r.sql.push(')');
            }
            Predicate::BoolLiteral(true) => r.sql.push_str("TRUE"),
            Predicate::BoolLiteral(false) => r.sql.push_str("FALSE"),
            Predicate::AlwaysFalse => r.sql.push_str("(1=0)"),
        }
    }
}

fn render_connective(r: &mut Renderer, left: &Predicate, keyword: &str, right: &Predicate) {
    r.sql.push('(');
    left.render(r);
    r.sql.push(' ');
    r.sql.push_str(keyword);
    r.sql.push(' ');
    right.render(r);
    r.sql.push(')');
}

impl Predicate {
    /// Render with a fresh renderer for `dialect`.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(dialect);
        self.render(&mut renderer);
        renderer.finish()
    }
}
