//! Parameterized SQL predicates and their dialect-aware rendering.

pub mod query;

pub use query::{
    ast::predicate::{CompareOp, Predicate},
    dialect::{Dialect, MySql, Postgres},
    renderer::{Render, Renderer},
};
