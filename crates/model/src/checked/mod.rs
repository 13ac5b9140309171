pub mod expr;
pub mod functions;
