pub mod ast;
pub mod dialect;
pub mod renderer;
