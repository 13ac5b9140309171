pub mod checker;
pub mod environment;
