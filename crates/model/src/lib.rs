pub mod checked;
pub mod core;
