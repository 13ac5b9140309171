pub mod value;
pub mod value_type;
