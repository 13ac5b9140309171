mod authorization;
mod common;
mod conversion;
mod errors;
mod limits;
