pub mod ambient;
pub mod runtime;
pub mod scroll;
