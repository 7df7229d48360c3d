pub mod join_code;
pub mod validate;

pub use join_code::JoinCodeGenerator;
