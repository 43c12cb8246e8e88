pub mod env;
pub mod global_file;
pub mod explicit_file;
