pub mod progressive;
pub mod types;
