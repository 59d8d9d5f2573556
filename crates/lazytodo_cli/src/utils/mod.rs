pub mod datetime;
pub mod prompt;
