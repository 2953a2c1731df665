pub mod common;
pub mod kitchen;
pub mod recipe;
