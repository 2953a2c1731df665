pub mod errors;
pub mod recipe;

pub use errors::*;
pub use recipe::*;
