pub mod kitchen;
pub mod llm;
