pub mod client;
pub mod error;
pub mod keys;
pub mod models;
pub mod prompts;
