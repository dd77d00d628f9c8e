pub mod client;
pub mod env;
pub mod types;
pub mod utils;
