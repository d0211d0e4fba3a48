pub mod config;
pub mod metadata;
pub mod time;
pub mod types;
