pub mod commands;
pub mod config;
mod context;
pub mod documents;
pub mod server;

pub use context::AppContext;
