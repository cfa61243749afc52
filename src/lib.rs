pub mod aggregate;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod labels;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod store;
pub mod utils;

pub use error::SentiraError;
