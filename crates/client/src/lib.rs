pub mod client;
pub mod config;
pub mod error;

pub use client::Ikamand;
pub use config::Config;
pub use error::ApiError;
