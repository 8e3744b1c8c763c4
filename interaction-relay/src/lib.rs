pub mod config;
pub use config::{Config, ConfigError};

mod error;
pub use error::Error;

pub mod forward;
pub mod http;
pub mod replies;
pub mod signature;
