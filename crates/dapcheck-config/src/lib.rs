pub mod config;
pub mod error;
pub mod load;
pub mod merge;
pub mod validate;

pub use config::{HarnessConfig, LogConfig, LogLevel, ServerConfig, TimeoutConfig, TransportKind};
pub use error::ConfigError;
pub use load::{load_config, load_from_str, load_or_default};
