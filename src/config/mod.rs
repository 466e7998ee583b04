mod settings;

pub use settings::{ApiConfig, LogConfig, ServerConfig, SessionConfig, Settings};
