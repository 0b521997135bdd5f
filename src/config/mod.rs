//! # Configuration Module
//!
//! Configuration is layered from:
//! - Built-in defaults
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - Environment variables (prefixed with APP__) and a few short aliases
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use travel_planner::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Server will listen on {}", settings.server_addr());
//! ```

mod settings;

pub use settings::*;
