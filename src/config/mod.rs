//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → routes → RouteSpec → BridgeAdapter::route at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes cannot be removed, so no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AdminConfig, BridgeConfig, ListenerConfig, ObservabilityConfig, RouteConfig, TimeoutConfig};
pub use validation::ValidationError;
