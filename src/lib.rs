//! Route bridge between an embedded micro-framework and a host HTTP dispatcher.

pub mod bridge;
pub mod config;
pub mod demo;
pub mod framework;
pub mod host;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use bridge::{BridgeAdapter, DispatchEntryPoint, Lookup, RegistrationError, RouteSpec};
pub use config::BridgeConfig;
pub use framework::{EmbeddedFramework, MicroApp};
pub use host::{HostContext, HostServer};
pub use lifecycle::Shutdown;
pub use routing::{DeclaredMethod, RoutableMethod, RouteDeclaration, RouteTable};
