//! Validated direct route registration.
//!
//! # Responsibilities
//! - Collect raw route input through a builder
//! - Enforce presence and shape rules before anything is registered
//!
//! # Design Decisions
//! - Path and prefix are a tagged union; a built route can never carry both
//! - Every violation is a descriptive, user-facing error
//! - Collision checks live in the adapter, next to the lookup they reuse

use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::RouteConfig;
use crate::framework::{Handler, StaticResponse};
use crate::routing::method::{RoutableMethod, UnknownMethod};
use crate::routing::pattern::PatternError;

/// Errors raised by `BridgeAdapter::route`. Nothing is registered when one occurs.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("route handler is required")]
    MissingHandler,

    #[error("route method is required")]
    MissingMethod,

    #[error("{0}")]
    UnsupportedMethod(#[from] UnknownMethod),

    #[error("route must declare either a path or a path prefix")]
    MissingTarget,

    #[error("route must declare either a path or a path prefix, not both")]
    AmbiguousTarget,

    #[error("route path `{0}` must start with `/`")]
    InvalidPath(String),

    #[error("route path prefix `{0}` must start and end with `/`")]
    InvalidPrefix(String),

    #[error("route {method} {path} is already registered")]
    Duplicate { method: RoutableMethod, path: String },

    #[error("route {method} {path} conflicts with existing route {method} {existing}")]
    Conflict {
        method: RoutableMethod,
        path: String,
        existing: String,
    },

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

/// Where a directly registered route applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// A single path pattern.
    Path(String),
    /// Every path under the prefix; registered as `prefix*`.
    Prefix(String),
}

impl RouteTarget {
    /// The URL probed for collisions.
    pub fn probe(&self) -> &str {
        match self {
            RouteTarget::Path(p) | RouteTarget::Prefix(p) => p,
        }
    }

    /// The path pattern handed to the embedded framework.
    pub fn pattern(&self) -> String {
        match self {
            RouteTarget::Path(p) => p.clone(),
            RouteTarget::Prefix(p) => format!("{}*", p),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), RegistrationError> {
        match self {
            RouteTarget::Path(p) if !p.starts_with('/') => {
                Err(RegistrationError::InvalidPath(p.clone()))
            }
            RouteTarget::Prefix(p) if !(p.starts_with('/') && p.ends_with('/')) => {
                Err(RegistrationError::InvalidPrefix(p.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Path(p) => write!(f, "path {}", p),
            RouteTarget::Prefix(p) => write!(f, "prefix {}", p),
        }
    }
}

/// A route ready for `BridgeAdapter::route`.
#[derive(Clone)]
pub struct RouteSpec {
    pub method: RoutableMethod,
    pub target: RouteTarget,
    pub handler: Arc<dyn Handler>,
}

impl RouteSpec {
    pub fn builder() -> RouteSpecBuilder {
        RouteSpecBuilder::default()
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("handler", &self.handler.handler_ref())
            .finish()
    }
}

/// Raw, possibly incomplete route input.
#[derive(Default)]
pub struct RouteSpecBuilder {
    method: Option<String>,
    path: Option<String>,
    path_prefix: Option<String>,
    handler: Option<Arc<dyn Handler>>,
}

impl RouteSpecBuilder {
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    pub fn handler(mut self, handler: impl Handler) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<RouteSpec, RegistrationError> {
        let handler = self.handler.ok_or(RegistrationError::MissingHandler)?;
        let method = self.method.ok_or(RegistrationError::MissingMethod)?;
        let method: RoutableMethod = method.parse()?;

        let target = match (self.path, self.path_prefix) {
            (Some(_), Some(_)) => return Err(RegistrationError::AmbiguousTarget),
            (Some(path), None) => RouteTarget::Path(path),
            (None, Some(prefix)) => RouteTarget::Prefix(prefix),
            (None, None) => return Err(RegistrationError::MissingTarget),
        };

        Ok(RouteSpec {
            method,
            target,
            handler,
        })
    }
}

impl TryFrom<&RouteConfig> for RouteSpec {
    type Error = RegistrationError;

    /// A configured route is served by a static response built from its body.
    fn try_from(config: &RouteConfig) -> Result<Self, Self::Error> {
        let mut builder = RouteSpec::builder();
        if let Some(method) = &config.method {
            builder = builder.method(method.as_str());
        }
        if let Some(path) = &config.path {
            builder = builder.path(path.as_str());
        }
        if let Some(prefix) = &config.path_prefix {
            builder = builder.path_prefix(prefix.as_str());
        }
        if let Some(body) = &config.body {
            let status = StatusCode::from_u16(config.status).unwrap_or(StatusCode::OK);
            builder = builder.handler(
                StaticResponse::new(status, body.as_str())
                    .with_content_type(config.content_type.as_str()),
            );
        }
        builder.build()
    }
}
