//! HTTP verbs understood by the route table.
//!
//! # Design Decisions
//! - Closed enum instead of `http::Method`: only six verbs are routable
//! - "ALL" lives in `DeclaredMethod`, never in `RoutableMethod`, so the
//!   sentinel cannot reach the matcher unexpanded
//! - HEAD is not routable; lookups normalize it to GET first

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One member of the fixed set of routable HTTP verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoutableMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl RoutableMethod {
    /// Every routable method, in the order refresh expands them.
    pub const ALL: [RoutableMethod; 6] = [
        RoutableMethod::Get,
        RoutableMethod::Post,
        RoutableMethod::Put,
        RoutableMethod::Patch,
        RoutableMethod::Delete,
        RoutableMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutableMethod::Get => "GET",
            RoutableMethod::Post => "POST",
            RoutableMethod::Put => "PUT",
            RoutableMethod::Patch => "PATCH",
            RoutableMethod::Delete => "DELETE",
            RoutableMethod::Options => "OPTIONS",
        }
    }

    /// Convert from a request method. Returns `None` outside the routable set.
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(RoutableMethod::Get),
            Method::POST => Some(RoutableMethod::Post),
            Method::PUT => Some(RoutableMethod::Put),
            Method::PATCH => Some(RoutableMethod::Patch),
            Method::DELETE => Some(RoutableMethod::Delete),
            Method::OPTIONS => Some(RoutableMethod::Options),
            _ => None,
        }
    }

    pub fn to_http(self) -> Method {
        match self {
            RoutableMethod::Get => Method::GET,
            RoutableMethod::Post => Method::POST,
            RoutableMethod::Put => Method::PUT,
            RoutableMethod::Patch => Method::PATCH,
            RoutableMethod::Delete => Method::DELETE,
            RoutableMethod::Options => Method::OPTIONS,
        }
    }
}

impl fmt::Display for RoutableMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method string outside the routable set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported method `{0}`; expected one of GET, POST, PUT, PATCH, DELETE, OPTIONS")]
pub struct UnknownMethod(pub String);

impl FromStr for RoutableMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutableMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// The method an embedded framework records for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredMethod {
    /// The "ALL" sentinel: applies to every routable method.
    All,
    Only(RoutableMethod),
}

impl DeclaredMethod {
    /// True when a route declared with `self` serves `method`.
    pub fn covers(&self, method: RoutableMethod) -> bool {
        match self {
            DeclaredMethod::All => true,
            DeclaredMethod::Only(m) => *m == method,
        }
    }
}

impl From<RoutableMethod> for DeclaredMethod {
    fn from(method: RoutableMethod) -> Self {
        DeclaredMethod::Only(method)
    }
}

impl fmt::Display for DeclaredMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredMethod::All => f.write_str("ALL"),
            DeclaredMethod::Only(m) => m.fmt(f),
        }
    }
}

impl FromStr for DeclaredMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(DeclaredMethod::All)
        } else {
            s.parse().map(DeclaredMethod::Only)
        }
    }
}

/// HEAD responses mirror GET; the transport drops the body.
pub fn normalize(method: &Method) -> Method {
    if *method == Method::HEAD {
        Method::GET
    } else {
        method.clone()
    }
}
