//! Domain primitive types for resource identities and dependency edges.
//!
//! A compiled catalog is a set of [`ResourceId`]-keyed nodes plus a list of
//! typed [`Edge`]s. Edge endpoints may also name nodes the compiler does not
//! build itself; those are [`ExternalId`]s resolved against a registry by
//! whoever hosts the full system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a declarative resource built by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// An installable package.
    Package,
    /// A file with managed content and ownership.
    ManagedFile,
    /// A directory with managed ownership and mode.
    ManagedDirectory,
    /// A system service.
    Service,
    /// A one-shot command.
    ExecAction,
    /// A key/value entry in the front-end application's settings store.
    ConfigEntry,
    /// A web-server configuration fragment keyed by module name.
    ApacheFragment,
    /// A named background queue worker.
    WorkerDeclaration,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Package => "Package",
            Self::ManagedFile => "ManagedFile",
            Self::ManagedDirectory => "ManagedDirectory",
            Self::Service => "Service",
            Self::ExecAction => "Exec",
            Self::ConfigEntry => "ConfigEntry",
            Self::ApacheFragment => "ApacheFragment",
            Self::WorkerDeclaration => "Worker",
        };
        write!(f, "{name}")
    }
}

/// Unique identity of a resource node: kind plus name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Resource name, unique within its kind.
    pub name: String,
}

impl ResourceId {
    /// Creates a resource identity.
    #[must_use]
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.name)
    }
}

/// Identity of a node declared outside the compiler.
///
/// The compiler only references these by identity when building edges; it
/// never creates, resolves, or executes them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates an external identity from its canonical string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An edge endpoint: a built resource or an external identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    /// A node built by this compiler.
    Resource(ResourceId),
    /// A node declared outside this compiler.
    External(ExternalId),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(id) => write!(f, "{id}"),
            Self::External(id) => write!(f, "{id}"),
        }
    }
}

impl From<ResourceId> for NodeRef {
    fn from(id: ResourceId) -> Self {
        Self::Resource(id)
    }
}

impl From<ExternalId> for NodeRef {
    fn from(id: ExternalId) -> Self {
        Self::External(id)
    }
}

/// Type of a directed relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// `from` must be realized only after `to`.
    Requires,
    /// `from` must be realized before `to`.
    Before,
    /// A change to `from` triggers a refresh of `to`.
    Notifies,
    /// `from` listens for refresh signals originating from `to`.
    SubscribesTo,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Requires => "requires",
            Self::Before => "before",
            Self::Notifies => "notifies",
            Self::SubscribesTo => "subscribes to",
        };
        write!(f, "{name}")
    }
}

/// A directed, typed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Relationship type.
    pub kind: EdgeKind,
    /// Origin endpoint.
    pub from: NodeRef,
    /// Target endpoint.
    pub to: NodeRef,
}

impl Edge {
    /// `from` must be realized only after `to`.
    #[must_use]
    pub fn requires(from: impl Into<NodeRef>, to: impl Into<NodeRef>) -> Self {
        Self {
            kind: EdgeKind::Requires,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `from` must be realized before `to`.
    #[must_use]
    pub fn before(from: impl Into<NodeRef>, to: impl Into<NodeRef>) -> Self {
        Self {
            kind: EdgeKind::Before,
            from: from.into(),
            to: to.into(),
        }
    }

    /// A change to `from` triggers a refresh of `to`.
    #[must_use]
    pub fn notifies(from: impl Into<NodeRef>, to: impl Into<NodeRef>) -> Self {
        Self {
            kind: EdgeKind::Notifies,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `from` listens for refresh signals originating from `to`.
    #[must_use]
    pub fn subscribes_to(from: impl Into<NodeRef>, to: impl Into<NodeRef>) -> Self {
        Self {
            kind: EdgeKind::SubscribesTo,
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.kind, self.to)
    }
}
