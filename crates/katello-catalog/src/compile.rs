//! Single-pass catalog compilation.
//!
//! Pipeline: resolve parameters, select the platform profile, render the
//! configuration document, build nodes and edges, validate the graph.
//! Compilation either fully succeeds or fully fails; a failed compilation
//! never hands a partial catalog or document to any collaborator.

use katello_common::error::Result;
use katello_common::types::Edge;
use serde::Serialize;

use crate::builder::{FeatureSet, ResourceNode, build};
use crate::external::ExternalRegistry;
use crate::graph;
use crate::params::{ParamLayer, Parameters, resolve};
use crate::platform::{PlatformFacts, PlatformProfile, select};
use crate::render;

/// One compilation request: facts, parameter layers, and feature flags.
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    /// Platform facts of the target host.
    pub facts: PlatformFacts,
    /// Base defaults layer.
    pub defaults: ParamLayer,
    /// Inherited/global override layer.
    pub inherited: ParamLayer,
    /// Per-invocation explicit overrides.
    pub explicit: ParamLayer,
    /// Selected feature flags.
    pub features: FeatureSet,
}

/// The compiled artifact: canonical parameters, nodes, edges, and the
/// rendered document. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledCatalog {
    /// Canonical parameter set after layer resolution.
    pub parameters: Parameters,
    /// Selected platform profile.
    pub profile: PlatformProfile,
    /// Built resource nodes in identity order.
    pub nodes: Vec<ResourceNode>,
    /// Typed dependency edges in construction order.
    pub edges: Vec<Edge>,
    /// Rendered configuration document, line by line.
    pub document: Vec<String>,
}

/// Compiles one catalog.
///
/// The registry must be read-only for the duration of the pass; the
/// compiler only consults it during validation.
///
/// # Errors
///
/// Propagates every stage error; see
/// [`KatelloError`](katello_common::error::KatelloError) for the kinds.
pub fn compile(request: &CompileRequest, registry: &ExternalRegistry) -> Result<CompiledCatalog> {
    tracing::info!(
        family = request.facts.os_family,
        major = request.facts.os_major,
        "compiling catalog"
    );

    let parameters = resolve(&request.defaults, &request.inherited, &request.explicit)?;
    let profile = select(&request.facts)?;
    let document_lines = render::render(&parameters)?;
    let mut document_text = document_lines.join("\n");
    document_text.push('\n');
    let (nodes, edges) = build(&parameters, &profile, &request.features, &document_text)?;
    graph::validate(&nodes, &edges, registry)?;

    Ok(CompiledCatalog {
        parameters,
        profile,
        nodes,
        edges,
        document: document_lines,
    })
}
