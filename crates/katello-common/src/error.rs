//! Unified error types for the Katello catalog workspace.
//!
//! Every compilation stage fails wholesale with one of these variants.
//! There is no partial catalog: a returned error means no nodes, no edges,
//! and no rendered document were handed to any collaborator.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum KatelloError {
    /// The caller supplied an option name outside the recognized set.
    #[error("unknown parameter: \"{name}\"")]
    UnknownParameter {
        /// The unrecognized option name.
        name: String,
    },

    /// A supplied value does not match the parameter's declared type.
    #[error("parameter \"{name}\" expects a {expected} value, got {actual}")]
    ParameterType {
        /// The parameter name.
        name: String,
        /// The declared value type.
        expected: &'static str,
        /// The supplied value type.
        actual: &'static str,
    },

    /// No platform profile matches the supplied facts.
    #[error("unsupported platform: family \"{family}\", major release \"{major}\"")]
    UnsupportedPlatform {
        /// Operating system family fact.
        family: String,
        /// Major release fact.
        major: String,
    },

    /// Mutually exclusive feature flags were combined.
    ///
    /// No current flags conflict; the variant is reserved for future flags.
    #[error("invalid feature combination: {message}")]
    InvalidFeatureCombination {
        /// Description of the conflicting flags.
        message: String,
    },

    /// An edge endpoint names a node that is neither built by the compiler
    /// nor declared in the external-node registry.
    #[error("edge \"{edge}\" references undeclared node {node}")]
    DanglingReference {
        /// Human-readable description of the offending edge.
        edge: String,
        /// Identity of the undeclared endpoint.
        node: String,
    },

    /// The ordering relation over Requires/Before edges contains a cycle.
    #[error("dependency cycle detected: {}", path.join(" -> "))]
    CycleDetected {
        /// Node identities along the cycle, first node repeated at the end.
        path: Vec<String>,
    },

    /// The canonical parameter set lacks a value the document schema requires.
    #[error("required field missing from canonical parameters: {field}")]
    MissingRequiredField {
        /// Schema path of the missing field.
        field: &'static str,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, KatelloError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_joins_path_with_arrows() {
        let err = KatelloError::CycleDetected {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "dependency cycle detected: a -> b -> a");
    }

    #[test]
    fn unknown_parameter_message_quotes_name() {
        let err = KatelloError::UnknownParameter {
            name: "enable_flatpak".into(),
        };
        assert!(err.to_string().contains("\"enable_flatpak\""));
    }
}
