//! Mapping of platform facts to package-name profiles.
//!
//! The selection is a total, side-effect-free lookup over the two supplied
//! facts. The legacy major release ships the module inside a software
//! collection, so both package names carry the collection's namespace
//! prefix; later releases use plain names.

use katello_common::error::{KatelloError, Result};
use serde::{Deserialize, Serialize};

/// Platform facts supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFacts {
    /// Operating system family, e.g. `RedHat`.
    pub os_family: String,
    /// Major release, e.g. `7`.
    pub os_major: String,
}

impl PlatformFacts {
    /// Creates platform facts.
    #[must_use]
    pub fn new(os_family: impl Into<String>, os_major: impl Into<String>) -> Self {
        Self {
            os_family: os_family.into(),
            os_major: os_major.into(),
        }
    }
}

impl Default for PlatformFacts {
    /// The newest supported release.
    fn default() -> Self {
        Self::new("RedHat", "8")
    }
}

/// Platform-specific package names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Name of the primary module package.
    pub katello_package: String,
    /// Name of the database-version (EVR) pseudo-package.
    pub postgresql_evr_package: String,
}

/// Selects the package-name profile for the given facts.
///
/// # Errors
///
/// Returns [`KatelloError::UnsupportedPlatform`] when no profile matches.
pub fn select(facts: &PlatformFacts) -> Result<PlatformProfile> {
    tracing::debug!(
        family = facts.os_family,
        major = facts.os_major,
        "selecting platform profile"
    );
    match (facts.os_family.as_str(), facts.os_major.as_str()) {
        ("RedHat", "7") => Ok(PlatformProfile {
            katello_package: "tfm-rubygem-katello".into(),
            postgresql_evr_package: "rh-postgresql12-postgresql-evr".into(),
        }),
        ("RedHat", "8") => Ok(PlatformProfile {
            katello_package: "rubygem-katello".into(),
            postgresql_evr_package: "postgresql-evr".into(),
        }),
        _ => Err(KatelloError::UnsupportedPlatform {
            family: facts.os_family.clone(),
            major: facts.os_major.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_release_selects_namespaced_packages() {
        let profile = select(&PlatformFacts::new("RedHat", "7")).expect("should select");
        assert_eq!(profile.katello_package, "tfm-rubygem-katello");
        assert_eq!(profile.postgresql_evr_package, "rh-postgresql12-postgresql-evr");
    }

    #[test]
    fn modern_release_selects_plain_packages() {
        let profile = select(&PlatformFacts::new("RedHat", "8")).expect("should select");
        assert_eq!(profile.katello_package, "rubygem-katello");
        assert_eq!(profile.postgresql_evr_package, "postgresql-evr");
    }

    #[test]
    fn profiles_differ_only_in_namespace_prefix() {
        let legacy = select(&PlatformFacts::new("RedHat", "7")).expect("legacy");
        let modern = select(&PlatformFacts::new("RedHat", "8")).expect("modern");
        assert!(legacy.katello_package.ends_with(&modern.katello_package));
        assert!(
            legacy
                .postgresql_evr_package
                .ends_with(&modern.postgresql_evr_package)
        );
        assert_ne!(legacy, modern);
    }

    #[test]
    fn unknown_family_is_unsupported() {
        let err = select(&PlatformFacts::new("Debian", "11")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Debian"), "got: {msg}");
    }

    #[test]
    fn unknown_major_release_is_unsupported() {
        let err = select(&PlatformFacts::new("RedHat", "6")).unwrap_err();
        assert!(matches!(err, KatelloError::UnsupportedPlatform { .. }));
    }
}
