//! Construction of resource nodes and typed dependency edges.
//!
//! The builder declares intent only: packages to install, files and
//! directories to manage, services to wire to certificate classes, and a
//! background worker. Actual realization belongs to the hosting
//! environment. Output is deterministic for identical inputs — nodes are
//! kept in identity order and edges are emitted in a fixed construction
//! order.

use std::collections::BTreeMap;

use katello_common::constants;
use katello_common::error::Result;
use katello_common::types::{Edge, ExternalId, ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};

use crate::params::Parameters;
use crate::platform::PlatformProfile;

/// Optional feature flags selected by the caller.
///
/// Flags are independent and combine freely. The builder reserves
/// [`KatelloError::InvalidFeatureCombination`](katello_common::error::KatelloError::InvalidFeatureCombination)
/// for future mutually exclusive flags; none currently conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Repository management is included: the primary package waits for the
    /// repository anchor and definition.
    pub repo_management: bool,
    /// Direct Candlepin integration is included: the primary package waits
    /// for the Candlepin anchor.
    pub candlepin: bool,
    /// Direct Pulp integration is included: the export-directory creation
    /// waits for the Pulp anchor.
    pub pulp: bool,
}

/// Kind-specific attributes of a resource node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceAttrs {
    /// An installable package.
    Package {
        /// Desired package state.
        ensure: String,
    },
    /// A file whose content the catalog controls.
    ManagedFile {
        /// Exact file content.
        content: String,
    },
    /// A directory with managed ownership and mode.
    ManagedDirectory {
        /// Desired state, always `directory`.
        ensure: String,
        /// Owning user.
        owner: String,
        /// Owning group.
        group: String,
        /// Octal mode string.
        mode: String,
    },
    /// A system service.
    Service {
        /// Desired service state.
        ensure: String,
        /// Whether the service starts at boot.
        enable: bool,
    },
    /// A one-shot command.
    ExecAction {
        /// Command line to run.
        command: String,
        /// Search path for the command.
        path: Vec<String>,
        /// Skip the command when this path already exists.
        creates: Option<String>,
    },
    /// A key/value entry in the front-end settings store.
    ConfigEntry {
        /// Stored value.
        value: String,
    },
    /// A web-server configuration fragment.
    ApacheFragment {
        /// Plain-HTTP fragment content, if any.
        content: Option<String>,
        /// TLS virtual-host fragment content.
        ssl_content: String,
    },
    /// A named background queue worker.
    WorkerDeclaration {
        /// Queues serviced by the worker.
        queues: Vec<String>,
    },
}

/// One declarative resource: identity plus attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Unique identity.
    pub id: ResourceId,
    /// Kind-specific attributes.
    pub attrs: ResourceAttrs,
}

impl ResourceNode {
    fn new(kind: ResourceKind, name: impl Into<String>, attrs: ResourceAttrs) -> Self {
        Self {
            id: ResourceId::new(kind, name),
            attrs,
        }
    }
}

/// TLS virtual-host fragment guarding the subscription and API endpoints.
fn apache_ssl_fragment() -> String {
    [
        "<LocationMatch /rhsm|/katello/api>",
        "  SSLOptions +StdEnvVars +ExportCertData",
        "</LocationMatch>",
        "",
    ]
    .join("\n")
}

/// Builds the resource node set and dependency edges.
///
/// Always declares the primary and database-version packages, the export
/// directory and its creating exec, the two Pulp client settings entries,
/// the rendered configuration file, the web-server fragment, the front-end
/// service, and the background worker. `document` is the exact rendered
/// configuration content placed in the managed file.
///
/// # Errors
///
/// Returns [`KatelloError::InvalidFeatureCombination`](katello_common::error::KatelloError::InvalidFeatureCombination)
/// if mutually exclusive feature flags are set. No current flags conflict,
/// so the builder never fails for valid inputs.
pub fn build(
    params: &Parameters,
    profile: &PlatformProfile,
    features: &FeatureSet,
    document: &str,
) -> Result<(Vec<ResourceNode>, Vec<Edge>)> {
    tracing::debug!(
        package = profile.katello_package,
        repo_management = features.repo_management,
        candlepin = features.candlepin,
        pulp = features.pulp,
        "building resource catalog"
    );

    let package_id = ResourceId::new(ResourceKind::Package, &profile.katello_package);
    let mkdir_command = format!("mkdir -p {}", constants::EXPORT_DIR);
    let exec_id = ResourceId::new(ResourceKind::ExecAction, &mkdir_command);
    let export_dir_id = ResourceId::new(ResourceKind::ManagedDirectory, constants::EXPORT_DIR);
    let config_file_id = ResourceId::new(ResourceKind::ManagedFile, constants::PLUGIN_CONFIG_PATH);
    let cert_entry_id = ResourceId::new(ResourceKind::ConfigEntry, "pulp_client_cert");
    let key_entry_id = ResourceId::new(ResourceKind::ConfigEntry, "pulp_client_key");
    let service_id = ResourceId::new(ResourceKind::Service, constants::WEB_SERVICE);

    let mut nodes = BTreeMap::new();
    for node in [
        ResourceNode::new(
            ResourceKind::Package,
            &profile.katello_package,
            ResourceAttrs::Package {
                ensure: "installed".into(),
            },
        ),
        ResourceNode::new(
            ResourceKind::Package,
            &profile.postgresql_evr_package,
            ResourceAttrs::Package {
                ensure: "installed".into(),
            },
        ),
        ResourceNode::new(
            ResourceKind::ManagedDirectory,
            constants::EXPORT_DIR,
            ResourceAttrs::ManagedDirectory {
                ensure: "directory".into(),
                owner: constants::EXPORT_DIR_OWNER.into(),
                group: constants::EXPORT_DIR_GROUP.into(),
                mode: constants::EXPORT_DIR_MODE.into(),
            },
        ),
        ResourceNode::new(
            ResourceKind::ExecAction,
            &mkdir_command,
            ResourceAttrs::ExecAction {
                command: mkdir_command.clone(),
                path: vec!["/bin".into(), "/usr/bin".into()],
                creates: Some(constants::EXPORT_DIR.into()),
            },
        ),
        ResourceNode::new(
            ResourceKind::ConfigEntry,
            "pulp_client_cert",
            ResourceAttrs::ConfigEntry {
                value: params.pulp_client_cert.clone(),
            },
        ),
        ResourceNode::new(
            ResourceKind::ConfigEntry,
            "pulp_client_key",
            ResourceAttrs::ConfigEntry {
                value: params.pulp_client_key.clone(),
            },
        ),
        ResourceNode::new(
            ResourceKind::ManagedFile,
            constants::PLUGIN_CONFIG_PATH,
            ResourceAttrs::ManagedFile {
                content: document.into(),
            },
        ),
        ResourceNode::new(
            ResourceKind::ApacheFragment,
            constants::APACHE_FRAGMENT_NAME,
            ResourceAttrs::ApacheFragment {
                content: None,
                ssl_content: apache_ssl_fragment(),
            },
        ),
        ResourceNode::new(
            ResourceKind::Service,
            constants::WEB_SERVICE,
            ResourceAttrs::Service {
                ensure: "running".into(),
                enable: true,
            },
        ),
        ResourceNode::new(
            ResourceKind::WorkerDeclaration,
            constants::WORKER_NAME,
            ResourceAttrs::WorkerDeclaration {
                queues: vec![constants::WORKER_QUEUE.into()],
            },
        ),
    ] {
        let _ = nodes.insert(node.id.clone(), node);
    }

    let mut edges = Vec::new();

    // Fixed structural edges.
    edges.push(Edge::requires(export_dir_id, exec_id.clone()));
    for entry in [cert_entry_id, key_entry_id] {
        edges.push(Edge::requires(
            entry.clone(),
            ExternalId::new(constants::EXT_CLIENT_CERT_CLASS),
        ));
        edges.push(Edge::requires(
            entry,
            ExternalId::new(constants::EXT_DB_SEED),
        ));
    }
    edges.push(Edge::notifies(
        config_file_id.clone(),
        ExternalId::new(constants::EXT_SERVICE_CLASS),
    ));
    edges.push(Edge::before(
        config_file_id,
        ExternalId::new(constants::EXT_DB_SEED),
    ));
    edges.push(Edge::subscribes_to(
        service_id.clone(),
        ExternalId::new(constants::EXT_APACHE_CERT_CLASS),
    ));
    edges.push(Edge::subscribes_to(
        service_id,
        ExternalId::new(constants::EXT_CA_CERT_CLASS),
    ));

    // Feature-conditional edges.
    if features.repo_management {
        edges.push(Edge::requires(
            package_id.clone(),
            ExternalId::new(constants::EXT_REPO_ANCHOR),
        ));
        edges.push(Edge::requires(
            package_id.clone(),
            ExternalId::new(constants::EXT_REPO_DEFINITION),
        ));
    }
    if features.candlepin {
        edges.push(Edge::requires(
            package_id,
            ExternalId::new(constants::EXT_CANDLEPIN_ANCHOR),
        ));
    }
    if features.pulp {
        edges.push(Edge::requires(
            exec_id,
            ExternalId::new(constants::EXT_PULP_ANCHOR),
        ));
    }

    Ok((nodes.into_values().collect(), edges))
}

#[cfg(test)]
mod tests {
    use katello_common::types::{EdgeKind, NodeRef};

    use super::*;
    use crate::params::{ParamLayer, resolve};
    use crate::platform::{PlatformFacts, select};
    use crate::render;

    fn fixture(features: FeatureSet) -> (Vec<ResourceNode>, Vec<Edge>) {
        let mut defaults = ParamLayer::new();
        defaults.set_str("candlepin_oauth_secret", "candlepin-secret");
        let params =
            resolve(&defaults, &ParamLayer::new(), &ParamLayer::new()).expect("should resolve");
        let profile = select(&PlatformFacts::new("RedHat", "8")).expect("should select");
        let document = render::document(&params).expect("should render");
        build(&params, &profile, &features, &document).expect("should build")
    }

    fn has_edge(edges: &[Edge], kind: EdgeKind, from: &str, to: &str) -> bool {
        edges
            .iter()
            .any(|e| e.kind == kind && e.from.to_string() == from && e.to.to_string() == to)
    }

    #[test]
    fn declares_all_standard_nodes() {
        let (nodes, _) = fixture(FeatureSet::default());
        let ids: Vec<String> = nodes.iter().map(|n| n.id.to_string()).collect();
        for expected in [
            "Package[rubygem-katello]",
            "Package[postgresql-evr]",
            "ManagedDirectory[/var/lib/pulp/katello-export]",
            "Exec[mkdir -p /var/lib/pulp/katello-export]",
            "ConfigEntry[pulp_client_cert]",
            "ConfigEntry[pulp_client_key]",
            "ManagedFile[/etc/foreman/plugins/katello.yaml]",
            "ApacheFragment[katello]",
            "Service[httpd]",
            "Worker[worker-hosts-queue]",
        ] {
            assert!(ids.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(nodes.len(), 10);
    }

    #[test]
    fn export_directory_has_fixed_ownership_and_mode() {
        let (nodes, edges) = fixture(FeatureSet::default());
        let dir = nodes
            .iter()
            .find(|n| n.id.kind == ResourceKind::ManagedDirectory)
            .expect("directory node");
        assert_eq!(
            dir.attrs,
            ResourceAttrs::ManagedDirectory {
                ensure: "directory".into(),
                owner: "foreman".into(),
                group: "foreman".into(),
                mode: "0755".into(),
            }
        );
        assert!(has_edge(
            &edges,
            EdgeKind::Requires,
            "ManagedDirectory[/var/lib/pulp/katello-export]",
            "Exec[mkdir -p /var/lib/pulp/katello-export]",
        ));
    }

    #[test]
    fn config_entries_wait_for_certs_and_seeded_database() {
        let (nodes, edges) = fixture(FeatureSet::default());
        for (name, value) in [
            ("pulp_client_cert", "/etc/pki/katello/certs/pulp-client.crt"),
            ("pulp_client_key", "/etc/pki/katello/private/pulp-client.key"),
        ] {
            let node = nodes
                .iter()
                .find(|n| n.id == ResourceId::new(ResourceKind::ConfigEntry, name))
                .expect("config entry");
            assert_eq!(
                node.attrs,
                ResourceAttrs::ConfigEntry {
                    value: value.into()
                }
            );
            let id = format!("ConfigEntry[{name}]");
            assert!(has_edge(&edges, EdgeKind::Requires, &id, "Class[Certs::Pulp_client]"));
            assert!(has_edge(&edges, EdgeKind::Requires, &id, "Foreman::Rake[db:seed]"));
        }
    }

    #[test]
    fn config_file_notifies_service_class_and_precedes_seeding() {
        for features in [
            FeatureSet::default(),
            FeatureSet {
                repo_management: true,
                candlepin: true,
                pulp: true,
            },
        ] {
            let (_, edges) = fixture(features);
            assert!(has_edge(
                &edges,
                EdgeKind::Notifies,
                "ManagedFile[/etc/foreman/plugins/katello.yaml]",
                "Class[Foreman::Service]",
            ));
            assert!(has_edge(
                &edges,
                EdgeKind::Before,
                "ManagedFile[/etc/foreman/plugins/katello.yaml]",
                "Foreman::Rake[db:seed]",
            ));
        }
    }

    #[test]
    fn service_subscribes_to_certificate_classes() {
        let (_, edges) = fixture(FeatureSet::default());
        assert!(has_edge(
            &edges,
            EdgeKind::SubscribesTo,
            "Service[httpd]",
            "Class[Certs::Apache]",
        ));
        assert!(has_edge(
            &edges,
            EdgeKind::SubscribesTo,
            "Service[httpd]",
            "Class[Certs::Ca]",
        ));
    }

    #[test]
    fn no_features_means_no_external_package_requirements() {
        let (_, edges) = fixture(FeatureSet::default());
        let package_requires: Vec<_> = edges
            .iter()
            .filter(|e| {
                e.kind == EdgeKind::Requires
                    && matches!(&e.from, NodeRef::Resource(id) if id.kind == ResourceKind::Package)
            })
            .collect();
        assert!(package_requires.is_empty(), "got: {package_requires:?}");
    }

    #[test]
    fn repo_management_adds_anchor_and_definition_requirements() {
        let (_, edges) = fixture(FeatureSet {
            repo_management: true,
            ..FeatureSet::default()
        });
        assert!(has_edge(
            &edges,
            EdgeKind::Requires,
            "Package[rubygem-katello]",
            "Anchor[katello::repo]",
        ));
        assert!(has_edge(
            &edges,
            EdgeKind::Requires,
            "Package[rubygem-katello]",
            "Yumrepo[katello]",
        ));
    }

    #[test]
    fn candlepin_feature_is_independent_of_repo_management() {
        let (_, edges) = fixture(FeatureSet {
            candlepin: true,
            ..FeatureSet::default()
        });
        assert!(has_edge(
            &edges,
            EdgeKind::Requires,
            "Package[rubygem-katello]",
            "Anchor[katello::candlepin]",
        ));
        assert!(!has_edge(
            &edges,
            EdgeKind::Requires,
            "Package[rubygem-katello]",
            "Anchor[katello::repo]",
        ));

        let (_, combined) = fixture(FeatureSet {
            repo_management: true,
            candlepin: true,
            pulp: false,
        });
        assert!(has_edge(
            &combined,
            EdgeKind::Requires,
            "Package[rubygem-katello]",
            "Anchor[katello::candlepin]",
        ));
        assert!(has_edge(
            &combined,
            EdgeKind::Requires,
            "Package[rubygem-katello]",
            "Anchor[katello::repo]",
        ));
    }

    #[test]
    fn pulp_feature_gates_the_export_directory_creation() {
        let (_, without) = fixture(FeatureSet::default());
        assert!(!has_edge(
            &without,
            EdgeKind::Requires,
            "Exec[mkdir -p /var/lib/pulp/katello-export]",
            "Anchor[katello::pulp]",
        ));

        let (_, with) = fixture(FeatureSet {
            pulp: true,
            ..FeatureSet::default()
        });
        assert!(has_edge(
            &with,
            EdgeKind::Requires,
            "Exec[mkdir -p /var/lib/pulp/katello-export]",
            "Anchor[katello::pulp]",
        ));
    }

    #[test]
    fn legacy_platform_declares_namespaced_packages() {
        let mut defaults = ParamLayer::new();
        defaults.set_str("candlepin_oauth_secret", "candlepin-secret");
        let params =
            resolve(&defaults, &ParamLayer::new(), &ParamLayer::new()).expect("should resolve");
        let profile = select(&PlatformFacts::new("RedHat", "7")).expect("should select");
        let document = render::document(&params).expect("should render");
        let (nodes, _) = build(&params, &profile, &FeatureSet::default(), &document)
            .expect("should build");

        let ids: Vec<String> = nodes.iter().map(|n| n.id.to_string()).collect();
        assert!(ids.contains(&"Package[tfm-rubygem-katello]".to_string()));
        assert!(ids.contains(&"Package[rh-postgresql12-postgresql-evr]".to_string()));
    }

    #[test]
    fn managed_file_carries_rendered_document() {
        let (nodes, _) = fixture(FeatureSet::default());
        let file = nodes
            .iter()
            .find(|n| n.id.kind == ResourceKind::ManagedFile)
            .expect("file node");
        let ResourceAttrs::ManagedFile { content } = &file.attrs else {
            panic!("wrong attrs: {:?}", file.attrs);
        };
        assert!(content.starts_with(":katello:\n"));
        assert!(content.contains("  :rest_client_timeout: 3600\n"));
    }

    #[test]
    fn apache_fragment_has_ssl_content_only() {
        let (nodes, _) = fixture(FeatureSet::default());
        let fragment = nodes
            .iter()
            .find(|n| n.id.kind == ResourceKind::ApacheFragment)
            .expect("fragment node");
        let ResourceAttrs::ApacheFragment {
            content,
            ssl_content,
        } = &fragment.attrs
        else {
            panic!("wrong attrs: {:?}", fragment.attrs);
        };
        assert!(content.is_none());
        assert!(
            ssl_content
                .lines()
                .any(|l| l == "<LocationMatch /rhsm|/katello/api>")
        );
    }

    #[test]
    fn worker_services_the_hosts_queue() {
        let (nodes, _) = fixture(FeatureSet::default());
        let worker = nodes
            .iter()
            .find(|n| n.id.kind == ResourceKind::WorkerDeclaration)
            .expect("worker node");
        assert_eq!(
            worker.attrs,
            ResourceAttrs::WorkerDeclaration {
                queues: vec!["hosts_queue".into()]
            }
        );
    }

    #[test]
    fn build_is_deterministic() {
        let features = FeatureSet {
            repo_management: true,
            candlepin: true,
            pulp: true,
        };
        let first = fixture(features);
        let second = fixture(features);
        assert_eq!(first, second);
    }
}
