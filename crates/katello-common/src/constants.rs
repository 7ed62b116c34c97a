//! Fixed paths, names, and external-node identities.
//!
//! These values are part of the compatibility contract with the deployed
//! system: the rendered document path and schema are consumed by the
//! front-end service at process start, and the external identities must
//! match what the hosting environment declares.

/// Path of the rendered plugin configuration document.
pub const PLUGIN_CONFIG_PATH: &str = "/etc/foreman/plugins/katello.yaml";

/// Export directory for generated content archives.
pub const EXPORT_DIR: &str = "/var/lib/pulp/katello-export";
/// Owner of the export directory.
pub const EXPORT_DIR_OWNER: &str = "foreman";
/// Group of the export directory.
pub const EXPORT_DIR_GROUP: &str = "foreman";
/// Mode of the export directory.
pub const EXPORT_DIR_MODE: &str = "0755";

/// Pulp client certificate installed by the certificate module.
pub const PULP_CLIENT_CERT: &str = "/etc/pki/katello/certs/pulp-client.crt";
/// Pulp client private key installed by the certificate module.
pub const PULP_CLIENT_KEY: &str = "/etc/pki/katello/private/pulp-client.key";

/// Default CA certificate bundled with a fresh installation.
pub const DEFAULT_CA_CERT: &str = "/etc/pki/katello/certs/katello-default-ca.crt";
/// Server CA certificate used for Pulp and registry connections.
pub const SERVER_CA_CERT: &str = "/etc/pki/katello/certs/katello-server-ca.crt";

/// Client certificate for the Candlepin event bus.
pub const CANDLEPIN_EVENTS_SSL_CERT: &str = "/etc/pki/katello/certs/java-client.crt";
/// Client key for the Candlepin event bus.
pub const CANDLEPIN_EVENTS_SSL_KEY: &str = "/etc/pki/katello/private/java-client.key";

/// Default Candlepin API endpoint.
pub const DEFAULT_CANDLEPIN_URL: &str = "https://localhost:8443/candlepin";
/// Default OAuth key for Candlepin.
pub const DEFAULT_CANDLEPIN_OAUTH_KEY: &str = "katello";
/// Default Pulp v2 API endpoint.
pub const DEFAULT_PULP_URL: &str = "https://foo.example.com/pulp/api/v2/";
/// Default crane container-image registry endpoint.
pub const DEFAULT_CRANE_URL: &str = "https://foo.example.com:5000";

/// Default REST client timeout in seconds.
pub const DEFAULT_REST_CLIENT_TIMEOUT: i64 = 3600;

/// Name of the front-end web service.
pub const WEB_SERVICE: &str = "httpd";
/// Name of the background queue worker.
pub const WORKER_NAME: &str = "worker-hosts-queue";
/// Queue serviced by the background worker.
pub const WORKER_QUEUE: &str = "hosts_queue";
/// Name of the web-server configuration fragment.
pub const APACHE_FRAGMENT_NAME: &str = "katello";

/// External node: repository anchor.
pub const EXT_REPO_ANCHOR: &str = "Anchor[katello::repo]";
/// External node: repository definition.
pub const EXT_REPO_DEFINITION: &str = "Yumrepo[katello]";
/// External node: Candlepin anchor.
pub const EXT_CANDLEPIN_ANCHOR: &str = "Anchor[katello::candlepin]";
/// External node: Pulp anchor.
pub const EXT_PULP_ANCHOR: &str = "Anchor[katello::pulp]";
/// External node: class installing the Pulp client certificate.
pub const EXT_CLIENT_CERT_CLASS: &str = "Class[Certs::Pulp_client]";
/// External node: database seeding task.
pub const EXT_DB_SEED: &str = "Foreman::Rake[db:seed]";
/// External node: web-server certificate class.
pub const EXT_APACHE_CERT_CLASS: &str = "Class[Certs::Apache]";
/// External node: CA certificate class.
pub const EXT_CA_CERT_CLASS: &str = "Class[Certs::Ca]";
/// External node: front-end service class.
pub const EXT_SERVICE_CLASS: &str = "Class[Foreman::Service]";
