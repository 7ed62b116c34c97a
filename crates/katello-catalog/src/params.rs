//! Layered parameter resolution.
//!
//! Three override layers feed one canonical [`Parameters`] value:
//! a base defaults layer, an inherited/global layer, and per-invocation
//! explicit overrides. Later layers win per key; the resolution order is
//! strict: explicit > inherited > defaults > built-in.

use std::collections::BTreeMap;

use katello_common::constants;
use katello_common::error::{KatelloError, Result};
use serde::{Deserialize, Serialize};

/// A typed parameter value supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// A string, URL, or filesystem path.
    Str(String),
    /// A boolean toggle.
    Bool(bool),
    /// An integer setting.
    Int(i64),
}

impl ParamValue {
    /// Returns the value's type name for error reporting.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
        }
    }
}

/// One override layer: an ordered map from option name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamLayer {
    values: BTreeMap<String, ParamValue>,
}

impl ParamLayer {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string-valued option.
    pub fn set_str(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let _ = self
            .values
            .insert(name.into(), ParamValue::Str(value.into()));
    }

    /// Sets a boolean-valued option.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        let _ = self.values.insert(name.into(), ParamValue::Bool(value));
    }

    /// Sets an integer-valued option.
    pub fn set_int(&mut self, name: impl Into<String>, value: i64) {
        let _ = self.values.insert(name.into(), ParamValue::Int(value));
    }

    /// Iterates over the layer's entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the layer sets no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-content-type toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypes {
    /// Yum/RPM content.
    pub yum: bool,
    /// Flat-file content.
    pub file: bool,
    /// Debian package content.
    pub deb: bool,
    /// Puppet module content.
    pub puppet: bool,
    /// Container image content.
    pub docker: bool,
    /// OSTree content.
    pub ostree: bool,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self {
            yum: true,
            file: true,
            deb: true,
            puppet: true,
            docker: true,
            ostree: false,
        }
    }
}

/// The canonical, fully resolved parameter set.
///
/// Every field except [`candlepin_oauth_secret`](Self::candlepin_oauth_secret)
/// has a built-in default; the secret has no safe default and must be
/// supplied by one of the layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// REST client timeout in seconds.
    pub rest_client_timeout: i64,
    /// Enabled content types.
    pub content_types: ContentTypes,
    /// Serve container image content through Pulp 2.
    pub use_pulp_2_for_docker: bool,
    /// Serve flat-file content through Pulp 2.
    pub use_pulp_2_for_file: bool,
    /// Candlepin API endpoint.
    pub candlepin_url: String,
    /// OAuth key for Candlepin.
    pub candlepin_oauth_key: String,
    /// OAuth secret for Candlepin. Empty until a layer supplies it.
    pub candlepin_oauth_secret: String,
    /// CA certificate for Candlepin connections.
    pub candlepin_ca_cert: String,
    /// Client certificate for the Candlepin event bus.
    pub candlepin_events_ssl_cert: String,
    /// Client key for the Candlepin event bus.
    pub candlepin_events_ssl_key: String,
    /// CA certificate for the Candlepin event bus.
    pub candlepin_events_ssl_ca: String,
    /// Pulp v2 API endpoint.
    pub pulp_url: String,
    /// CA certificate for Pulp connections.
    pub pulp_ca_cert: String,
    /// Crane container-image registry endpoint.
    pub crane_url: String,
    /// CA certificate for crane registry connections.
    pub crane_ca_cert: String,
    /// Pulp client certificate path placed in the settings store.
    pub pulp_client_cert: String,
    /// Pulp client key path placed in the settings store.
    pub pulp_client_key: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            rest_client_timeout: constants::DEFAULT_REST_CLIENT_TIMEOUT,
            content_types: ContentTypes::default(),
            use_pulp_2_for_docker: false,
            use_pulp_2_for_file: false,
            candlepin_url: constants::DEFAULT_CANDLEPIN_URL.into(),
            candlepin_oauth_key: constants::DEFAULT_CANDLEPIN_OAUTH_KEY.into(),
            candlepin_oauth_secret: String::new(),
            candlepin_ca_cert: constants::DEFAULT_CA_CERT.into(),
            candlepin_events_ssl_cert: constants::CANDLEPIN_EVENTS_SSL_CERT.into(),
            candlepin_events_ssl_key: constants::CANDLEPIN_EVENTS_SSL_KEY.into(),
            candlepin_events_ssl_ca: constants::DEFAULT_CA_CERT.into(),
            pulp_url: constants::DEFAULT_PULP_URL.into(),
            pulp_ca_cert: constants::SERVER_CA_CERT.into(),
            crane_url: constants::DEFAULT_CRANE_URL.into(),
            crane_ca_cert: constants::SERVER_CA_CERT.into(),
            pulp_client_cert: constants::PULP_CLIENT_CERT.into(),
            pulp_client_key: constants::PULP_CLIENT_KEY.into(),
        }
    }
}

/// Resolves the three override layers into one canonical parameter set.
///
/// Layers are applied onto the built-in defaults in order: `defaults`, then
/// `inherited`, then `explicit`. Override is per key, not per group —
/// flipping one content-type toggle leaves its siblings untouched.
///
/// # Errors
///
/// Returns [`KatelloError::UnknownParameter`] for an unrecognized option
/// name and [`KatelloError::ParameterType`] for a value of the wrong type.
pub fn resolve(
    defaults: &ParamLayer,
    inherited: &ParamLayer,
    explicit: &ParamLayer,
) -> Result<Parameters> {
    tracing::debug!(
        defaults = defaults.values.len(),
        inherited = inherited.values.len(),
        explicit = explicit.values.len(),
        "resolving parameter layers"
    );
    let mut params = Parameters::default();
    for layer in [defaults, inherited, explicit] {
        for (name, value) in layer.iter() {
            params.apply(name, value)?;
        }
    }
    Ok(params)
}

impl Parameters {
    fn apply(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        match name {
            "rest_client_timeout" => self.rest_client_timeout = expect_int(name, value)?,
            "enable_yum" => self.content_types.yum = expect_bool(name, value)?,
            "enable_file" => self.content_types.file = expect_bool(name, value)?,
            "enable_deb" => self.content_types.deb = expect_bool(name, value)?,
            "enable_puppet" => self.content_types.puppet = expect_bool(name, value)?,
            "enable_docker" => self.content_types.docker = expect_bool(name, value)?,
            "enable_ostree" => self.content_types.ostree = expect_bool(name, value)?,
            "use_pulp_2_for_docker" => self.use_pulp_2_for_docker = expect_bool(name, value)?,
            "use_pulp_2_for_file" => self.use_pulp_2_for_file = expect_bool(name, value)?,
            "candlepin_url" => self.candlepin_url = expect_str(name, value)?,
            "candlepin_oauth_key" => self.candlepin_oauth_key = expect_str(name, value)?,
            "candlepin_oauth_secret" => self.candlepin_oauth_secret = expect_str(name, value)?,
            "candlepin_ca_cert" => self.candlepin_ca_cert = expect_str(name, value)?,
            "candlepin_events_ssl_cert" => {
                self.candlepin_events_ssl_cert = expect_str(name, value)?;
            }
            "candlepin_events_ssl_key" => {
                self.candlepin_events_ssl_key = expect_str(name, value)?;
            }
            "candlepin_events_ssl_ca" => self.candlepin_events_ssl_ca = expect_str(name, value)?,
            "pulp_url" => self.pulp_url = expect_str(name, value)?,
            "pulp_ca_cert" => self.pulp_ca_cert = expect_str(name, value)?,
            "crane_url" => self.crane_url = expect_str(name, value)?,
            "crane_ca_cert" => self.crane_ca_cert = expect_str(name, value)?,
            "pulp_client_cert" => self.pulp_client_cert = expect_str(name, value)?,
            "pulp_client_key" => self.pulp_client_key = expect_str(name, value)?,
            _ => {
                return Err(KatelloError::UnknownParameter { name: name.into() });
            }
        }
        Ok(())
    }
}

fn expect_int(name: &str, value: &ParamValue) -> Result<i64> {
    match value {
        ParamValue::Int(i) => Ok(*i),
        other => Err(KatelloError::ParameterType {
            name: name.into(),
            expected: "integer",
            actual: other.kind(),
        }),
    }
}

fn expect_bool(name: &str, value: &ParamValue) -> Result<bool> {
    match value {
        ParamValue::Bool(b) => Ok(*b),
        other => Err(KatelloError::ParameterType {
            name: name.into(),
            expected: "boolean",
            actual: other.kind(),
        }),
    }
}

fn expect_str(name: &str, value: &ParamValue) -> Result<String> {
    match value {
        ParamValue::Str(s) => Ok(s.clone()),
        other => Err(KatelloError::ParameterType {
            name: name.into(),
            expected: "string",
            actual: other.kind(),
        }),
    }
}
