//! Stable rendering of the plugin configuration document.
//!
//! The document schema — section names, key names, and key order — is a
//! compatibility contract with the front-end service that reads the file at
//! process start. Key order is fixed by this schema, never by insertion
//! order, so a textual diff against a previous render is a valid
//! change-detection mechanism.

use katello_common::error::{KatelloError, Result};

use crate::params::Parameters;

/// Renders the configuration document as an ordered sequence of lines.
///
/// Booleans and integers are rendered bare, the OAuth key and secret are
/// double-quoted, URLs and paths are unquoted. Output is byte-identical for
/// identical input.
///
/// # Errors
///
/// Returns [`KatelloError::MissingRequiredField`] if the Candlepin OAuth
/// secret is still empty after resolution. A correctly layered input never
/// triggers this; it is an internal-consistency check.
pub fn render(params: &Parameters) -> Result<Vec<String>> {
    tracing::debug!("rendering plugin configuration document");
    if params.candlepin_oauth_secret.is_empty() {
        return Err(KatelloError::MissingRequiredField {
            field: "candlepin.oauth_secret",
        });
    }

    let ct = &params.content_types;
    let lines = vec![
        section(0, "katello"),
        entry(1, "rest_client_timeout", &params.rest_client_timeout.to_string()),
        section(1, "content_types"),
        entry(2, "yum", bool_lit(ct.yum)),
        entry(2, "file", bool_lit(ct.file)),
        entry(2, "deb", bool_lit(ct.deb)),
        entry(2, "puppet", bool_lit(ct.puppet)),
        entry(2, "docker", bool_lit(ct.docker)),
        entry(2, "ostree", bool_lit(ct.ostree)),
        section(1, "candlepin"),
        entry(2, "url", &params.candlepin_url),
        entry(2, "oauth_key", &quoted(&params.candlepin_oauth_key)),
        entry(2, "oauth_secret", &quoted(&params.candlepin_oauth_secret)),
        entry(2, "ca_cert_file", &params.candlepin_ca_cert),
        section(1, "candlepin_events"),
        entry(2, "ssl_cert_file", &params.candlepin_events_ssl_cert),
        entry(2, "ssl_key_file", &params.candlepin_events_ssl_key),
        entry(2, "ssl_ca_file", &params.candlepin_events_ssl_ca),
        section(1, "pulp"),
        entry(2, "url", &params.pulp_url),
        entry(2, "ca_cert_file", &params.pulp_ca_cert),
        section(1, "use_pulp_2_for_content_type"),
        entry(2, "docker", bool_lit(params.use_pulp_2_for_docker)),
        entry(2, "file", bool_lit(params.use_pulp_2_for_file)),
        section(1, "container_image_registry"),
        entry(2, "crane_url", &params.crane_url),
        entry(2, "crane_ca_cert_file", &params.crane_ca_cert),
    ];
    Ok(lines)
}

/// Renders the document as the exact bytes written to the managed file.
///
/// # Errors
///
/// Propagates [`render`] errors.
pub fn document(params: &Parameters) -> Result<String> {
    let mut text = render(params)?.join("\n");
    text.push('\n');
    Ok(text)
}

fn section(indent: usize, key: &str) -> String {
    format!("{}:{key}:", "  ".repeat(indent))
}

fn entry(indent: usize, key: &str, value: &str) -> String {
    format!("{}:{key}: {value}", "  ".repeat(indent))
}

const fn bool_lit(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}
