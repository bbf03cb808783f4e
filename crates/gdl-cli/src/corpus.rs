//! # Corpus and Configuration Loading
//!
//! Reads identifier-record corpora and resolver configuration from JSON
//! or YAML files, picked by extension. A corpus file holds a list of
//! identifier records exactly as the data model serializes them.

use std::fs;
use std::path::Path;

use anyhow::Context;

use gdl_core::{config::ResolverConfigFile, IdentifierRecord, ResolverConfig};

/// Load a record corpus from a JSON or YAML file.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<IdentifierRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading corpus file {}", path.display()))?;
    let records = if is_yaml(path) {
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing YAML corpus {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON corpus {}", path.display()))?
    };
    Ok(records)
}

/// Load and validate resolver configuration.
///
/// `--resolver-domain` overrides the file value; without a file the
/// domain flag alone builds a default configuration.
pub fn load_config(
    path: Option<&Path>,
    resolver_domain: Option<String>,
) -> anyhow::Result<ResolverConfig> {
    let mut file = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            if is_yaml(path) {
                serde_yaml::from_str::<ResolverConfigFile>(&text)
                    .with_context(|| format!("parsing YAML config {}", path.display()))?
            } else {
                serde_json::from_str::<ResolverConfigFile>(&text)
                    .with_context(|| format!("parsing JSON config {}", path.display()))?
            }
        }
        None => ResolverConfigFile::default(),
    };
    if resolver_domain.is_some() {
        file.resolver_domain = resolver_domain;
    }
    Ok(file.validate()?)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
