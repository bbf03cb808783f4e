//! # Resolver Configuration
//!
//! Validated configuration for the resolution engine. The resolver domain
//! has no default — a resolver that does not know its own public URL
//! cannot mint canonical identifier URLs. The link-header byte budget is
//! string-validated (digits only) before parsing, so `"8192.5"`, `"-1"`,
//! and `"8k"` are all rejected at startup rather than truncating headers
//! surprisingly at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default byte budget for the `Link:` response header.
pub const DEFAULT_LINK_HEADER_MAX_SIZE: usize = 8192;

/// Default vocabulary domain used to mint extension-relation URIs from
/// namespaced link-type tokens.
pub const DEFAULT_LINK_TYPE_VOC_DOMAIN: &str = "https://gs1.org/voc";

/// Validated resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Public base URL of this resolver, no trailing slash expected.
    pub resolver_domain: String,
    /// Base URI for extension-relation keys in linkset documents.
    pub link_type_voc_domain: String,
    /// Byte budget for the `Link:` header.
    pub link_header_max_size: usize,
}

impl ResolverConfig {
    /// Build a configuration with the default header budget and
    /// vocabulary domain.
    ///
    /// # Errors
    ///
    /// Rejects an empty resolver domain.
    pub fn new(resolver_domain: impl Into<String>) -> Result<Self, ConfigError> {
        let resolver_domain = resolver_domain.into();
        if resolver_domain.trim().is_empty() {
            return Err(ConfigError::MissingResolverDomain);
        }
        Ok(Self {
            resolver_domain,
            link_type_voc_domain: DEFAULT_LINK_TYPE_VOC_DOMAIN.to_string(),
            link_header_max_size: DEFAULT_LINK_HEADER_MAX_SIZE,
        })
    }

    /// Override the vocabulary domain.
    pub fn with_link_type_voc_domain(mut self, domain: impl Into<String>) -> Self {
        self.link_type_voc_domain = domain.into();
        self
    }

    /// Override the header budget from its raw string form.
    ///
    /// # Errors
    ///
    /// Fails when the string is not a plain positive integer.
    pub fn with_link_header_max_size(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.link_header_max_size = parse_header_budget(raw)?;
        Ok(self)
    }
}

/// Validate and parse the header byte budget.
///
/// Accepts ASCII digits only: no sign, no decimal point, no units. The
/// parsed value must be greater than zero.
pub fn parse_header_budget(raw: &str) -> Result<usize, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::HeaderBudgetNotNumeric(raw.to_string()));
    }
    let value: usize = trimmed
        .parse()
        .map_err(|_| ConfigError::HeaderBudgetNotNumeric(raw.to_string()))?;
    if value == 0 {
        return Err(ConfigError::HeaderBudgetNotPositive(raw.to_string()));
    }
    Ok(value)
}

/// Unvalidated configuration as read from a file or environment.
///
/// All fields optional except the resolver domain, which has no default.
/// [`ResolverConfigFile::validate`] produces the checked form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfigFile {
    #[serde(default)]
    pub resolver_domain: Option<String>,
    #[serde(default)]
    pub link_type_voc_domain: Option<String>,
    /// Kept as a string so that decimals and signs are rejected instead
    /// of being coerced.
    #[serde(default)]
    pub link_header_max_size: Option<String>,
}

impl ResolverConfigFile {
    /// Validate into a [`ResolverConfig`].
    ///
    /// # Errors
    ///
    /// Fails on a missing resolver domain or a malformed header budget.
    pub fn validate(self) -> Result<ResolverConfig, ConfigError> {
        let mut config = ResolverConfig::new(
            self.resolver_domain
                .ok_or(ConfigError::MissingResolverDomain)?,
        )?;
        if let Some(domain) = self.link_type_voc_domain {
            config = config.with_link_type_voc_domain(domain);
        }
        if let Some(raw) = self.link_header_max_size {
            config = config.with_link_header_max_size(&raw)?;
        }
        Ok(config)
    }
}
