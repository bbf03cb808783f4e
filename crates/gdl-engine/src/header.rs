//! # Link Header Assembly
//!
//! Builds the HTTP `Link:` response header: the canonical-URL
//! `owl:sameAs` entry, a linkset reference for the current path, up to
//! three ancestor linkset references for less-qualified views of the same
//! identifier, and one entry per active target link.
//!
//! The header is subject to a configured byte budget. Truncation is
//! all-or-nothing: when the full candidate exceeds the budget, every
//! target entry is dropped and only the mandatory entries remain. Partial
//! truncation would hand clients a syntactically valid but silently
//! incomplete link list; an obviously minimal header is the lesser evil.

use gdl_core::{IdentifierRecord, LinkRecord, QualifierPath, ResolverConfig};

/// The identifier coordinates a resolution request is anchored at.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// Identifier scheme namespace, e.g. `gs1`.
    pub namespace: String,
    /// Canonical qualifier of the primary key, e.g. `01`.
    pub identification_key_type: String,
    /// The primary key value.
    pub identification_key: String,
    /// Secondary qualifiers.
    pub qualifier_path: QualifierPath,
    /// Requested access role, echoed into linkset references so that a
    /// client following them keeps its view.
    pub access_role: Option<String>,
}

impl ResolutionContext {
    /// Context for a stored identifier record.
    pub fn from_record(record: &IdentifierRecord, access_role: Option<String>) -> Self {
        Self {
            namespace: record.namespace.clone(),
            identification_key_type: record.identification_key_type.clone(),
            identification_key: record.identification_key.clone(),
            qualifier_path: record.qualifier_path.clone(),
            access_role,
        }
    }

    fn base_url(&self, config: &ResolverConfig) -> String {
        format!(
            "{}/{}/{}/{}",
            config.resolver_domain,
            self.namespace,
            self.identification_key_type,
            self.identification_key
        )
    }
}

/// The assembled header in both budgeted and unbudgeted forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeader {
    /// Budget-constrained text for the `Link:` response header.
    pub text: String,
    /// Every active target entry, never truncated. Stored alongside the
    /// record for diagnostic surfaces.
    pub full_text: String,
}

/// The canonical URL of the identifier this context names.
///
/// The qualifier path is appended verbatim unless it is exactly `/`.
pub fn build_canonical_url(config: &ResolverConfig, ctx: &ResolutionContext) -> String {
    let base = ctx.base_url(config);
    if ctx.qualifier_path.is_root() {
        base
    } else {
        format!("{}{}", base, ctx.qualifier_path.as_str())
    }
}

/// Linkset references for ancestor views of this identifier.
///
/// Qualifier pairs are peeled from the right, most specific ancestor
/// first, up to three references. The root ancestor carries no path
/// suffix. A root context yields no references at all.
pub fn build_ancestor_refs(config: &ResolverConfig, ctx: &ResolutionContext) -> Vec<String> {
    ctx.qualifier_path
        .ancestor_paths()
        .into_iter()
        .take(3)
        .map(|path| linkset_ref(config, ctx, &path))
        .collect()
}

/// Assemble the `Link:` header for a resolution response.
///
/// `matched_link_type` narrows the budgeted `text` to entries of one
/// relation (the matched record's); `None` is the "show everything" case.
/// `full_text` always carries every active target entry and is never
/// budgeted.
pub fn assemble_link_header(
    records: &[LinkRecord],
    ctx: &ResolutionContext,
    config: &ResolverConfig,
    matched_link_type: Option<&str>,
) -> LinkHeader {
    let mut mandatory = Vec::with_capacity(5);
    mandatory.push(format!(
        "<{}>; rel=\"owl:sameAs\"",
        build_canonical_url(config, ctx)
    ));
    let self_path = if ctx.qualifier_path.is_root() {
        String::new()
    } else {
        ctx.qualifier_path.as_str().to_string()
    };
    mandatory.push(linkset_ref(config, ctx, &self_path));
    mandatory.extend(build_ancestor_refs(config, ctx));

    let active: Vec<&LinkRecord> = records.iter().filter(|r| r.active).collect();
    let all_targets: Vec<String> = active.iter().map(|r| target_entry(r)).collect();
    let filtered_targets: Vec<String> = active
        .iter()
        .filter(|r| matched_link_type.map_or(true, |lt| r.link_type.matches(lt)))
        .map(|r| target_entry(r))
        .collect();

    let full_text = join_entries(&mandatory, &all_targets);
    let candidate = join_entries(&mandatory, &filtered_targets);

    // budget applies to UTF-8 bytes, not characters
    let text = if candidate.len() <= config.link_header_max_size {
        candidate
    } else {
        let minimal = join_entries(&mandatory, &[]);
        if minimal.len() > config.link_header_max_size {
            tracing::warn!(
                budget = config.link_header_max_size,
                size = minimal.len(),
                "mandatory link header entries alone exceed the configured budget; \
                 emitting them anyway — raise linkHeaderMaxSize"
            );
        } else {
            tracing::warn!(
                budget = config.link_header_max_size,
                size = candidate.len(),
                dropped = filtered_targets.len(),
                "link header exceeds byte budget; dropping all target entries"
            );
        }
        minimal
    };

    LinkHeader { text, full_text }
}

fn linkset_ref(config: &ResolverConfig, ctx: &ResolutionContext, path_suffix: &str) -> String {
    let mut url = format!("{}{}?linkType=all", ctx.base_url(config), path_suffix);
    if let Some(role) = ctx.access_role.as_deref().filter(|r| !r.is_empty()) {
        url.push_str("&accessRole=");
        url.push_str(role);
    }
    format!("<{url}>; rel=\"linkset\"; type=\"application/linkset+json\"")
}

fn target_entry(record: &LinkRecord) -> String {
    format!(
        "<{}>; rel=\"{}\"; type=\"{}\"; hreflang=\"{}\"; title=\"{}\"",
        record.target_url,
        record.link_type.as_str(),
        record.mime_type,
        record.iana_language,
        record.title
    )
}

fn join_entries(mandatory: &[String], targets: &[String]) -> String {
    let mut parts: Vec<&str> = mandatory.iter().map(String::as_str).collect();
    parts.extend(targets.iter().map(String::as_str));
    parts.join(", ")
}
