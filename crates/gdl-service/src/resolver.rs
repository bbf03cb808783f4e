//! # Resolution Orchestration
//!
//! Fetch, filter, match, render. The resolver owns the validated
//! configuration and a handle to the record store; each call works on its
//! own snapshot of the fetched record, so there is no shared mutable
//! state between requests.
//!
//! A fetched document that still carries a materialised linkset from an
//! older writer is stripped opportunistically: the field is dropped from
//! the snapshot and a detached save races the response. The response is
//! always built from the snapshot as read, never from the cleanup
//! write's outcome.

use std::sync::Arc;

use gdl_core::{LinkRecord, ResolverConfig};
use gdl_engine::{
    assemble_link_header, build_link_set_from, filter_by_access_role, select_record,
    LinkSet, ResolutionContext,
};

use crate::error::ResolveError;
use crate::request::{ResolutionRequest, ResolvedLink};
use crate::store::{RecordKey, RecordStore};

/// Mime type reported for the show-everything response.
const LINKSET_MIME: &str = "application/linkset+json";

/// The resolution engine façade.
pub struct Resolver {
    config: ResolverConfig,
    store: Arc<dyn RecordStore>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    /// Resolve a request to a single target or the full link set.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing is registered at the identifier, the
    /// record is inactive, or no link satisfies the request; `Store`
    /// when the backend fetch fails.
    pub async fn resolve(&self, request: &ResolutionRequest) -> Result<ResolvedLink, ResolveError> {
        let key = RecordKey::from_request(request);
        let mut record = self
            .store
            .fetch(&key)
            .await?
            .ok_or(ResolveError::NotFound)?;
        if !record.active {
            return Err(ResolveError::NotFound);
        }

        if record.linkset.take().is_some() {
            self.strip_stale_linkset(&key, &record);
        }

        let attributes = &request.descriptive_attributes;
        let role = attributes
            .access_role
            .as_deref()
            .filter(|r| !r.is_empty());

        let filtered: Option<Vec<LinkRecord>> =
            role.map(|r| filter_by_access_role(&record.links, Some(r)));
        let links: &[LinkRecord] = filtered.as_deref().unwrap_or(&record.links);

        let ctx = ResolutionContext::from_record(&record, role.map(str::to_string));
        let key_code = record.identification_key_type.clone();
        let history = record.version_history.as_deref();

        let requested = attributes.link_type.as_deref();
        if requested == Some("all") {
            if !links.iter().any(|l| l.active) {
                return Err(ResolveError::NotFound);
            }
            let context =
                build_link_set_from(links, &record, &key_code, &self.config, history);
            if context.relations.is_empty() {
                return Err(ResolveError::NotFound);
            }
            let header = assemble_link_header(links, &ctx, &self.config, None);
            return Ok(ResolvedLink {
                target_url: None,
                mime_type: LINKSET_MIME.to_string(),
                data: LinkSet {
                    linkset: vec![context],
                },
                fwqs: None,
                link_header_text: header.text,
                link_header_text_full: header.full_text,
            });
        }

        let matched = select_record(
            links,
            requested,
            &attributes.iana_language_contexts,
            &attributes.mime_types,
        )
        .ok_or(ResolveError::NotFound)?;
        tracing::debug!(
            key = %key,
            target = %matched.target_url,
            link_type = %matched.link_type,
            "precedence match"
        );

        let header = assemble_link_header(
            links,
            &ctx,
            &self.config,
            Some(matched.link_type.as_str()),
        );
        let context = build_link_set_from(links, &record, &key_code, &self.config, history);

        Ok(ResolvedLink {
            target_url: Some(matched.target_url.clone()),
            mime_type: matched.mime_type.clone(),
            data: LinkSet {
                linkset: vec![context],
            },
            fwqs: Some(matched.fwqs),
            link_header_text: header.text,
            link_header_text_full: header.full_text,
        })
    }

    /// Detached best-effort save of the snapshot with its materialised
    /// linkset removed. Never awaited by the response path; a failure is
    /// logged and forgotten.
    fn strip_stale_linkset(&self, key: &RecordKey, record: &gdl_core::IdentifierRecord) {
        tracing::warn!(key = %key, "fetched document carries a materialised linkset; stripping");
        let store = Arc::clone(&self.store);
        let key = key.clone();
        let cleaned = record.clone();
        tokio::spawn(async move {
            if let Err(error) = store.save(&key, cleaned).await {
                tracing::warn!(key = %key, %error, "failed to strip stale materialised linkset");
            }
        });
    }
}
