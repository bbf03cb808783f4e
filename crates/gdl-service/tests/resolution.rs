//! End-to-end resolution scenarios through the full stack: store fetch,
//! access-role filtering, precedence matching, linkset construction, and
//! header assembly.

use std::sync::Arc;

use gdl_core::{IdentifierRecord, LinkRecord, QualifierPath, ResolverConfig};
use gdl_service::{
    DescriptiveAttributes, IdentifierPart, MemoryStore, RecordKey, RecordStore, RequestIdentifiers,
    ResolutionRequest, ResolveError, Resolver,
};
use gdl_engine::LanguageContext;

fn config() -> ResolverConfig {
    ResolverConfig::new("https://id.example.org").unwrap()
}

fn link(url: &str, lt: &str, lang: &str, ctx: &str, mime: &str) -> LinkRecord {
    let mut record = LinkRecord::new(url, lt);
    record.iana_language = lang.to_string();
    record.context = ctx.to_string();
    record.mime_type = mime.to_string();
    record
}

fn request(attributes: DescriptiveAttributes) -> ResolutionRequest {
    ResolutionRequest {
        namespace: "gs1".to_string(),
        identifiers: RequestIdentifiers {
            primary: IdentifierPart {
                qualifier: "01".to_string(),
                id: "09506000134352".to_string(),
            },
            secondaries: Vec::new(),
        },
        descriptive_attributes: attributes,
    }
}

async fn resolver_for(record: IdentifierRecord) -> Resolver {
    let store = MemoryStore::from_records(vec![record]).await;
    Resolver::new(config(), store)
}

fn base_record() -> IdentifierRecord {
    IdentifierRecord::new("gs1", "01", "09506000134352", QualifierPath::root())
}

#[tokio::test]
async fn exact_mime_match_beats_mime_default() {
    let mut record = base_record();
    let mut json = link("https://example.com/json", "ns:a", "en", "us", "json");
    json.default_mime_type = true;
    record.links.push(json);
    record.links.push(link("https://example.com/html", "ns:a", "en", "us", "html"));

    let resolver = resolver_for(record).await;
    let resolved = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("ns:a".to_string()),
            access_role: None,
            mime_types: vec!["html".to_string()],
            iana_language_contexts: vec![LanguageContext::new("en", "us")],
        }))
        .await
        .unwrap();

    assert_eq!(resolved.target_url.as_deref(), Some("https://example.com/html"));
    assert_eq!(resolved.mime_type, "html");
    assert_eq!(resolved.fwqs, Some(false));
}

#[tokio::test]
async fn all_with_zero_active_records_is_not_found() {
    let mut record = base_record();
    let mut inactive = link("https://example.com/x", "ns:a", "en", "us", "html");
    inactive.active = false;
    record.links.push(inactive);

    let resolver = resolver_for(record).await;
    let outcome = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            ..Default::default()
        }))
        .await;
    assert!(matches!(outcome, Err(ResolveError::NotFound)));
}

#[tokio::test]
async fn all_returns_full_linkset_and_unfiltered_header() {
    let mut record = base_record();
    record.links.push(link("https://example.com/pip", "gs1:pip", "en", "us", "text/html"));
    record.links.push(link("https://example.com/epil", "gs1:epil", "en", "us", "text/html"));

    let resolver = resolver_for(record).await;
    let resolved = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert_eq!(resolved.target_url, None);
    assert_eq!(resolved.mime_type, "application/linkset+json");
    let context = &resolved.data.linkset[0];
    assert_eq!(context.anchor, "https://id.example.org/gs1/01/09506000134352");
    assert_eq!(context.relations.len(), 2);
    assert!(resolved.link_header_text.contains("gs1:pip"));
    assert!(resolved.link_header_text.contains("gs1:epil"));
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let resolver = resolver_for(base_record()).await;
    let mut req = request(Default::default());
    req.identifiers.primary.id = "00000000000000".to_string();
    assert!(matches!(resolver.resolve(&req).await, Err(ResolveError::NotFound)));
}

#[tokio::test]
async fn inactive_record_is_not_found() {
    let mut record = base_record();
    record.active = false;
    record.links.push(link("https://example.com/pip", "gs1:pip", "en", "us", "text/html"));
    let resolver = resolver_for(record).await;
    let outcome = resolver.resolve(&request(Default::default())).await;
    assert!(matches!(outcome, Err(ResolveError::NotFound)));
}

#[tokio::test]
async fn encryption_method_none_survives_into_linkset() {
    let mut record = base_record();
    let mut protected = link("https://example.com/dpp", "untp:dpp", "en", "us", "application/json");
    protected.encryption_method = Some("none".to_string());
    record.links.push(protected);

    let resolver = resolver_for(record).await;
    let resolved = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    let context = &resolved.data.linkset[0];
    let targets = &context.relations["https://gs1.org/voc/dpp"];
    assert_eq!(targets[0].encryption_method.as_deref(), Some("none"));
}

#[tokio::test]
async fn access_role_hides_restricted_links() {
    let mut record = base_record();
    record.links.push(link("https://example.com/public", "gs1:pip", "en", "us", "text/html"));
    let mut restricted = link("https://example.com/audit", "gs1:traceability", "en", "us", "text/html");
    restricted.access_role = Some(vec!["untp:accessRole#Auditor".to_string()]);
    record.links.push(restricted);

    let resolver = resolver_for(record.clone()).await;

    // no requested role is the identity filter: everything is visible
    let anonymous = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(anonymous.data.linkset[0].relations.len(), 2);

    // a non-matching role sees only the public link
    let resolver = resolver_for(record.clone()).await;
    let sampler = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            access_role: Some("sampler".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(sampler.data.linkset[0].relations.len(), 1);

    // with the role, both survive and the linkset refs echo the role
    let resolver = resolver_for(record).await;
    let audited = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            access_role: Some("auditor".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(audited.data.linkset[0].relations.len(), 2);
    assert!(audited.link_header_text.contains("accessRole=auditor"));
}

#[tokio::test]
async fn matched_response_filters_header_but_not_full_text() {
    let mut record = base_record();
    record.links.push(link("https://example.com/pip", "gs1:pip", "en", "us", "text/html"));
    record.links.push(link("https://example.com/epil", "gs1:epil", "en", "us", "text/html"));

    let resolver = resolver_for(record).await;
    let resolved = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("gs1:pip".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert!(resolved.link_header_text.contains("gs1:pip"));
    assert!(!resolved.link_header_text.contains("gs1:epil"));
    assert!(resolved.link_header_text_full.contains("gs1:epil"));
}

#[tokio::test]
async fn header_budget_drops_targets_end_to_end() {
    let mut record = base_record();
    for i in 0..30 {
        let mut l = link(
            &format!("https://example.com/target/{i}"),
            "gs1:pip",
            "en",
            "us",
            "text/html",
        );
        l.title = "A long descriptive title to put pressure on the byte budget".to_string();
        record.links.push(l);
    }

    let config = config().with_link_header_max_size("400").unwrap();
    let store = MemoryStore::from_records(vec![record]).await;
    let resolver = Resolver::new(config, store);
    let resolved = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert!(!resolved.link_header_text.contains("example.com/target"));
    assert!(resolved.link_header_text.contains("rel=\"owl:sameAs\""));
    assert!(resolved.link_header_text_full.contains("example.com/target/29"));
}

#[tokio::test]
async fn stale_materialised_linkset_is_stripped_in_background() {
    let mut record = base_record();
    record.links.push(link("https://example.com/pip", "gs1:pip", "en", "us", "text/html"));
    record.linkset = Some(serde_json::json!({"stale": true}));
    let key = RecordKey::from_record(&record);

    let store = MemoryStore::from_records(vec![record]).await;
    let resolver = Resolver::new(config(), Arc::clone(&store) as Arc<dyn RecordStore>);

    let resolved = resolver
        .resolve(&request(DescriptiveAttributes {
            link_type: Some("all".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    // the response is built from the snapshot, not the cleanup write
    assert!(!resolved.data.linkset.is_empty());

    // the detached save eventually strips the field
    let mut stripped = false;
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let fetched = store.fetch(&key).await.unwrap().unwrap();
        if fetched.linkset.is_none() {
            stripped = true;
            break;
        }
    }
    assert!(stripped, "materialised linkset was not stripped");
}

#[tokio::test]
async fn qualified_record_gets_ancestor_refs() {
    let mut record = IdentifierRecord::new(
        "gs1",
        "01",
        "09506000134352",
        QualifierPath::new("/lot/ABC/ser/123"),
    );
    record.links.push(link("https://example.com/pip", "gs1:pip", "en", "us", "text/html"));

    let store = MemoryStore::from_records(vec![record]).await;
    let resolver = Resolver::new(config(), store);
    let mut req = request(DescriptiveAttributes {
        link_type: Some("all".to_string()),
        ..Default::default()
    });
    req.identifiers.secondaries = vec![
        IdentifierPart {
            qualifier: "lot".to_string(),
            id: "ABC".to_string(),
        },
        IdentifierPart {
            qualifier: "ser".to_string(),
            id: "123".to_string(),
        },
    ];

    let resolved = resolver.resolve(&req).await.unwrap();
    // self ref at the full path, then two ancestors (lot, root)
    let linkset_refs = resolved
        .link_header_text
        .matches("rel=\"linkset\"")
        .count();
    assert_eq!(linkset_refs, 3);
    assert!(resolved
        .link_header_text
        .contains("/09506000134352/lot/ABC?linkType=all"));
}
