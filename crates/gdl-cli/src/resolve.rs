//! # `gdl resolve`
//!
//! Resolves one identifier against a record corpus and prints the
//! resolution result as JSON, including both `Link:` header renditions.

use std::path::PathBuf;

use anyhow::{bail, Context};

use gdl_engine::LanguageContext;
use gdl_service::{
    DescriptiveAttributes, IdentifierPart, MemoryStore, RequestIdentifiers, ResolutionRequest,
    ResolveError, Resolver,
};

use crate::corpus;

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Record corpus file (JSON or YAML list of identifier records).
    #[arg(long)]
    pub corpus: PathBuf,

    /// Resolver configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Public resolver domain (overrides the config file).
    #[arg(long)]
    pub resolver_domain: Option<String>,

    /// Identifier scheme namespace.
    #[arg(long, default_value = "gs1")]
    pub namespace: String,

    /// Canonical qualifier of the primary key, e.g. 01.
    #[arg(long)]
    pub key_code: String,

    /// Primary key value.
    #[arg(long)]
    pub key: String,

    /// Secondary qualifier as key=value; repeat in order, e.g.
    /// --qualifier lot=ABC --qualifier ser=123.
    #[arg(long = "qualifier")]
    pub qualifiers: Vec<String>,

    /// Requested link type, or the literal "all".
    #[arg(long)]
    pub link_type: Option<String>,

    /// Requested access role (shorthand or full URI).
    #[arg(long)]
    pub access_role: Option<String>,

    /// Acceptable mime type; repeat in preference order.
    #[arg(long = "mime-type")]
    pub mime_types: Vec<String>,

    /// Preferred language:context pair; repeat in preference order,
    /// e.g. --language-context en:us.
    #[arg(long = "language-context")]
    pub language_contexts: Vec<String>,
}

pub async fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let config = corpus::load_config(args.config.as_deref(), args.resolver_domain.clone())?;
    let records = corpus::load_records(&args.corpus)?;
    let store = MemoryStore::from_records(records).await;
    let resolver = Resolver::new(config, store);

    let request = build_request(&args)?;
    match resolver.resolve(&request).await {
        Ok(resolved) => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            Ok(())
        }
        Err(ResolveError::NotFound) => bail!("cannot resolve identifier"),
        Err(error) => Err(error.into()),
    }
}

fn build_request(args: &ResolveArgs) -> anyhow::Result<ResolutionRequest> {
    let secondaries = args
        .qualifiers
        .iter()
        .map(|raw| {
            let (qualifier, id) = raw
                .split_once('=')
                .with_context(|| format!("qualifier {raw:?} is not key=value"))?;
            Ok(IdentifierPart {
                qualifier: qualifier.to_string(),
                id: id.to_string(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let iana_language_contexts = args
        .language_contexts
        .iter()
        .map(|raw| {
            let (language, context) = raw
                .split_once(':')
                .with_context(|| format!("language context {raw:?} is not language:context"))?;
            Ok(LanguageContext::new(language, context))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ResolutionRequest {
        namespace: args.namespace.clone(),
        identifiers: RequestIdentifiers {
            primary: IdentifierPart {
                qualifier: args.key_code.clone(),
                id: args.key.clone(),
            },
            secondaries,
        },
        descriptive_attributes: DescriptiveAttributes {
            link_type: args.link_type.clone(),
            access_role: args.access_role.clone(),
            mime_types: args.mime_types.clone(),
            iana_language_contexts,
        },
    })
}
