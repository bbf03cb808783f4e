//! # `gdl linkset`
//!
//! Prints the linkset document and flat HTTP-Link line for every record
//! in a corpus file, without running a resolution. Useful for inspecting
//! what a registry will serve before deploying it.

use std::path::PathBuf;

use gdl_engine::{build_http_link_line, build_link_set, LinkSet};

use crate::corpus;

#[derive(clap::Args, Debug)]
pub struct LinksetArgs {
    /// Record corpus file (JSON or YAML list of identifier records).
    #[arg(long)]
    pub corpus: PathBuf,

    /// Resolver configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Public resolver domain (overrides the config file).
    #[arg(long)]
    pub resolver_domain: Option<String>,

    /// Also print the flat HTTP-Link line per record.
    #[arg(long)]
    pub http_link: bool,
}

pub fn run(args: LinksetArgs) -> anyhow::Result<()> {
    let config = corpus::load_config(args.config.as_deref(), args.resolver_domain.clone())?;
    let records = corpus::load_records(&args.corpus)?;

    let mut contexts = Vec::with_capacity(records.len());
    for record in &records {
        let history = record.version_history.as_deref();
        contexts.push(build_link_set(
            record,
            &record.identification_key_type,
            &config,
            history,
        ));
        if args.http_link {
            eprintln!(
                "{}",
                build_http_link_line(record, &record.identification_key_type, &config)
            );
        }
    }

    let document = LinkSet { linkset: contexts };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
