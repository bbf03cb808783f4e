//! # `gdl defaults`
//!
//! Normalises the default-selection flags of every record in a corpus
//! file and prints the corrected corpus. Registries edited by hand drift
//! out of the one-default-per-scope invariant; this repairs them the
//! same way the lifecycle operations would.

use std::path::PathBuf;

use gdl_core::enforce_scope_defaults;

use crate::corpus;

#[derive(clap::Args, Debug)]
pub struct DefaultsArgs {
    /// Record corpus file (JSON or YAML list of identifier records).
    #[arg(long)]
    pub corpus: PathBuf,
}

pub fn run(args: DefaultsArgs) -> anyhow::Result<()> {
    let mut records = corpus::load_records(&args.corpus)?;
    for record in &mut records {
        enforce_scope_defaults(&mut record.links);
    }
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
