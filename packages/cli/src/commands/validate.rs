use crate::commands::issue::report_issue_error;
use crate::commands::{load_records, open_template};
use crate::config::Config;
use anyhow::Result;
use certkit_editor::BatchIssuer;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Template id
    pub template: String,

    /// JSON file with one record or an array of records
    pub records: PathBuf,
}

/// Check every record for the template's required fields without rendering
pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = open_template(&config, cwd, &args.template)?;
    let records = load_records(&args.records)?;

    let options = config.resolver_options();
    let issuer = BatchIssuer::new(&doc, &options);

    println!("🔍 {} {}", "Validating".green().bold(), args.records.display());
    println!("   Required: {}", issuer.required_fields().join(", "));
    println!();

    if let Err(err) = issuer.validate(&records) {
        report_issue_error(&err);
        return Err(err.into());
    }

    println!("✨ {} All {} record(s) complete", "Done".green().bold(), records.len());
    Ok(())
}
