use crate::commands::{load_records, open_template};
use crate::config::Config;
use anyhow::Result;
use certkit_editor::{BatchIssuer, IssueError, IssuedCertificate};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Template id
    pub template: String,

    /// JSON file with one record or an array of records
    pub records: PathBuf,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub fn issue(args: IssueArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = open_template(&config, cwd, &args.template)?;
    let records = load_records(&args.records)?;

    println!(
        "🏅 {} {} record(s) with {}",
        "Issuing".bright_blue().bold(),
        records.len(),
        doc.name.bright_white()
    );

    let options = config.resolver_options();
    let issuer = BatchIssuer::new(&doc, &options);
    let issued = match issuer.issue(&records) {
        Ok(issued) => issued,
        Err(err) => {
            report_issue_error(&err);
            return Err(err.into());
        }
    };

    let out_dir = args.out_dir.unwrap_or_else(|| config.out_dir(cwd));
    fs::create_dir_all(&out_dir)?;

    for certificate in &issued {
        let path = write_certificate(&out_dir, &args.template, certificate)?;
        println!("  {} {}", "✓".green(), path.display());
    }

    println!();
    println!("✨ {} {} certificate(s) issued", "Done".green().bold(), issued.len());
    Ok(())
}

pub(crate) fn report_issue_error(err: &IssueError) {
    match err {
        IssueError::MissingRequiredFields { records } => {
            for issues in records {
                println!("  {} {}", "✗".red(), issues);
            }
        }
        IssueError::EmptyBatch => println!("  {}", "No records found".yellow()),
    }
}

fn write_certificate(out_dir: &Path, template_id: &str, certificate: &IssuedCertificate) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}-{}.json", template_id, certificate.record_index + 1));
    fs::write(&path, serde_json::to_string_pretty(&certificate.rendered)?)?;
    debug!(path = %path.display(), "Wrote certificate");
    Ok(path)
}
