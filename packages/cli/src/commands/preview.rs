use crate::commands::{load_records, open_template};
use crate::config::Config;
use anyhow::{anyhow, Result};
use certkit_editor::{DocumentRenderer, PlainTextRenderer, Renderer};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Template id
    pub template: String,

    /// JSON record file; without it the design view is shown
    pub record: Option<PathBuf>,

    /// Record to preview when the file holds several
    #[arg(short, long, default_value = "0")]
    pub index: usize,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn preview(args: PreviewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = open_template(&config, cwd, &args.template)?;
    let renderer = DocumentRenderer::with_options(&config.resolver_options());

    let rendered = match &args.record {
        Some(path) => {
            let records = load_records(path)?;
            let record = records
                .get(args.index)
                .ok_or_else(|| anyhow!("Record {} not found in {} ({} records)", args.index, path.display(), records.len()))?;
            renderer.render_document(&doc, record)
        }
        None => renderer.render_design(&doc),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{}", "👀 Preview".bright_blue().bold());
        print!("{}", PlainTextRenderer.render(&rendered));
    }

    Ok(())
}
