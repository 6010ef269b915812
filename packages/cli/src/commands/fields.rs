use crate::commands::open_template;
use crate::config::Config;
use anyhow::Result;
use certkit_binding::FieldCatalog;
use certkit_common::collect_bindings;
use certkit_model::DataBinding;
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Template id; without it the standard field catalog is listed
    pub template: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn fields(args: FieldsArgs, cwd: &Path) -> Result<()> {
    let catalog = FieldCatalog::default_catalog();

    let Some(template_id) = args.template else {
        return print_catalog(&catalog, &args.format);
    };

    let config = Config::load(cwd)?;
    let doc = open_template(&config, cwd, &template_id)?;
    let bound = collect_bindings(&doc);

    if args.format == "json" {
        let bindings: Vec<&DataBinding> = bound.iter().map(|b| &b.binding).collect();
        println!("{}", serde_json::to_string_pretty(&bindings)?);
        return Ok(());
    }

    println!("📋 {} {}", "Fields of".bright_blue().bold(), doc.name.bright_white());
    if bound.is_empty() {
        println!("{}", "   No bound elements".yellow());
        return Ok(());
    }

    for field in &bound {
        let binding = &field.binding;
        let marker = if binding.is_required() {
            "required".red().to_string()
        } else {
            "optional".dimmed().to_string()
        };
        let origin = if catalog.find(binding.field_path()).is_some() {
            ""
        } else {
            " (custom)"
        };
        println!(
            "   {} {} [{}] {}{}",
            binding.field_path().cyan(),
            binding.label(),
            marker,
            field.element_id.dimmed(),
            origin
        );
    }

    Ok(())
}

fn print_catalog(catalog: &FieldCatalog, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.fields())?);
        return Ok(());
    }

    for (section, fields) in catalog.group_by_section() {
        println!("{}", section.title().bright_blue().bold());
        for binding in fields {
            println!("   {} {}", binding.field_path().cyan(), binding.label());
        }
    }
    Ok(())
}
