use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use certkit_common::{FileTemplateStore, TemplateStore};
use certkit_editor::EditSession;
use certkit_model::{DataBinding, DesignerElement, Document, ElementFactory, ElementKind, IDGenerator, ValueType};
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::fs;
use std::path::Path;

pub const SAMPLE_TEMPLATE_ID: &str = "completion";
pub const SAMPLE_RECORDS: &str = "records.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Templates directory
    #[arg(short, long, default_value = "templates")]
    pub templates_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing certificate project...".bright_blue().bold());

    let config = Config {
        templates_dir: args.templates_dir.clone(),
        ..Config::default()
    };

    let mut store = FileTemplateStore::new(config.templates_dir(cwd));
    if !store.exists(SAMPLE_TEMPLATE_ID) {
        let session = EditSession::with_config(sample_template(), config.editor_config());
        session.save_to(&mut store, SAMPLE_TEMPLATE_ID)?;
        println!("  {} Created {}/{}.json", "✓".green(), args.templates_dir, SAMPLE_TEMPLATE_ID);
    }

    let records_path = cwd.join(SAMPLE_RECORDS);
    if !records_path.exists() {
        fs::write(&records_path, serde_json::to_string_pretty(&sample_records())?)?;
        println!("  {} Created {}", "✓".green(), SAMPLE_RECORDS);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: certkit fields {}", SAMPLE_TEMPLATE_ID);
    println!("  2. Run: certkit preview {} {}", SAMPLE_TEMPLATE_ID, SAMPLE_RECORDS);
    println!("  3. Run: certkit issue {} {}", SAMPLE_TEMPLATE_ID, SAMPLE_RECORDS);

    Ok(())
}

/// A landscape completion certificate bound to the standard fields
pub fn sample_template() -> Document {
    let mut doc = Document::new("Course Completion");
    let mut factory = ElementFactory::new(IDGenerator::from_seed(doc.id.clone()));

    let mut frame = factory.create_at(ElementKind::Shape, 20.0, 20.0);
    frame.base_mut().set_bounds(certkit_model::Bounds::new(20.0, 20.0, 1083.0, 754.0));

    let title = factory.create_at(ElementKind::Text, 261.0, 120.0);

    let name = factory.template_variable(
        DataBinding::new("user.fullName", "Full Name").with_required(true),
        261.0,
        300.0,
    );
    let course = factory.template_variable(
        DataBinding::new("course.title", "Course Title").with_required(true),
        261.0,
        400.0,
    );
    let date = factory.template_variable(
        DataBinding::new("certificate.issueDate", "Issue Date")
            .with_value_type(ValueType::Date)
            .with_format_pattern("dd MMMM yyyy")
            .with_required(true),
        261.0,
        480.0,
    );

    let mut qr = factory.create_at(ElementKind::QrCode, 943.0, 614.0);
    if let DesignerElement::QrCode(e) = &mut qr {
        e.binding = Some(DataBinding::new("certificate.verifyUrl", "Verification URL").with_value_type(ValueType::QrCode));
    }

    for (z, mut element) in [frame, title, name, course, date, qr].into_iter().enumerate() {
        element.base_mut().z_index = z as i32;
        doc.pages[0].elements.push(element);
    }
    doc
}

fn sample_records() -> serde_json::Value {
    json!([
        {
            "user": { "fullName": "Jane Doe" },
            "course": { "title": "Introduction to Rust" },
            "certificate": { "issueDate": "2024-12-15", "verifyUrl": "https://example.com/verify/1" }
        },
        {
            "user": { "fullName": "John Roe" },
            "course": { "title": "Introduction to Rust" },
            "certificate": { "issueDate": "2024-12-16" }
        }
    ])
}
