//! # Batch Issuance
//!
//! Renders one certificate per data record. Issuance is all-or-nothing:
//! every record is checked for the document's required fields first, and if
//! any record is incomplete nothing is rendered and the error lists every
//! missing field of every record.

use certkit_binding::ResolverOptions;
use certkit_common::required_field_paths;
use certkit_model::Document;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::preview::{DocumentRenderer, RenderedDocument};

/// Missing fields of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIssues {
    pub record_index: usize,
    pub missing: Vec<String>,
}

impl fmt::Display for RecordIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.record_index, self.missing.join(", "))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("Missing required fields in {} record(s): {}", .records.len(), format_records(.records))]
    MissingRequiredFields { records: Vec<RecordIssues> },

    #[error("No records to issue")]
    EmptyBatch,
}

fn format_records(records: &[RecordIssues]) -> String {
    records.iter().map(|r| r.to_string()).collect::<Vec<_>>().join("; ")
}

/// One rendered certificate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCertificate {
    pub record_index: usize,
    pub rendered: RenderedDocument,
}

pub struct BatchIssuer<'a> {
    document: &'a Document,
    renderer: DocumentRenderer,
    required: Vec<String>,
}

impl<'a> BatchIssuer<'a> {
    pub fn new(document: &'a Document, options: &ResolverOptions) -> Self {
        Self {
            document,
            renderer: DocumentRenderer::with_options(options),
            required: required_field_paths(document),
        }
    }

    /// Field paths every record must supply
    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    /// Check every record, collecting all missing fields
    pub fn validate(&self, records: &[Value]) -> Result<(), IssueError> {
        if records.is_empty() {
            return Err(IssueError::EmptyBatch);
        }

        let resolver = self.renderer.resolver();
        let issues: Vec<RecordIssues> = records
            .iter()
            .enumerate()
            .filter_map(|(record_index, record)| {
                let report = resolver.validate_required(record, self.required.iter().map(String::as_str));
                (!report.all_present).then(|| RecordIssues {
                    record_index,
                    missing: report.missing,
                })
            })
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            warn!(records = issues.len(), "Batch blocked by missing required fields");
            Err(IssueError::MissingRequiredFields { records: issues })
        }
    }

    /// Validate, then render every record
    #[instrument(skip(self, records), fields(document = %self.document.id, records = records.len()))]
    pub fn issue(&self, records: &[Value]) -> Result<Vec<IssuedCertificate>, IssueError> {
        self.validate(records)?;

        let issued: Vec<IssuedCertificate> = records
            .iter()
            .enumerate()
            .map(|(record_index, record)| IssuedCertificate {
                record_index,
                rendered: self.renderer.render_document(self.document, record),
            })
            .collect();

        info!(issued = issued.len(), "Batch issued");
        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certkit_model::{DataBinding, ElementFactory, IDGenerator};
    use serde_json::json;

    fn document() -> Document {
        let mut doc = Document::new("Batch");
        let mut factory = ElementFactory::new(IDGenerator::from_seed("b"));
        doc.pages[0].elements = vec![
            factory.template_variable(DataBinding::new("user.fullName", "Full Name").with_required(true), 0.0, 0.0),
            factory.template_variable(DataBinding::new("course.title", "Course").with_required(true), 0.0, 60.0),
            factory.template_variable(DataBinding::new("course.grade", "Grade"), 0.0, 120.0),
        ];
        doc
    }

    #[test]
    fn test_required_fields_from_document() {
        let doc = document();
        let issuer = BatchIssuer::new(&doc, &ResolverOptions::default());
        assert_eq!(issuer.required_fields(), ["user.fullName", "course.title"]);
    }

    #[test]
    fn test_issue_blocks_and_lists_every_missing_field() {
        let doc = document();
        let issuer = BatchIssuer::new(&doc, &ResolverOptions::default());
        let records = vec![
            json!({ "user": { "fullName": "Ada" }, "course": { "title": "Engines" } }),
            json!({ "user": {} }),
            json!({ "user": { "fullName": "Mary" }, "course": { "title": "" } }),
        ];

        let err = issuer.issue(&records).unwrap_err();
        assert_eq!(
            err,
            IssueError::MissingRequiredFields {
                records: vec![
                    RecordIssues {
                        record_index: 1,
                        missing: vec!["user.fullName".to_string(), "course.title".to_string()],
                    },
                    RecordIssues {
                        record_index: 2,
                        missing: vec!["course.title".to_string()],
                    },
                ],
            }
        );
        assert!(err.to_string().contains("record 1: user.fullName, course.title"));
    }

    #[test]
    fn test_issue_renders_every_record() {
        let doc = document();
        let issuer = BatchIssuer::new(&doc, &ResolverOptions::default());
        let records = vec![
            json!({ "user": { "fullName": "Ada" }, "course": { "title": "Engines" } }),
            json!({ "user": { "fullName": "Mary" }, "course": { "title": "Tides", "grade": "A" } }),
        ];

        let issued = issuer.issue(&records).unwrap();
        assert_eq!(issued.len(), 2);

        let texts: Vec<_> = issued[1].rendered.nodes().filter_map(|n| n.text()).collect();
        assert_eq!(texts, vec!["Mary", "Tides", "A"]);

        let optional: Vec<_> = issued[0].rendered.nodes().filter_map(|n| n.text()).collect();
        assert_eq!(optional[2], "[Grade]");
    }

    #[test]
    fn test_empty_batch() {
        let doc = document();
        let issuer = BatchIssuer::new(&doc, &ResolverOptions::default());
        assert_eq!(issuer.issue(&[]), Err(IssueError::EmptyBatch));
    }
}
