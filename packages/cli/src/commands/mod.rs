pub mod fields;
pub mod init;
pub mod issue;
pub mod preview;
pub mod validate;

pub use fields::{fields, FieldsArgs};
pub use init::{init, InitArgs};
pub use issue::{issue, IssueArgs};
pub use preview::{preview, PreviewArgs};
pub use validate::{validate, ValidateArgs};

use crate::config::Config;
use anyhow::Result;
use certkit_common::{FileTemplateStore, TemplateStore};
use certkit_model::Document;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Cannot read records from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Records in {0} must be an object or an array of objects")]
    NotObjects(PathBuf),
}

/// Load a template by id from the configured templates directory
pub fn open_template(config: &Config, cwd: &Path, template_id: &str) -> Result<Document> {
    let store = FileTemplateStore::new(config.templates_dir(cwd));
    Ok(store.load(template_id)?)
}

/// Read a JSON file holding one record object or an array of them
pub fn load_records(path: &Path) -> Result<Vec<Value>, RecordsError> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| RecordsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match value {
        Value::Array(items) => items,
        record @ Value::Object(_) => vec![record],
        _ => return Err(RecordsError::NotObjects(path.to_path_buf())),
    };

    if records.iter().all(Value::is_object) {
        Ok(records)
    } else {
        Err(RecordsError::NotObjects(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_records_accepts_object_or_array() {
        let dir = tempfile::tempdir().unwrap();
        let one = dir.path().join("one.json");
        let many = dir.path().join("many.json");
        std::fs::write(&one, r#"{ "user": { "fullName": "Ada" } }"#).unwrap();
        std::fs::write(&many, r#"[{ "a": 1 }, { "a": 2 }]"#).unwrap();

        assert_eq!(load_records(&one).unwrap().len(), 1);
        assert_eq!(load_records(&many).unwrap().len(), 2);
    }

    #[test]
    fn test_load_records_rejects_scalars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(load_records(&path), Err(RecordsError::NotObjects(_))));
        assert!(matches!(
            load_records(&dir.path().join("missing.json")),
            Err(RecordsError::Read { .. })
        ));
    }
}
