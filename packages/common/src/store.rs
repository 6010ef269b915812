use certkit_model::Document;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CommonError;
use crate::result::CommonResult;

/// Template persistence abstraction
///
/// A template is a serialized [`Document`] keyed by an opaque id. Loads and
/// saves are whole-snapshot operations.
pub trait TemplateStore {
    /// Check if a template exists
    fn exists(&self, template_id: &str) -> bool;

    /// Load and validate a template
    fn load(&self, template_id: &str) -> CommonResult<Document>;

    /// Replace the stored template with `doc`
    fn save(&mut self, template_id: &str, doc: &Document) -> CommonResult<()>;

    /// Ids of all stored templates, sorted
    fn list(&self) -> CommonResult<Vec<String>>;
}

/// Ids become file names, so keep them to a safe alphabet
fn validate_template_id(template_id: &str) -> CommonResult<()> {
    let valid = !template_id.is_empty()
        && template_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !template_id.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(CommonError::InvalidTemplateId(template_id.to_string()))
    }
}

/// JSON files in a directory, one `<id>.json` per template
pub struct FileTemplateStore {
    root: PathBuf,
}

impl FileTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, template_id: &str) -> CommonResult<PathBuf> {
        validate_template_id(template_id)?;
        Ok(self.root.join(format!("{}.json", template_id)))
    }
}

impl TemplateStore for FileTemplateStore {
    fn exists(&self, template_id: &str) -> bool {
        self.path_for(template_id).map(|p| p.exists()).unwrap_or(false)
    }

    fn load(&self, template_id: &str) -> CommonResult<Document> {
        let path = self.path_for(template_id)?;
        if !path.exists() {
            return Err(CommonError::TemplateNotFound(template_id.to_string()));
        }

        let json = std::fs::read_to_string(&path)?;
        Ok(Document::from_json(&json)?)
    }

    fn save(&mut self, template_id: &str, doc: &Document) -> CommonResult<()> {
        let path = self.path_for(template_id)?;
        std::fs::create_dir_all(&self.root)?;

        // Write-then-rename so readers never observe a half-written template
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, doc.to_json()?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn list(&self) -> CommonResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    ids.push(stem.to_string_lossy().to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// In-memory store for testing
///
/// Keeps serialized JSON rather than live documents so that loads exercise
/// the same parse and validation path as the file store.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<String, String>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert raw JSON (possibly invalid) under `template_id`
    pub fn insert_raw(&mut self, template_id: impl Into<String>, json: impl Into<String>) {
        self.templates.insert(template_id.into(), json.into());
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn exists(&self, template_id: &str) -> bool {
        validate_template_id(template_id).is_ok() && self.templates.contains_key(template_id)
    }

    fn load(&self, template_id: &str) -> CommonResult<Document> {
        validate_template_id(template_id)?;
        let json = self
            .templates
            .get(template_id)
            .ok_or_else(|| CommonError::TemplateNotFound(template_id.to_string()))?;
        Ok(Document::from_json(json)?)
    }

    fn save(&mut self, template_id: &str, doc: &Document) -> CommonResult<()> {
        validate_template_id(template_id)?;
        self.templates.insert(template_id.to_string(), doc.to_json()?);
        Ok(())
    }

    fn list(&self) -> CommonResult<Vec<String>> {
        Ok(self.templates.keys().cloned().collect())
    }
}
