//! # Certificate Document
//!
//! A [`Document`] is an ordered list of pages plus metadata and output
//! settings. It is the unit of undo/redo: editors never patch a document
//! in place, they clone it, mutate the clone and record the new snapshot.
//!
//! Within a page, elements are kept in insertion order but painted in
//! z-index order (see [`Page::paint_order`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::element::DesignerElement;
use crate::error::{ModelError, ModelResult};
use crate::id_generator::get_document_id;

/// A4 landscape at 96 dpi
pub const DEFAULT_PAGE_WIDTH: f64 = 1123.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 794.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(40.0)
    }
}

/// One page of the certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub elements: Vec<DesignerElement>,
}

fn default_background() -> String {
    "#ffffff".to_string()
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            background_color: default_background(),
            margins: Margins::default(),
            elements: Vec::new(),
        }
    }

    pub fn find_element(&self, id: &str) -> Option<&DesignerElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut DesignerElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn remove_element(&mut self, id: &str) -> Option<DesignerElement> {
        let pos = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(pos))
    }

    /// Elements sorted back-to-front; ties keep insertion order
    pub fn paint_order(&self) -> Vec<&DesignerElement> {
        let mut ordered: Vec<&DesignerElement> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index());
        ordered
    }

    pub fn max_z_index(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.z_index()).max()
    }

    pub fn min_z_index(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.z_index()).min()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Px,
    Mm,
    In,
    Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    #[default]
    Srgb,
    Cmyk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    #[serde(default)]
    pub unit: Unit,
    pub dpi: u32,
    #[serde(default)]
    pub color_profile: ColorProfile,
    #[serde(default)]
    pub bleed: f64,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            unit: Unit::Px,
            dpi: 96,
            color_profile: ColorProfile::Srgb,
            bleed: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Incremented on every committed change
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A certificate template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub pages: Vec<Page>,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub settings: DocumentSettings,
}

impl Document {
    /// Create a document with one default page
    pub fn new(name: impl Into<String>) -> Self {
        Self::created_at(name, Utc::now())
    }

    /// Create a document with a fixed creation instant
    pub fn created_at(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        let name = name.into();
        let id = get_document_id(&name, now.timestamp_millis());
        let page = Page::new(format!("{}-page-1", id), "Page 1");

        Self {
            id,
            name,
            pages: vec![page],
            metadata: DocumentMetadata {
                created_at: now,
                updated_at: now,
                version: 0,
                tags: Vec::new(),
                description: None,
            },
            settings: DocumentSettings::default(),
        }
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        let doc: Document = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural invariants: at least one page, unique element ids,
    /// positive element sizes
    pub fn validate(&self) -> ModelResult<()> {
        if self.pages.is_empty() {
            return Err(ModelError::NoPages);
        }

        let mut seen = HashSet::new();
        for element in self.elements() {
            if !seen.insert(element.id()) {
                return Err(ModelError::DuplicateId(element.id().to_string()));
            }
            element.validate_geometry()?;
        }

        Ok(())
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    /// All elements across all pages
    pub fn elements(&self) -> impl Iterator<Item = &DesignerElement> {
        self.pages.iter().flat_map(|p| p.elements.iter())
    }

    /// Find an element anywhere in the document, with the page that holds it
    pub fn find_element(&self, element_id: &str) -> Option<(&Page, &DesignerElement)> {
        self.pages
            .iter()
            .find_map(|p| p.find_element(element_id).map(|e| (p, e)))
    }

    pub fn contains_element(&self, element_id: &str) -> bool {
        self.find_element(element_id).is_some()
    }

    /// Every id used by a page or element (for id generator resumption)
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .map(|p| p.id.as_str())
            .chain(self.elements().map(|e| e.id()))
    }

    /// Mark a committed change
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.version += 1;
        self.metadata.updated_at = now;
    }
}
