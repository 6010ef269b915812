//! # Edit Session Management
//!
//! An [`EditSession`] owns everything that changes while a user edits one
//! document: the history, the selection and at most one in-flight drag.
//!
//! ## Drag protocol
//!
//! ```text
//! begin_resize / begin_move ──> drag_to* ──> commit_drag   (one history entry)
//!                                       └──> cancel_drag   (nothing recorded)
//! ```
//!
//! While a drag is active, [`EditSession::document`] returns a preview copy
//! carrying the in-flight bounds; the committed document is untouched until
//! the commit.

use certkit_common::TemplateStore;
use certkit_geometry::{compute_move, Bounds, ResizeHandle, Resizer, SizeLimits};
use certkit_model::{DesignerElement, Document, ElementFactory, ElementKind, IDGenerator};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{DragError, EditorResult};
use crate::history::{DocumentHistory, DEFAULT_HISTORY_LIMIT};
use crate::mutations::{Mutation, MutationError};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Past snapshots kept for undo (0 = unlimited)
    pub history_limit: usize,
    /// Smallest width and height an element can be resized to
    pub min_element_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            min_element_size: SizeLimits::default().min_width,
        }
    }
}

/// Selected element ids, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The first selected element
    pub fn primary(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the selection with a single element
    pub fn select(&mut self, id: impl Into<String>) {
        self.ids = vec![id.into()];
    }

    pub fn add(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn toggle(&mut self, id: &str) {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.ids.push(id.to_string());
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|s| s != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer exist in `doc`
    pub fn retain_existing(&mut self, doc: &Document) {
        self.ids.retain(|id| doc.contains_element(id));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragKind {
    Resize(Resizer),
    Move { start: Bounds, current: Bounds },
}

/// An in-flight drag on one element
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub page_id: String,
    pub element_id: String,
    pub kind: DragKind,
}

impl DragState {
    pub fn start(&self) -> Bounds {
        match &self.kind {
            DragKind::Resize(resizer) => resizer.start(),
            DragKind::Move { start, .. } => *start,
        }
    }

    pub fn current(&self) -> Bounds {
        match &self.kind {
            DragKind::Resize(resizer) => resizer.current(),
            DragKind::Move { current, .. } => *current,
        }
    }
}

/// Single-user editing session over one document
pub struct EditSession {
    history: DocumentHistory,
    selection: Selection,
    drag: Option<DragState>,
    /// Present document with the in-flight drag bounds applied
    preview: Option<Document>,
    factory: ElementFactory,
    config: EditorConfig,
}

impl EditSession {
    /// Create a session with the default configuration
    pub fn new(document: Document) -> Self {
        Self::with_config(document, EditorConfig::default())
    }

    pub fn with_config(document: Document, config: EditorConfig) -> Self {
        let factory = Self::factory_for(&document);
        Self {
            history: DocumentHistory::with_max_levels(document, config.history_limit),
            selection: Selection::default(),
            drag: None,
            preview: None,
            factory,
            config,
        }
    }

    /// Open a stored template in a new session
    pub fn open(store: &dyn TemplateStore, template_id: &str, config: EditorConfig) -> EditorResult<Self> {
        let document = store.load(template_id)?;
        Ok(Self::with_config(document, config))
    }

    fn factory_for(document: &Document) -> ElementFactory {
        ElementFactory::new(IDGenerator::resume(document.id.clone(), document.ids()))
    }

    /// The document as it should be displayed (including drag preview)
    pub fn document(&self) -> &Document {
        self.preview.as_ref().unwrap_or_else(|| self.history.present())
    }

    /// The last committed document
    pub fn committed(&self) -> &Document {
        self.history.present()
    }

    pub fn history(&self) -> &DocumentHistory {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn ensure_idle(&self) -> EditorResult<()> {
        match &self.drag {
            Some(drag) => Err(DragError::DragInProgress(drag.element_id.clone()).into()),
            None => Ok(()),
        }
    }

    /// Apply one mutation as one history entry
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<()> {
        self.apply_batch(vec![mutation])
    }

    /// Apply several mutations as a single history entry
    ///
    /// All or nothing: if any mutation fails the committed document is
    /// unchanged.
    pub fn apply_batch(&mut self, mutations: Vec<Mutation>) -> EditorResult<()> {
        self.ensure_idle()?;

        let mut next = self.history.present().clone();
        for mutation in &mutations {
            mutation.apply(&mut next)?;
            debug!(mutation = mutation.name(), element = ?mutation.element_id(), "Applied mutation");
        }

        next.touch(Utc::now());
        self.history.push(next);
        self.selection.retain_existing(self.history.present());
        Ok(())
    }

    /// Create an element of `kind` on top of `page_id` and select it
    pub fn create_element(&mut self, page_id: &str, kind: ElementKind, x: f64, y: f64) -> EditorResult<String> {
        let element = self.factory.create_at(kind, x, y);
        self.add_element(page_id, element)
    }

    /// Add a prepared element on top of `page_id` and select it
    pub fn add_element(&mut self, page_id: &str, mut element: DesignerElement) -> EditorResult<String> {
        let max = self.history.present().page(page_id).and_then(|p| p.max_z_index());
        let id = element.id().to_string();

        match max.map_or(Some(0), |z| z.checked_add(1)) {
            Some(top) => {
                element.base_mut().z_index = top;
                self.apply(Mutation::AddElement {
                    page_id: page_id.to_string(),
                    element,
                })?;
            }
            None => {
                // Already at i32::MAX, so let BringToFront renumber the page
                element.base_mut().z_index = i32::MAX;
                self.apply_batch(vec![
                    Mutation::AddElement {
                        page_id: page_id.to_string(),
                        element,
                    },
                    Mutation::BringToFront {
                        page_id: page_id.to_string(),
                        element_id: id.clone(),
                    },
                ])?;
            }
        }
        self.selection.select(id.clone());
        Ok(id)
    }

    /// Duplicate an element under a fresh id and select the copy
    pub fn duplicate_element(&mut self, page_id: &str, element_id: &str) -> EditorResult<String> {
        let new_id = self.factory.next_id();
        self.apply(Mutation::DuplicateElement {
            page_id: page_id.to_string(),
            element_id: element_id.to_string(),
            new_id: new_id.clone(),
        })?;
        self.selection.select(new_id.clone());
        Ok(new_id)
    }

    pub fn add_page(&mut self, name: impl Into<String>) -> EditorResult<String> {
        let page_id = self.factory.next_id();
        self.apply(Mutation::AddPage {
            page_id: page_id.clone(),
            name: name.into(),
            index: None,
        })?;
        Ok(page_id)
    }

    /// Returns `false` when there is nothing to undo
    pub fn undo(&mut self) -> EditorResult<bool> {
        self.ensure_idle()?;
        let undone = self.history.undo().is_some();
        self.selection.retain_existing(self.history.present());
        Ok(undone)
    }

    /// Returns `false` when there is nothing to redo
    pub fn redo(&mut self) -> EditorResult<bool> {
        self.ensure_idle()?;
        let redone = self.history.redo().is_some();
        self.selection.retain_existing(self.history.present());
        Ok(redone)
    }

    /// Start resizing `element_id` from `handle`
    pub fn begin_resize(&mut self, page_id: &str, element_id: &str, handle: ResizeHandle) -> EditorResult<()> {
        let start = self.drag_start(page_id, element_id)?;
        let limits = SizeLimits::uniform(self.config.min_element_size);
        self.begin_drag(page_id, element_id, DragKind::Resize(Resizer::new(handle, start, limits)));
        Ok(())
    }

    /// Start moving `element_id`
    pub fn begin_move(&mut self, page_id: &str, element_id: &str) -> EditorResult<()> {
        let start = self.drag_start(page_id, element_id)?;
        self.begin_drag(page_id, element_id, DragKind::Move { start, current: start });
        Ok(())
    }

    fn drag_start(&self, page_id: &str, element_id: &str) -> EditorResult<Bounds> {
        self.ensure_idle()?;

        // Validating a no-op move checks existence and lock state
        Mutation::MoveElement {
            page_id: page_id.to_string(),
            element_id: element_id.to_string(),
            dx: 0.0,
            dy: 0.0,
        }
        .validate(self.history.present())?;

        let (_, element) = self
            .history
            .present()
            .find_element(element_id)
            .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))?;
        Ok(element.bounds())
    }

    fn begin_drag(&mut self, page_id: &str, element_id: &str, kind: DragKind) {
        debug!(element = element_id, "Drag started");
        self.drag = Some(DragState {
            page_id: page_id.to_string(),
            element_id: element_id.to_string(),
            kind,
        });
        self.preview = Some(self.history.present().clone());
    }

    /// Update the in-flight drag with the total pointer delta since it began
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> EditorResult<Bounds> {
        let drag = self.drag.as_mut().ok_or(DragError::NoActiveDrag)?;

        let bounds = match &mut drag.kind {
            DragKind::Resize(resizer) => resizer.update(dx, dy),
            DragKind::Move { start, current } => {
                *current = compute_move(*start, dx, dy);
                *current
            }
        };

        if let Some(element) = self
            .preview
            .as_mut()
            .and_then(|doc| doc.page_mut(&drag.page_id))
            .and_then(|page| page.find_element_mut(&drag.element_id))
        {
            element.base_mut().set_bounds(bounds);
        }

        Ok(bounds)
    }

    /// Record the drag result as one history entry
    ///
    /// Returns `false` if the element ended where it started, in which case
    /// nothing is recorded.
    pub fn commit_drag(&mut self) -> EditorResult<bool> {
        let drag = self.drag.take().ok_or(DragError::NoActiveDrag)?;
        self.preview = None;

        let bounds = drag.current();
        if bounds == drag.start() {
            debug!(element = %drag.element_id, "Drag ended without change");
            return Ok(false);
        }

        self.apply(Mutation::SetBounds {
            page_id: drag.page_id,
            element_id: drag.element_id,
            bounds,
        })?;
        Ok(true)
    }

    /// Abandon the drag, restoring the pre-drag bounds
    pub fn cancel_drag(&mut self) -> EditorResult<()> {
        let drag = self.drag.take().ok_or(DragError::NoActiveDrag)?;
        self.preview = None;
        debug!(element = %drag.element_id, "Drag cancelled");
        Ok(())
    }

    /// Replace the whole document, as one undoable step
    pub fn load_document(&mut self, document: Document) -> EditorResult<()> {
        self.ensure_idle()?;
        document.validate()?;

        self.factory = Self::factory_for(&document);
        self.history.push(document);
        self.selection.clear();
        Ok(())
    }

    /// Load a stored template into this session
    pub fn load_from(&mut self, store: &dyn TemplateStore, template_id: &str) -> EditorResult<()> {
        let document = store.load(template_id)?;
        self.load_document(document)
    }

    /// Persist the committed document
    pub fn save_to(&self, store: &mut dyn TemplateStore, template_id: &str) -> EditorResult<()> {
        store.save(template_id, self.history.present())?;
        Ok(())
    }
}
