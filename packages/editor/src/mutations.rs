//! # Document Mutations
//!
//! Semantic operations on a certificate [`Document`].
//!
//! ## Design Principles
//!
//! 1. **Validated**: every mutation is checked against the document before
//!    anything is touched
//! 2. **Pure**: a mutation carries every id it needs, so applying it never
//!    consults session state
//! 3. **Kind-stable**: an element's kind never changes; replacing it with a
//!    different kind is a delete plus an add
//!
//! ## Locking
//!
//! Locked elements reject geometry changes and deletion. Style, visibility,
//! z-order and the lock flag itself stay editable.

use certkit_geometry::Bounds;
use certkit_model::{DesignerElement, Document, ElementKind, Margins, Page};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations on a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Place a new element on a page
    AddElement { page_id: String, element: DesignerElement },

    /// Replace an element's properties (same id, same kind)
    UpdateElement {
        page_id: String,
        element_id: String,
        element: DesignerElement,
    },

    /// Set absolute bounds (the commit step of a drag)
    SetBounds {
        page_id: String,
        element_id: String,
        bounds: Bounds,
    },

    /// Translate an element
    MoveElement {
        page_id: String,
        element_id: String,
        dx: f64,
        dy: f64,
    },

    DeleteElement { page_id: String, element_id: String },

    /// Copy an element under `new_id`, offset and placed on top
    DuplicateElement {
        page_id: String,
        element_id: String,
        new_id: String,
    },

    SetZIndex {
        page_id: String,
        element_id: String,
        z_index: i32,
    },

    BringToFront { page_id: String, element_id: String },

    SendToBack { page_id: String, element_id: String },

    /// Swap with the next element up in paint order
    BringForward { page_id: String, element_id: String },

    /// Swap with the next element down in paint order
    SendBackward { page_id: String, element_id: String },

    SetLocked {
        page_id: String,
        element_id: String,
        locked: bool,
    },

    SetVisible {
        page_id: String,
        element_id: String,
        visible: bool,
    },

    /// Insert an empty page, sized like the first page
    AddPage {
        page_id: String,
        name: String,
        index: Option<usize>,
    },

    DeletePage { page_id: String },

    UpdatePage {
        page_id: String,
        name: Option<String>,
        width: Option<f64>,
        height: Option<f64>,
        background_color: Option<String>,
        margins: Option<Margins>,
    },

    ReorderPage { page_id: String, index: usize },

    RenameDocument { name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Element is locked: {0}")]
    ElementLocked(String),

    #[error("Cannot change element kind from {expected} to {found}")]
    KindMismatch { expected: ElementKind, found: ElementKind },

    #[error("Replacement element has id {found}, expected {expected}")]
    IdMismatch { expected: String, found: String },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Cannot delete the last page")]
    LastPage,

    #[error("Index {index} out of range for {len} pages")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Too many elements on page {0} to order")]
    ZIndexOverflow(String),
}

pub type MutationResult<T> = Result<T, MutationError>;

impl Mutation {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "add_element",
            Mutation::UpdateElement { .. } => "update_element",
            Mutation::SetBounds { .. } => "set_bounds",
            Mutation::MoveElement { .. } => "move_element",
            Mutation::DeleteElement { .. } => "delete_element",
            Mutation::DuplicateElement { .. } => "duplicate_element",
            Mutation::SetZIndex { .. } => "set_z_index",
            Mutation::BringToFront { .. } => "bring_to_front",
            Mutation::SendToBack { .. } => "send_to_back",
            Mutation::BringForward { .. } => "bring_forward",
            Mutation::SendBackward { .. } => "send_backward",
            Mutation::SetLocked { .. } => "set_locked",
            Mutation::SetVisible { .. } => "set_visible",
            Mutation::AddPage { .. } => "add_page",
            Mutation::DeletePage { .. } => "delete_page",
            Mutation::UpdatePage { .. } => "update_page",
            Mutation::ReorderPage { .. } => "reorder_page",
            Mutation::RenameDocument { .. } => "rename_document",
        }
    }

    /// The element this mutation targets, if any
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Mutation::AddElement { element, .. } => Some(element.id()),
            Mutation::UpdateElement { element_id, .. }
            | Mutation::SetBounds { element_id, .. }
            | Mutation::MoveElement { element_id, .. }
            | Mutation::DeleteElement { element_id, .. }
            | Mutation::DuplicateElement { element_id, .. }
            | Mutation::SetZIndex { element_id, .. }
            | Mutation::BringToFront { element_id, .. }
            | Mutation::SendToBack { element_id, .. }
            | Mutation::BringForward { element_id, .. }
            | Mutation::SendBackward { element_id, .. }
            | Mutation::SetLocked { element_id, .. }
            | Mutation::SetVisible { element_id, .. } => Some(element_id),
            _ => None,
        }
    }

    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> MutationResult<()> {
        self.validate(doc)?;

        match self {
            Mutation::AddElement { page_id, element } => {
                lookup_page_mut(doc, page_id)?.elements.push(element.clone());
                Ok(())
            }

            Mutation::UpdateElement {
                page_id,
                element_id,
                element,
            } => {
                *lookup_element_mut(doc, page_id, element_id)? = element.clone();
                Ok(())
            }

            Mutation::SetBounds {
                page_id,
                element_id,
                bounds,
            } => {
                lookup_element_mut(doc, page_id, element_id)?.base_mut().set_bounds(*bounds);
                Ok(())
            }

            Mutation::MoveElement {
                page_id,
                element_id,
                dx,
                dy,
            } => {
                let element = lookup_element_mut(doc, page_id, element_id)?;
                let moved = element.bounds().translate(*dx, *dy);
                element.base_mut().set_bounds(moved);
                Ok(())
            }

            Mutation::DeleteElement { page_id, element_id } => {
                lookup_page_mut(doc, page_id)?
                    .remove_element(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                Ok(())
            }

            Mutation::DuplicateElement {
                page_id,
                element_id,
                new_id,
            } => Self::apply_duplicate(doc, page_id, element_id, new_id),

            Mutation::SetZIndex {
                page_id,
                element_id,
                z_index,
            } => {
                lookup_element_mut(doc, page_id, element_id)?.base_mut().z_index = *z_index;
                Ok(())
            }

            Mutation::BringToFront { page_id, element_id } => Self::apply_to_edge(doc, page_id, element_id, true),

            Mutation::SendToBack { page_id, element_id } => Self::apply_to_edge(doc, page_id, element_id, false),

            Mutation::BringForward { page_id, element_id } => Self::apply_step(doc, page_id, element_id, true),

            Mutation::SendBackward { page_id, element_id } => Self::apply_step(doc, page_id, element_id, false),

            Mutation::SetLocked {
                page_id,
                element_id,
                locked,
            } => {
                lookup_element_mut(doc, page_id, element_id)?.base_mut().locked = *locked;
                Ok(())
            }

            Mutation::SetVisible {
                page_id,
                element_id,
                visible,
            } => {
                lookup_element_mut(doc, page_id, element_id)?.base_mut().visible = *visible;
                Ok(())
            }

            Mutation::AddPage { page_id, name, index } => {
                let mut page = Page::new(page_id.clone(), name.clone());
                if let Some(first) = doc.pages.first() {
                    page.width = first.width;
                    page.height = first.height;
                }
                let at = index.unwrap_or(doc.pages.len()).min(doc.pages.len());
                doc.pages.insert(at, page);
                Ok(())
            }

            Mutation::DeletePage { page_id } => {
                doc.pages.retain(|p| &p.id != page_id);
                Ok(())
            }

            Mutation::UpdatePage {
                page_id,
                name,
                width,
                height,
                background_color,
                margins,
            } => {
                let page = lookup_page_mut(doc, page_id)?;
                if let Some(name) = name {
                    page.name = name.clone();
                }
                if let Some(width) = width {
                    page.width = *width;
                }
                if let Some(height) = height {
                    page.height = *height;
                }
                if let Some(color) = background_color {
                    page.background_color = color.clone();
                }
                if let Some(margins) = margins {
                    page.margins = *margins;
                }
                Ok(())
            }

            Mutation::ReorderPage { page_id, index } => {
                let from = doc
                    .pages
                    .iter()
                    .position(|p| &p.id == page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                let page = doc.pages.remove(from);
                doc.pages.insert(*index, page);
                Ok(())
            }

            Mutation::RenameDocument { name } => {
                doc.name = name.clone();
                Ok(())
            }
        }
    }

    fn apply_duplicate(doc: &mut Document, page_id: &str, element_id: &str, new_id: &str) -> MutationResult<()> {
        let page = lookup_page_mut(doc, page_id)?;
        let original = page
            .find_element(element_id)
            .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))?;
        let copy = original.clone();
        let z_index = top_z_index(page)?;
        page.elements.push(copy.duplicated(new_id, z_index));
        Ok(())
    }

    fn apply_to_edge(doc: &mut Document, page_id: &str, element_id: &str, front: bool) -> MutationResult<()> {
        let page = lookup_page_mut(doc, page_id)?;
        let current = page
            .find_element(element_id)
            .map(|e| e.z_index())
            .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))?;

        let mut others = page.elements.iter().filter(|e| e.id() != element_id).map(|e| e.z_index());
        let blocked = if front {
            others.any(|z| z >= current)
        } else {
            others.any(|z| z <= current)
        };
        if !blocked {
            return Ok(());
        }

        let z_index = if front { top_z_index(page)? } else { bottom_z_index(page)? };
        if let Some(element) = page.find_element_mut(element_id) {
            element.base_mut().z_index = z_index;
        }
        Ok(())
    }

    /// Swap one step in paint order, then renumber the page's z-indices
    fn apply_step(doc: &mut Document, page_id: &str, element_id: &str, forward: bool) -> MutationResult<()> {
        let page = lookup_page_mut(doc, page_id)?;
        let mut order: Vec<String> = page.paint_order().iter().map(|e| e.id().to_string()).collect();
        let pos = order
            .iter()
            .position(|id| id == element_id)
            .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))?;

        let swap_with = if forward {
            (pos + 1 < order.len()).then_some(pos + 1)
        } else {
            pos.checked_sub(1)
        };
        let Some(other) = swap_with else {
            return Ok(());
        };
        order.swap(pos, other);
        renumber(page, &order)
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> MutationResult<()> {
        match self {
            Mutation::AddElement { page_id, element } => {
                lookup_page(doc, page_id)?;
                if doc.ids().any(|id| id == element.id()) {
                    return Err(MutationError::DuplicateId(element.id().to_string()));
                }
                check_bounds(element.id(), element.bounds())
            }

            Mutation::UpdateElement {
                page_id,
                element_id,
                element,
            } => {
                let existing = lookup_element(doc, page_id, element_id)?;
                if element.id() != element_id {
                    return Err(MutationError::IdMismatch {
                        expected: element_id.clone(),
                        found: element.id().to_string(),
                    });
                }
                if existing.kind() != element.kind() {
                    return Err(MutationError::KindMismatch {
                        expected: existing.kind(),
                        found: element.kind(),
                    });
                }
                if existing.is_locked() && existing.bounds() != element.bounds() {
                    return Err(MutationError::ElementLocked(element_id.clone()));
                }
                check_bounds(element_id, element.bounds())
            }

            Mutation::SetBounds {
                page_id,
                element_id,
                bounds,
            } => {
                unlocked(doc, page_id, element_id)?;
                check_bounds(element_id, *bounds)
            }

            Mutation::MoveElement {
                page_id,
                element_id,
                dx,
                dy,
            } => {
                let existing = unlocked(doc, page_id, element_id)?;
                check_bounds(element_id, existing.bounds().translate(*dx, *dy))
            }

            Mutation::DeleteElement { page_id, element_id } => {
                unlocked(doc, page_id, element_id)?;
                Ok(())
            }

            Mutation::DuplicateElement {
                page_id,
                element_id,
                new_id,
            } => {
                lookup_element(doc, page_id, element_id)?;
                if doc.ids().any(|id| id == new_id) {
                    return Err(MutationError::DuplicateId(new_id.clone()));
                }
                Ok(())
            }

            Mutation::SetZIndex { page_id, element_id, .. }
            | Mutation::BringToFront { page_id, element_id }
            | Mutation::SendToBack { page_id, element_id }
            | Mutation::BringForward { page_id, element_id }
            | Mutation::SendBackward { page_id, element_id }
            | Mutation::SetLocked { page_id, element_id, .. }
            | Mutation::SetVisible { page_id, element_id, .. } => {
                lookup_element(doc, page_id, element_id)?;
                Ok(())
            }

            Mutation::AddPage { page_id, .. } => {
                if doc.ids().any(|id| id == page_id) {
                    return Err(MutationError::DuplicateId(page_id.clone()));
                }
                Ok(())
            }

            Mutation::DeletePage { page_id } => {
                lookup_page(doc, page_id)?;
                if doc.pages.len() <= 1 {
                    return Err(MutationError::LastPage);
                }
                Ok(())
            }

            Mutation::UpdatePage {
                page_id, width, height, ..
            } => {
                lookup_page(doc, page_id)?;
                for value in [width, height].into_iter().flatten() {
                    if !(value.is_finite() && *value > 0.0) {
                        return Err(MutationError::InvalidGeometry(format!(
                            "page {} dimension {}",
                            page_id, value
                        )));
                    }
                }
                Ok(())
            }

            Mutation::ReorderPage { page_id, index } => {
                lookup_page(doc, page_id)?;
                if *index >= doc.pages.len() {
                    return Err(MutationError::IndexOutOfRange {
                        index: *index,
                        len: doc.pages.len(),
                    });
                }
                Ok(())
            }

            Mutation::RenameDocument { .. } => Ok(()),
        }
    }
}

fn lookup_page<'a>(doc: &'a Document, page_id: &str) -> MutationResult<&'a Page> {
    doc.page(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))
}

fn lookup_page_mut<'a>(doc: &'a mut Document, page_id: &str) -> MutationResult<&'a mut Page> {
    doc.page_mut(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))
}

/// Assign z-indices `0..n` following `order`
fn renumber(page: &mut Page, order: &[String]) -> MutationResult<()> {
    for (z_index, id) in order.iter().enumerate() {
        let z_index = i32::try_from(z_index).map_err(|_| MutationError::ZIndexOverflow(page.id.clone()))?;
        if let Some(element) = page.find_element_mut(id) {
            element.base_mut().z_index = z_index;
        }
    }
    Ok(())
}

fn renumber_paint_order(page: &mut Page) -> MutationResult<()> {
    let order: Vec<String> = page.paint_order().iter().map(|e| e.id().to_string()).collect();
    renumber(page, &order)
}

/// A z-index above every element on the page. Renumbers the page first when
/// the current top is `i32::MAX`.
fn top_z_index(page: &mut Page) -> MutationResult<i32> {
    let Some(max) = page.max_z_index() else {
        return Ok(0);
    };
    if let Some(z_index) = max.checked_add(1) {
        return Ok(z_index);
    }

    renumber_paint_order(page)?;
    i32::try_from(page.elements.len()).map_err(|_| MutationError::ZIndexOverflow(page.id.clone()))
}

/// A z-index below every element on the page, renumbering at `i32::MIN`
fn bottom_z_index(page: &mut Page) -> MutationResult<i32> {
    let Some(min) = page.min_z_index() else {
        return Ok(0);
    };
    if let Some(z_index) = min.checked_sub(1) {
        return Ok(z_index);
    }

    renumber_paint_order(page)?;
    Ok(-1)
}

fn lookup_element<'a>(doc: &'a Document, page_id: &str, element_id: &str) -> MutationResult<&'a DesignerElement> {
    lookup_page(doc, page_id)?
        .find_element(element_id)
        .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))
}

fn lookup_element_mut<'a>(doc: &'a mut Document, page_id: &str, element_id: &str) -> MutationResult<&'a mut DesignerElement> {
    lookup_page_mut(doc, page_id)?
        .find_element_mut(element_id)
        .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))
}

fn unlocked<'a>(doc: &'a Document, page_id: &str, element_id: &str) -> MutationResult<&'a DesignerElement> {
    let existing = lookup_element(doc, page_id, element_id)?;
    if existing.is_locked() {
        return Err(MutationError::ElementLocked(element_id.to_string()));
    }
    Ok(existing)
}

fn check_bounds(element_id: &str, bounds: Bounds) -> MutationResult<()> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(MutationError::InvalidGeometry(format!(
            "element {} bounds {}x{} at ({}, {})",
            element_id, bounds.width, bounds.height, bounds.x, bounds.y
        )))
    }
}
