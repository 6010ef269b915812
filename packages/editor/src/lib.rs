//! # Certkit Editor
//!
//! Editing engine for certificate templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Document, Page, DesignerElement      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + mutations                 │
//! │  - Validated mutations, one history entry   │
//! │  - Snapshot undo/redo                       │
//! │  - Drag protocol for resize and move        │
//! │  - Open/save through a TemplateStore        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ preview / issuance: Document + record       │
//! │  → RenderedDocument (one per record)        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use certkit_editor::{EditSession, Mutation};
//! use certkit_model::{Document, ElementKind};
//!
//! let mut session = EditSession::new(Document::new("Completion"));
//! let page_id = session.document().pages[0].id.clone();
//!
//! let id = session.create_element(&page_id, ElementKind::Text, 40.0, 40.0).unwrap();
//! session
//!     .apply(Mutation::MoveElement { page_id, element_id: id.clone(), dx: 10.0, dy: 0.0 })
//!     .unwrap();
//!
//! session.undo().unwrap();
//! assert_eq!(session.document().find_element(&id).map(|(_, e)| e.bounds().x), Some(40.0));
//! ```

mod errors;
mod history;
mod issuance;
mod mutations;
mod preview;
mod session;

pub use errors::{DragError, EditorError, EditorResult};
pub use history::{DocumentHistory, HistoryState, DEFAULT_HISTORY_LIMIT};
pub use issuance::{BatchIssuer, IssueError, IssuedCertificate, RecordIssues};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use preview::{
    DocumentRenderer, PlainTextRenderer, RenderContent, RenderNode, RenderedDocument, RenderedPage, Renderer,
};
pub use session::{DragKind, DragState, EditSession, EditorConfig, Selection};
