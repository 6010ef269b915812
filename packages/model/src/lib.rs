//! # Certkit Model
//!
//! The certificate document tree: documents, pages and the closed set of
//! designer element kinds, plus the data bindings that connect template
//! variables to record fields.
//!
//! ```text
//! Document
//!  ├─ metadata (created/updated, version, tags)
//!  ├─ settings (unit, dpi, color profile, bleed)
//!  └─ pages[]
//!       ├─ geometry (width, height, background, margins)
//!       └─ elements[]  (painted by z-index)
//!            └─ DesignerElement::{Text, Image, ..., TemplateVariable}
//! ```
//!
//! Every type round-trips through JSON, which is the persisted template
//! format. Unknown element kinds fail deserialization.

mod binding;
mod document;
mod element;
mod error;
mod factory;
mod id_generator;

pub use binding::{DataBinding, TextTransform, ValueType};
pub use document::{
    ColorProfile, Document, DocumentMetadata, DocumentSettings, Margins, Page, Unit, DEFAULT_PAGE_HEIGHT,
    DEFAULT_PAGE_WIDTH,
};
pub use element::{
    ArrowElement, BarcodeElement, BarcodeFormat, ChartElement, ChartKind, ChartPoint, DesignerElement, ElementBase,
    ElementKind, IconElement, DUPLICATE_OFFSET, ImageElement, ImageFit, LineElement, QrCodeElement, QrErrorCorrection, ShapeElement,
    ShapeKind, SignatureElement, TableElement, TemplateVariableElement, TextAlign, TextElement, TextStyle,
};
pub use error::{ModelError, ModelResult};
pub use factory::ElementFactory;
pub use id_generator::{get_document_id, IDGenerator};

pub use certkit_geometry::Bounds;
