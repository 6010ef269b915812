//! # Certkit Binding
//!
//! Resolution of data bindings against a data record.
//!
//! ```text
//! record + fieldPath ──> field_path::resolve ──> Option<&Value>
//!                                                   │
//!                    absent? ── required ──> "[required: Label]"
//!                       │   └─ optional ──> placeholder / "[Label]"
//!                       ▼
//!             ValueFormatter (text / number / date)
//!                       ▼
//!             transform (case) ──> prefix + text + suffix
//! ```
//!
//! Every step is total. Bad data degrades to visible text instead of errors.
//!
//! ```
//! use certkit_binding::TemplateVariableResolver;
//! use certkit_model::{DataBinding, DesignerElement, ElementFactory, IDGenerator};
//! use serde_json::json;
//!
//! let mut factory = ElementFactory::new(IDGenerator::from_seed("doc"));
//! let element = factory.template_variable(DataBinding::new("course.title", "Course"), 0.0, 0.0);
//! let DesignerElement::TemplateVariable(tv) = element else { unreachable!() };
//!
//! let resolver = TemplateVariableResolver::default();
//! assert_eq!(resolver.resolve_display_text(&tv, &json!({})), "[Course]");
//! ```

mod catalog;
mod date;
mod error;
mod field_path;
mod formatter;
mod resolver;
mod transform;

pub use catalog::{FieldCatalog, FieldSection};
pub use date::{parse_iso, translate_pattern, DateFormatter, PatternDateFormatter, DEFAULT_DATE_PATTERN, DEFAULT_LOCALE};
pub use error::{DateFormatError, DateFormatResult};
pub use field_path::{is_absent, resolve, FieldPath, Segment};
pub use formatter::{apply_number_pattern, stringify, FormatOutcome, ValueFormatter};
pub use resolver::{label_placeholder, required_marker, RequiredFieldReport, ResolverOptions, TemplateVariableResolver};
pub use transform::transform;
