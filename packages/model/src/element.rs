//! # Designer Elements
//!
//! A closed set of element kinds. Each variant carries the shared
//! [`ElementBase`] (identity, geometry, visibility) and only the properties
//! that make sense for that kind.
//!
//! The `type` tag is fixed at creation. Changing the kind of an element
//! means creating a new element.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::binding::{DataBinding, TextTransform};
use crate::error::{ModelError, ModelResult};
use certkit_geometry::Bounds;

/// Offset applied to duplicated elements
pub const DUPLICATE_OFFSET: f64 = 10.0;

fn default_opacity() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Identity, geometry and visibility shared by every element kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise around the center
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub z_index: i32,
}

impl ElementBase {
    pub fn new(id: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            name: None,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
            z_index: 0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

/// Typography for text-bearing elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub italic: bool,
    pub underline: bool,
    pub color: String,
    pub align: TextAlign,
    pub line_height: f64,
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Georgia".to_string(),
            font_size: 24.0,
            font_weight: "normal".to_string(),
            italic: false,
            underline: false,
            color: "#1f2937".to_string(),
            align: TextAlign::Center,
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }
}

// ============================================================================
// KIND-SPECIFIC PROPERTIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(flatten)]
    pub base: ElementBase,
    /// Image reference (URL or asset id); resolved by the renderer
    pub src: String,
    #[serde(default)]
    pub fit: ImageFit,
    #[serde(default)]
    pub border_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Star,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(default)]
    pub shape: ShapeKind,
    pub fill: String,
    pub stroke: String,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureElement {
    #[serde(flatten)]
    pub base: ElementBase,
    /// Signature image reference, if one was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub signer_name: String,
    #[serde(default)]
    pub signer_title: String,
    #[serde(default = "default_true")]
    pub show_line: bool,
    pub line_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QrErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeElement {
    #[serde(flatten)]
    pub base: ElementBase,
    /// Static payload, used when no binding is set or the binding is empty
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<DataBinding>,
    pub foreground: String,
    pub background: String,
    #[serde(default)]
    pub error_correction: QrErrorCorrection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    #[default]
    Code128,
    Code39,
    Ean13,
    Upc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<DataBinding>,
    #[serde(default)]
    pub format: BarcodeFormat,
    #[serde(default = "default_true")]
    pub show_text: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub stroke: String,
    pub stroke_width: f64,
    pub head_size: f64,
    #[serde(default)]
    pub double_headed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconElement {
    #[serde(flatten)]
    pub base: ElementBase,
    /// Icon name in the renderer's icon set
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(default)]
    pub chart: ChartKind,
    #[serde(default)]
    pub series: Vec<ChartPoint>,
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    #[serde(default = "default_true")]
    pub header: bool,
    pub border_color: String,
    #[serde(default)]
    pub style: TextStyle,
}

/// A bound element: its text comes from a field of the data record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariableElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub binding: DataBinding,
    /// Design-time text; also shown when an optional field is empty
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default)]
    pub transform: TextTransform,
    #[serde(default)]
    pub style: TextStyle,
}

// ============================================================================
// ELEMENT ENUM
// ============================================================================

/// Tag of a [`DesignerElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
    Signature,
    QrCode,
    Barcode,
    Line,
    Arrow,
    Icon,
    Chart,
    Table,
    TemplateVariable,
}

impl ElementKind {
    pub const ALL: [ElementKind; 12] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Shape,
        ElementKind::Signature,
        ElementKind::QrCode,
        ElementKind::Barcode,
        ElementKind::Line,
        ElementKind::Arrow,
        ElementKind::Icon,
        ElementKind::Chart,
        ElementKind::Table,
        ElementKind::TemplateVariable,
    ];

    /// Serialized `type` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Shape => "shape",
            ElementKind::Signature => "signature",
            ElementKind::QrCode => "qr-code",
            ElementKind::Barcode => "barcode",
            ElementKind::Line => "line",
            ElementKind::Arrow => "arrow",
            ElementKind::Icon => "icon",
            ElementKind::Chart => "chart",
            ElementKind::Table => "table",
            ElementKind::TemplateVariable => "template-variable",
        }
    }

    pub fn from_tag(tag: &str) -> ModelResult<Self> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ModelError::UnknownElementKind(tag.to_string()))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any element that can be placed on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DesignerElement {
    Text(TextElement),
    Image(ImageElement),
    Shape(ShapeElement),
    Signature(SignatureElement),
    QrCode(QrCodeElement),
    Barcode(BarcodeElement),
    Line(LineElement),
    Arrow(ArrowElement),
    Icon(IconElement),
    Chart(ChartElement),
    Table(TableElement),
    TemplateVariable(TemplateVariableElement),
}

impl DesignerElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            DesignerElement::Text(_) => ElementKind::Text,
            DesignerElement::Image(_) => ElementKind::Image,
            DesignerElement::Shape(_) => ElementKind::Shape,
            DesignerElement::Signature(_) => ElementKind::Signature,
            DesignerElement::QrCode(_) => ElementKind::QrCode,
            DesignerElement::Barcode(_) => ElementKind::Barcode,
            DesignerElement::Line(_) => ElementKind::Line,
            DesignerElement::Arrow(_) => ElementKind::Arrow,
            DesignerElement::Icon(_) => ElementKind::Icon,
            DesignerElement::Chart(_) => ElementKind::Chart,
            DesignerElement::Table(_) => ElementKind::Table,
            DesignerElement::TemplateVariable(_) => ElementKind::TemplateVariable,
        }
    }

    pub fn base(&self) -> &ElementBase {
        match self {
            DesignerElement::Text(e) => &e.base,
            DesignerElement::Image(e) => &e.base,
            DesignerElement::Shape(e) => &e.base,
            DesignerElement::Signature(e) => &e.base,
            DesignerElement::QrCode(e) => &e.base,
            DesignerElement::Barcode(e) => &e.base,
            DesignerElement::Line(e) => &e.base,
            DesignerElement::Arrow(e) => &e.base,
            DesignerElement::Icon(e) => &e.base,
            DesignerElement::Chart(e) => &e.base,
            DesignerElement::Table(e) => &e.base,
            DesignerElement::TemplateVariable(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            DesignerElement::Text(e) => &mut e.base,
            DesignerElement::Image(e) => &mut e.base,
            DesignerElement::Shape(e) => &mut e.base,
            DesignerElement::Signature(e) => &mut e.base,
            DesignerElement::QrCode(e) => &mut e.base,
            DesignerElement::Barcode(e) => &mut e.base,
            DesignerElement::Line(e) => &mut e.base,
            DesignerElement::Arrow(e) => &mut e.base,
            DesignerElement::Icon(e) => &mut e.base,
            DesignerElement::Chart(e) => &mut e.base,
            DesignerElement::Table(e) => &mut e.base,
            DesignerElement::TemplateVariable(e) => &mut e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn bounds(&self) -> Bounds {
        self.base().bounds()
    }

    pub fn z_index(&self) -> i32 {
        self.base().z_index
    }

    pub fn is_locked(&self) -> bool {
        self.base().locked
    }

    /// The data binding driving this element, if any
    pub fn binding(&self) -> Option<&DataBinding> {
        match self {
            DesignerElement::TemplateVariable(e) => Some(&e.binding),
            DesignerElement::QrCode(e) => e.binding.as_ref(),
            DesignerElement::Barcode(e) => e.binding.as_ref(),
            _ => None,
        }
    }

    pub fn as_template_variable(&self) -> Option<&TemplateVariableElement> {
        match self {
            DesignerElement::TemplateVariable(e) => Some(e),
            _ => None,
        }
    }

    /// Copy under a new id, offset so the copy is visible, unlocked
    pub fn duplicated(&self, id: impl Into<String>, z_index: i32) -> DesignerElement {
        let mut copy = self.clone();
        let base = copy.base_mut();
        base.id = id.into();
        base.x += DUPLICATE_OFFSET;
        base.y += DUPLICATE_OFFSET;
        base.z_index = z_index;
        base.locked = false;
        copy
    }

    /// Check the at-rest geometry invariant (finite, positive size)
    pub fn validate_geometry(&self) -> ModelResult<()> {
        let base = self.base();
        if base.bounds().is_valid() {
            Ok(())
        } else {
            Err(ModelError::InvalidGeometry {
                id: base.id.clone(),
                width: base.width,
                height: base.height,
            })
        }
    }
}
