//! Element factory: fresh ids plus sensible per-kind defaults
//!
//! Defaults carry example content so a newly dropped element is visible
//! and meaningful on the canvas right away.

use certkit_geometry::Bounds;

use crate::binding::{DataBinding, TextTransform, ValueType};
use crate::element::*;
use crate::error::ModelResult;
use crate::id_generator::IDGenerator;

#[derive(Debug, Clone)]
pub struct ElementFactory {
    ids: IDGenerator,
}

impl ElementFactory {
    pub fn new(ids: IDGenerator) -> Self {
        Self { ids }
    }

    pub fn next_id(&mut self) -> String {
        self.ids.new_id()
    }

    /// Default size for a freshly created element of `kind`
    pub fn default_size(kind: ElementKind) -> (f64, f64) {
        match kind {
            ElementKind::Text => (300.0, 40.0),
            ElementKind::Image => (160.0, 120.0),
            ElementKind::Shape => (200.0, 120.0),
            ElementKind::Signature => (220.0, 90.0),
            ElementKind::QrCode => (120.0, 120.0),
            ElementKind::Barcode => (240.0, 80.0),
            ElementKind::Line => (300.0, 8.0),
            ElementKind::Arrow => (200.0, 24.0),
            ElementKind::Icon => (48.0, 48.0),
            ElementKind::Chart => (320.0, 200.0),
            ElementKind::Table => (400.0, 160.0),
            ElementKind::TemplateVariable => (360.0, 44.0),
        }
    }

    /// Create an element of `kind` at the default position
    pub fn create(&mut self, kind: ElementKind) -> DesignerElement {
        self.create_at(kind, 100.0, 100.0)
    }

    /// Create an element from its serialized `type` tag
    pub fn create_from_tag(&mut self, tag: &str) -> ModelResult<DesignerElement> {
        let kind = ElementKind::from_tag(tag)?;
        Ok(self.create(kind))
    }

    /// Create an element of `kind` with its top-left corner at `(x, y)`
    pub fn create_at(&mut self, kind: ElementKind, x: f64, y: f64) -> DesignerElement {
        let (width, height) = Self::default_size(kind);
        let base = ElementBase::new(self.next_id(), Bounds::new(x, y, width, height));

        match kind {
            ElementKind::Text => DesignerElement::Text(TextElement {
                base,
                content: "Certificate of Completion".to_string(),
                style: TextStyle::default(),
            }),
            ElementKind::Image => DesignerElement::Image(ImageElement {
                base,
                src: String::new(),
                fit: ImageFit::Contain,
                border_radius: 0.0,
            }),
            ElementKind::Shape => DesignerElement::Shape(ShapeElement {
                base,
                shape: ShapeKind::Rectangle,
                fill: "#f3f4f6".to_string(),
                stroke: "#9ca3af".to_string(),
                stroke_width: 1.0,
                corner_radius: 0.0,
            }),
            ElementKind::Signature => DesignerElement::Signature(SignatureElement {
                base,
                src: None,
                signer_name: "Signatory".to_string(),
                signer_title: "Director".to_string(),
                show_line: true,
                line_color: "#111827".to_string(),
            }),
            ElementKind::QrCode => DesignerElement::QrCode(QrCodeElement {
                base,
                data: "https://example.com/verify".to_string(),
                binding: None,
                foreground: "#000000".to_string(),
                background: "#ffffff".to_string(),
                error_correction: QrErrorCorrection::M,
            }),
            ElementKind::Barcode => DesignerElement::Barcode(BarcodeElement {
                base,
                data: "CERT-0001".to_string(),
                binding: None,
                format: BarcodeFormat::Code128,
                show_text: true,
            }),
            ElementKind::Line => DesignerElement::Line(LineElement {
                base,
                stroke: "#111827".to_string(),
                stroke_width: 2.0,
                dash: Vec::new(),
            }),
            ElementKind::Arrow => DesignerElement::Arrow(ArrowElement {
                base,
                stroke: "#111827".to_string(),
                stroke_width: 2.0,
                head_size: 10.0,
                double_headed: false,
            }),
            ElementKind::Icon => DesignerElement::Icon(IconElement {
                base,
                icon: "award".to_string(),
                color: "#b45309".to_string(),
            }),
            ElementKind::Chart => DesignerElement::Chart(ChartElement {
                base,
                chart: ChartKind::Bar,
                series: vec![
                    ChartPoint { label: "Module 1".to_string(), value: 80.0 },
                    ChartPoint { label: "Module 2".to_string(), value: 95.0 },
                ],
                colors: vec!["#2563eb".to_string()],
            }),
            ElementKind::Table => DesignerElement::Table(TableElement {
                base,
                columns: vec!["Module".to_string(), "Score".to_string()],
                rows: vec![vec!["Introduction".to_string(), "100".to_string()]],
                header: true,
                border_color: "#d1d5db".to_string(),
                style: TextStyle {
                    font_size: 14.0,
                    align: TextAlign::Left,
                    ..TextStyle::default()
                },
            }),
            ElementKind::TemplateVariable => DesignerElement::TemplateVariable(TemplateVariableElement {
                base,
                binding: DataBinding::new("user.fullName", "Full Name")
                    .with_value_type(ValueType::Text)
                    .with_required(true),
                placeholder: String::new(),
                prefix: None,
                suffix: None,
                transform: TextTransform::None,
                style: TextStyle {
                    font_size: 36.0,
                    font_weight: "bold".to_string(),
                    ..TextStyle::default()
                },
            }),
        }
    }

    /// Create a template variable bound to `binding`
    pub fn template_variable(&mut self, binding: DataBinding, x: f64, y: f64) -> DesignerElement {
        let mut element = self.create_at(ElementKind::TemplateVariable, x, y);
        if let DesignerElement::TemplateVariable(tv) = &mut element {
            tv.binding = binding;
        }
        element
    }

    /// Copy `element` under a fresh id, offset and placed on top
    pub fn duplicate(&mut self, element: &DesignerElement, z_index: i32) -> DesignerElement {
        element.duplicated(self.next_id(), z_index)
    }
}
