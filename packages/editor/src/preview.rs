//! # Preview Rendering
//!
//! Turns a design-time document plus a data record into a purely textual
//! [`RenderedDocument`]: every visible element becomes a [`RenderNode`]
//! with its final bounds and its resolved text or image reference.
//!
//! The result is handed to a [`Renderer`]. Nothing here draws pixels.

use certkit_binding::{stringify, ResolverOptions, TemplateVariableResolver};
use certkit_geometry::Bounds;
use certkit_model::{DesignerElement, Document, ElementKind, Page, TextStyle};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderContent {
    Text { text: String, style: TextStyle },
    Image { src: String },
    /// QR code or barcode payload
    Code { data: String },
    /// Shapes, lines, charts and other non-textual elements
    Graphic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub element_id: String,
    pub kind: ElementKind,
    pub bounds: Bounds,
    pub rotation: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub content: RenderContent,
}

impl RenderNode {
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            RenderContent::Text { text, .. } => Some(text),
            RenderContent::Code { data } => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page_id: String,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Back-to-front
    pub nodes: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub document_id: String,
    pub name: String,
    pub pages: Vec<RenderedPage>,
}

impl RenderedDocument {
    pub fn nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.pages.iter().flat_map(|p| p.nodes.iter())
    }

    pub fn node(&self, element_id: &str) -> Option<&RenderNode> {
        self.nodes().find(|n| n.element_id == element_id)
    }
}

/// Rendering collaborator
pub trait Renderer {
    type Output;

    fn render(&mut self, doc: &RenderedDocument) -> Self::Output;
}

/// One line per node, for terminals and snapshots
#[derive(Debug, Default)]
pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    type Output = String;

    fn render(&mut self, doc: &RenderedDocument) -> String {
        let mut out = format!("# {}\n", doc.name);
        for page in &doc.pages {
            out.push_str(&format!("## {} ({}x{})\n", page.page_id, page.width, page.height));
            for node in &page.nodes {
                let b = node.bounds;
                let body = match &node.content {
                    RenderContent::Text { text, .. } => format!("{:?}", text),
                    RenderContent::Image { src } => format!("image {}", src),
                    RenderContent::Code { data } => format!("code {:?}", data),
                    RenderContent::Graphic => "graphic".to_string(),
                };
                out.push_str(&format!(
                    "{} [{}] @({}, {}) {}x{}: {}\n",
                    node.element_id, node.kind, b.x, b.y, b.width, b.height, body
                ));
            }
        }
        out
    }
}

/// Resolves documents against records
#[derive(Default)]
pub struct DocumentRenderer {
    resolver: TemplateVariableResolver,
}

impl DocumentRenderer {
    pub fn new(resolver: TemplateVariableResolver) -> Self {
        Self { resolver }
    }

    pub fn with_options(options: &ResolverOptions) -> Self {
        Self::new(TemplateVariableResolver::with_options(options))
    }

    pub fn resolver(&self) -> &TemplateVariableResolver {
        &self.resolver
    }

    /// Render `doc` with every binding resolved against `record`
    #[instrument(skip(self, doc, record), fields(document = %doc.id, pages = doc.pages.len()))]
    pub fn render_document(&self, doc: &Document, record: &Value) -> RenderedDocument {
        self.render_with(doc, Some(record))
    }

    /// Render `doc` as the design canvas shows it, without data
    pub fn render_design(&self, doc: &Document) -> RenderedDocument {
        self.render_with(doc, None)
    }

    fn render_with(&self, doc: &Document, record: Option<&Value>) -> RenderedDocument {
        RenderedDocument {
            document_id: doc.id.clone(),
            name: doc.name.clone(),
            pages: doc.pages.iter().map(|page| self.render_page(page, record)).collect(),
        }
    }

    fn render_page(&self, page: &Page, record: Option<&Value>) -> RenderedPage {
        let nodes = page
            .paint_order()
            .into_iter()
            .filter(|e| e.base().visible)
            .map(|e| self.render_element(e, record))
            .collect();

        RenderedPage {
            page_id: page.id.clone(),
            width: page.width,
            height: page.height,
            background_color: page.background_color.clone(),
            nodes,
        }
    }

    fn render_element(&self, element: &DesignerElement, record: Option<&Value>) -> RenderNode {
        let content = match element {
            DesignerElement::Text(e) => RenderContent::Text {
                text: e.content.clone(),
                style: e.style.clone(),
            },
            DesignerElement::TemplateVariable(e) => RenderContent::Text {
                text: match record {
                    Some(record) => self.resolver.resolve_display_text(e, record),
                    None => TemplateVariableResolver::design_text(e),
                },
                style: e.style.clone(),
            },
            DesignerElement::Image(e) => RenderContent::Image { src: e.src.clone() },
            DesignerElement::Signature(e) => match &e.src {
                Some(src) => RenderContent::Image { src: src.clone() },
                None => RenderContent::Text {
                    text: e.signer_name.clone(),
                    style: TextStyle::default(),
                },
            },
            DesignerElement::QrCode(e) => RenderContent::Code {
                data: self.code_data(&e.data, e.binding.as_ref(), record),
            },
            DesignerElement::Barcode(e) => RenderContent::Code {
                data: self.code_data(&e.data, e.binding.as_ref(), record),
            },
            _ => RenderContent::Graphic,
        };

        let base = element.base();
        RenderNode {
            element_id: base.id.clone(),
            kind: element.kind(),
            bounds: base.bounds(),
            rotation: base.rotation,
            opacity: base.opacity,
            z_index: base.z_index,
            content,
        }
    }

    fn code_data(
        &self,
        static_data: &str,
        binding: Option<&certkit_model::DataBinding>,
        record: Option<&Value>,
    ) -> String {
        match (binding, record) {
            (Some(binding), Some(record)) => self
                .resolver
                .resolve_value_text(binding, record)
                .unwrap_or_else(|| static_data.to_string()),
            (Some(binding), None) if static_data.is_empty() => binding
                .default_value()
                .map(stringify)
                .unwrap_or_else(|| static_data.to_string()),
            _ => static_data.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certkit_model::{DataBinding, ElementFactory, IDGenerator};
    use serde_json::json;

    fn document() -> (Document, Vec<String>) {
        let mut doc = Document::new("Preview");
        let mut factory = ElementFactory::new(IDGenerator::from_seed("p"));

        let mut name = factory.template_variable(
            DataBinding::new("user.fullName", "Full Name").with_required(true),
            100.0,
            300.0,
        );
        name.base_mut().z_index = 2;

        let mut frame = factory.create(ElementKind::Shape);
        frame.base_mut().z_index = 0;

        let mut hidden = factory.create(ElementKind::Text);
        hidden.base_mut().visible = false;

        let mut qr = factory.create(ElementKind::QrCode);
        qr.base_mut().z_index = 1;
        if let DesignerElement::QrCode(e) = &mut qr {
            e.binding = Some(DataBinding::new("certificate.verifyUrl", "Verify"));
        }

        let ids = [&name, &frame, &hidden, &qr].iter().map(|e| e.id().to_string()).collect();
        doc.pages[0].elements = vec![name, frame, hidden, qr];
        (doc, ids)
    }

    #[test]
    fn test_render_sorts_by_z_and_skips_hidden() {
        let (doc, ids) = document();
        let rendered = DocumentRenderer::default().render_document(&doc, &json!({}));

        let order: Vec<_> = rendered.nodes().map(|n| n.element_id.clone()).collect();
        assert_eq!(order, vec![ids[1].clone(), ids[3].clone(), ids[0].clone()]);
        assert!(rendered.node(&ids[2]).is_none());
    }

    #[test]
    fn test_render_resolves_bindings() {
        let (doc, ids) = document();
        let record = json!({
            "user": { "fullName": "Jane Doe" },
            "certificate": { "verifyUrl": "https://verify.example.com/abc" }
        });
        let rendered = DocumentRenderer::default().render_document(&doc, &record);

        assert_eq!(rendered.node(&ids[0]).and_then(|n| n.text()), Some("Jane Doe"));
        assert_eq!(
            rendered.node(&ids[3]).and_then(|n| n.text()),
            Some("https://verify.example.com/abc")
        );
    }

    #[test]
    fn test_code_falls_back_to_static_data() {
        let (doc, ids) = document();
        let rendered = DocumentRenderer::default().render_document(&doc, &json!({}));

        assert_eq!(
            rendered.node(&ids[3]).and_then(|n| n.text()),
            Some("https://example.com/verify")
        );
        assert_eq!(
            rendered.node(&ids[0]).and_then(|n| n.text()),
            Some("[required: Full Name]")
        );
    }

    #[test]
    fn test_design_render_shows_field_path() {
        let (doc, ids) = document();
        let rendered = DocumentRenderer::default().render_design(&doc);

        assert_eq!(rendered.node(&ids[0]).and_then(|n| n.text()), Some("{{user.fullName}}"));
    }

    #[test]
    fn test_plain_text_renderer() {
        let (doc, ids) = document();
        let rendered = DocumentRenderer::default().render_document(&doc, &json!({ "user": { "fullName": "Jane" } }));
        let text = PlainTextRenderer.render(&rendered);

        assert!(text.starts_with("# Preview\n"));
        assert!(text.contains(&format!("{} [template-variable]", ids[0])));
        assert!(text.contains("\"Jane\""));
        assert!(text.contains("graphic"));
    }

    #[test]
    fn test_rendered_json_shape() {
        let (doc, _) = document();
        let rendered = DocumentRenderer::default().render_document(&doc, &json!({}));
        let value = serde_json::to_value(&rendered).unwrap();

        assert_eq!(value["pages"][0]["nodes"][0]["kind"], "shape");
        assert_eq!(value["pages"][0]["nodes"][0]["content"]["type"], "graphic");
    }
}
