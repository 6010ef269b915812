use certkit_model::{DataBinding, DesignerElement, Document, Page};

/// Visitor pattern for traversing a document immutably
///
/// Default implementations walk the entire tree. Override specific visit_*
/// methods to act on the nodes you care about.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_page(&mut self, page: &Page) {
        walk_page(self, page);
    }

    fn visit_element(&mut self, page: &Page, element: &DesignerElement) {
        walk_element(self, page, element);
    }

    fn visit_binding(&mut self, _page: &Page, _element: &DesignerElement, _binding: &DataBinding) {
        // Leaf node
    }
}

/// Mutable visitor pattern for transforming a document
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        walk_document_mut(self, doc);
    }

    fn visit_page_mut(&mut self, page: &mut Page) {
        walk_page_mut(self, page);
    }

    fn visit_element_mut(&mut self, element: &mut DesignerElement) {
        walk_element_mut(self, element);
    }

    fn visit_binding_mut(&mut self, _binding: &mut DataBinding) {
        // Leaf node
    }
}

// Default walk implementations for immutable visitor

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for page in &doc.pages {
        visitor.visit_page(page);
    }
}

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &Page) {
    for element in &page.elements {
        visitor.visit_element(page, element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, page: &Page, element: &DesignerElement) {
    if let Some(binding) = element.binding() {
        visitor.visit_binding(page, element, binding);
    }
}

// Default walk implementations for mutable visitor

pub fn walk_document_mut<V: VisitorMut>(visitor: &mut V, doc: &mut Document) {
    for page in &mut doc.pages {
        visitor.visit_page_mut(page);
    }
}

pub fn walk_page_mut<V: VisitorMut>(visitor: &mut V, page: &mut Page) {
    for element in &mut page.elements {
        visitor.visit_element_mut(element);
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut DesignerElement) {
    let binding = match element {
        DesignerElement::TemplateVariable(e) => Some(&mut e.binding),
        DesignerElement::QrCode(e) => e.binding.as_mut(),
        DesignerElement::Barcode(e) => e.binding.as_mut(),
        _ => None,
    };
    if let Some(binding) = binding {
        visitor.visit_binding_mut(binding);
    }
}

/// A binding together with where it lives
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    pub page_id: String,
    pub element_id: String,
    pub binding: DataBinding,
}

/// Collects every binding in document order
#[derive(Default)]
pub struct BindingCollector {
    pub fields: Vec<BoundField>,
}

impl Visitor for BindingCollector {
    fn visit_binding(&mut self, page: &Page, element: &DesignerElement, binding: &DataBinding) {
        self.fields.push(BoundField {
            page_id: page.id.clone(),
            element_id: element.id().to_string(),
            binding: binding.clone(),
        });
    }
}

pub fn collect_bindings(doc: &Document) -> Vec<BoundField> {
    let mut collector = BindingCollector::default();
    collector.visit_document(doc);
    collector.fields
}

/// Field paths a record must supply, deduplicated, in first-use order
pub fn required_field_paths(doc: &Document) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for field in collect_bindings(doc) {
        let path = field.binding.field_path();
        if field.binding.is_required() && !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }
    paths
}

/// Rewrites every binding that reads `from` to read `to` instead
///
/// Label, type and formatting of the binding are preserved.
pub struct RebindField {
    pub from: String,
    pub to: String,
    pub rebound: usize,
}

impl RebindField {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rebound: 0,
        }
    }
}

impl VisitorMut for RebindField {
    fn visit_binding_mut(&mut self, binding: &mut DataBinding) {
        if binding.field_path() == self.from {
            *binding = binding.clone().with_field_path(self.to.clone());
            self.rebound += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certkit_model::{ElementFactory, ElementKind, IDGenerator};

    fn sample() -> Document {
        let mut factory = ElementFactory::new(IDGenerator::from_seed("t"));
        let mut doc = Document::new("Sample");

        let name = factory.template_variable(
            DataBinding::new("user.fullName", "Full Name").with_required(true),
            100.0,
            100.0,
        );
        let course = factory.template_variable(
            DataBinding::new("course.title", "Course"),
            100.0,
            200.0,
        );
        let again = factory.template_variable(
            DataBinding::new("user.fullName", "Name").with_required(true),
            100.0,
            300.0,
        );
        let shape = factory.create(ElementKind::Shape);

        doc.pages[0].elements = vec![name, shape, course, again];
        doc
    }

    #[test]
    fn test_collect_bindings() {
        let doc = sample();
        let fields = collect_bindings(&doc);

        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.page_id == doc.pages[0].id));
        assert_eq!(fields[1].binding.field_path(), "course.title");
    }

    #[test]
    fn test_required_field_paths_are_deduplicated() {
        let doc = sample();
        assert_eq!(required_field_paths(&doc), vec!["user.fullName".to_string()]);
    }

    #[test]
    fn test_rebind_field() {
        let mut doc = sample();
        let mut rebind = RebindField::new("user.fullName", "user.displayName");
        rebind.visit_document_mut(&mut doc);

        assert_eq!(rebind.rebound, 2);
        let paths: Vec<_> = collect_bindings(&doc)
            .into_iter()
            .map(|f| f.binding.field_path().to_string())
            .collect();
        assert_eq!(paths, vec!["user.displayName", "course.title", "user.displayName"]);
        assert_eq!(collect_bindings(&doc)[0].binding.label(), "Full Name");
    }
}
