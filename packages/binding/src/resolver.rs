use certkit_model::{DataBinding, TemplateVariableElement};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::date::{DEFAULT_DATE_PATTERN, DEFAULT_LOCALE};
use crate::field_path::{is_absent, resolve};
use crate::formatter::{stringify, FormatOutcome, ValueFormatter};
use crate::transform::transform;

/// Text shown when a required field has no data
pub fn required_marker(label: &str) -> String {
    format!("[required: {}]", label)
}

/// Text shown when an optional field has no data and no placeholder
pub fn label_placeholder(label: &str) -> String {
    format!("[{}]", label)
}

/// Formatting settings carried from configuration into the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverOptions {
    pub locale: String,
    pub date_pattern: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

/// Outcome of checking a record against a set of required paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredFieldReport {
    pub all_present: bool,
    /// Absent paths, in first-seen order without duplicates
    pub missing: Vec<String>,
}

/// Turns a bound element plus a data record into display text
#[derive(Default)]
pub struct TemplateVariableResolver {
    formatter: ValueFormatter,
}

impl TemplateVariableResolver {
    pub fn new(formatter: ValueFormatter) -> Self {
        Self { formatter }
    }

    pub fn with_options(options: &ResolverOptions) -> Self {
        Self::new(
            ValueFormatter::default()
                .with_locale(options.locale.clone())
                .with_default_date_pattern(options.date_pattern.clone()),
        )
    }

    pub fn formatter(&self) -> &ValueFormatter {
        &self.formatter
    }

    /// Final text for `element` against `record`
    ///
    /// Never fails: absent data yields the required marker, the placeholder
    /// or the bracketed label; unformattable data yields the raw value.
    pub fn resolve_display_text(&self, element: &TemplateVariableElement, record: &Value) -> String {
        let binding = &element.binding;
        let value = resolve(record, binding.field_path());

        if is_absent(value) {
            return if binding.is_required() {
                required_marker(binding.label())
            } else if !element.placeholder.is_empty() {
                element.placeholder.clone()
            } else {
                label_placeholder(binding.label())
            };
        }

        let formatted = self.format_logged(value, binding);
        let transformed = transform(&formatted, element.transform);

        let mut text = String::new();
        if let Some(prefix) = &element.prefix {
            text.push_str(prefix);
        }
        text.push_str(&transformed);
        if let Some(suffix) = &element.suffix {
            text.push_str(suffix);
        }
        text
    }

    /// Text payload for a QR code or barcode binding
    ///
    /// Absent values fall back to the binding's default value; `None` when
    /// there is neither, so the element keeps its static data.
    pub fn resolve_value_text(&self, binding: &DataBinding, record: &Value) -> Option<String> {
        let value = resolve(record, binding.field_path());
        if is_absent(value) {
            return binding.default_value().map(stringify).filter(|s| !s.is_empty());
        }
        Some(self.format_logged(value, binding))
    }

    /// Text shown on the design canvas, before any record is bound
    pub fn design_text(element: &TemplateVariableElement) -> String {
        if element.placeholder.is_empty() {
            format!("{{{{{}}}}}", element.binding.field_path())
        } else {
            element.placeholder.clone()
        }
    }

    /// Check that every path in `field_paths` resolves to data
    pub fn validate_required<'a, I>(&self, record: &Value, field_paths: I) -> RequiredFieldReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut missing: Vec<String> = Vec::new();
        for path in field_paths {
            if is_absent(resolve(record, path)) && !missing.iter().any(|m| m == path) {
                missing.push(path.to_string());
            }
        }

        debug!(missing = missing.len(), "Validated required fields");
        RequiredFieldReport {
            all_present: missing.is_empty(),
            missing,
        }
    }

    fn format_logged(&self, value: Option<&Value>, binding: &DataBinding) -> String {
        match self.formatter.format_detailed(value, binding) {
            FormatOutcome::Formatted(text) => text,
            FormatOutcome::Fallback { raw, reason } => {
                warn!(field_path = %binding.field_path(), raw = %raw, reason = %reason, "Showing raw value");
                raw
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certkit_model::{ElementFactory, IDGenerator, TextTransform, ValueType};
    use serde_json::json;

    fn element(binding: DataBinding) -> TemplateVariableElement {
        let mut factory = ElementFactory::new(IDGenerator::from_seed("r"));
        match factory.template_variable(binding, 0.0, 0.0) {
            certkit_model::DesignerElement::TemplateVariable(tv) => tv,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_present_value_with_prefix_suffix_and_transform() {
        let mut tv = element(DataBinding::new("user.fullName", "Full Name"));
        tv.prefix = Some("Awarded to ".to_string());
        tv.suffix = Some("!".to_string());
        tv.transform = TextTransform::Uppercase;

        let resolver = TemplateVariableResolver::default();
        let text = resolver.resolve_display_text(&tv, &json!({ "user": { "fullName": "Ada Lovelace" } }));
        assert_eq!(text, "Awarded to ADA LOVELACE!");
    }

    #[test]
    fn test_absent_required_shows_marker() {
        let tv = element(DataBinding::new("user.fullName", "Full Name").with_required(true));
        let resolver = TemplateVariableResolver::default();

        for record in [json!({}), json!({ "user": null }), json!({ "user": { "fullName": "" } })] {
            assert_eq!(resolver.resolve_display_text(&tv, &record), "[required: Full Name]");
        }
    }

    #[test]
    fn test_absent_optional_shows_placeholder_then_label() {
        let mut tv = element(DataBinding::new("course.title", "Course"));
        let resolver = TemplateVariableResolver::default();

        assert_eq!(resolver.resolve_display_text(&tv, &json!({})), "[Course]");

        tv.placeholder = "Course Title".to_string();
        assert_eq!(resolver.resolve_display_text(&tv, &json!({})), "Course Title");
    }

    #[test]
    fn test_prefix_not_applied_to_absent() {
        let mut tv = element(DataBinding::new("course.title", "Course"));
        tv.prefix = Some("for ".to_string());
        let resolver = TemplateVariableResolver::default();

        assert_eq!(resolver.resolve_display_text(&tv, &json!({})), "[Course]");
    }

    #[test]
    fn test_options_drive_date_format() {
        let tv = element(DataBinding::new("certificate.issueDate", "Issue Date").with_value_type(ValueType::Date));
        let resolver = TemplateVariableResolver::with_options(&ResolverOptions {
            locale: "en".to_string(),
            date_pattern: "MMMM d, yyyy".to_string(),
        });

        let text = resolver.resolve_display_text(&tv, &json!({ "certificate": { "issueDate": "2024-03-05" } }));
        assert_eq!(text, "March 5, 2024");
    }

    #[test]
    fn test_resolve_value_text() {
        let resolver = TemplateVariableResolver::default();
        let binding = DataBinding::new("certificate.verifyUrl", "Verify URL");

        assert_eq!(
            resolver.resolve_value_text(&binding, &json!({ "certificate": { "verifyUrl": "https://v/1" } })),
            Some("https://v/1".to_string())
        );
        assert_eq!(resolver.resolve_value_text(&binding, &json!({})), None);

        let with_default = binding.with_default_value("https://v/none");
        assert_eq!(
            resolver.resolve_value_text(&with_default, &json!({})),
            Some("https://v/none".to_string())
        );
    }

    #[test]
    fn test_design_text() {
        let mut tv = element(DataBinding::new("user.fullName", "Full Name"));
        assert_eq!(TemplateVariableResolver::design_text(&tv), "{{user.fullName}}");

        tv.placeholder = "Recipient".to_string();
        assert_eq!(TemplateVariableResolver::design_text(&tv), "Recipient");
    }

    #[test]
    fn test_validate_required_dedupes_and_keeps_order() {
        let resolver = TemplateVariableResolver::default();
        let record = json!({ "user": { "fullName": "Ada" }, "course": { "title": "" } });

        let report = resolver.validate_required(
            &record,
            ["course.title", "user.fullName", "certificate.id", "course.title"],
        );
        assert!(!report.all_present);
        assert_eq!(report.missing, vec!["course.title", "certificate.id"]);

        let ok = resolver.validate_required(&record, ["user.fullName"]);
        assert!(ok.all_present);
        assert!(ok.missing.is_empty());
    }
}
