use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic type of a bound field, selects the formatting rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    #[default]
    Text,
    Number,
    Date,
    Image,
    QrCode,
}

/// Final case transform applied to resolved text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Link between an element and a field of the data record
///
/// Immutable once built; construct with [`DataBinding::new`] and the
/// `with_*` builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBinding {
    field_path: String,
    label: String,
    #[serde(default)]
    value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(default)]
    required: bool,
}

impl DataBinding {
    pub fn new(field_path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            label: label.into(),
            value_type: ValueType::Text,
            format_pattern: None,
            default_value: None,
            required: false,
        }
    }

    pub fn with_field_path(mut self, field_path: impl Into<String>) -> Self {
        self.field_path = field_path.into();
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn with_format_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.format_pattern = Some(pattern.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn format_pattern(&self) -> Option<&str> {
        self.format_pattern.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Top-level record section (`user`, `course`, ...) this binding reads from
    pub fn section(&self) -> &str {
        self.field_path.split('.').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let binding = DataBinding::new("certificate.issueDate", "Issue Date")
            .with_value_type(ValueType::Date)
            .with_format_pattern("dd MMMM yyyy")
            .with_required(true);

        assert_eq!(binding.field_path(), "certificate.issueDate");
        assert_eq!(binding.label(), "Issue Date");
        assert_eq!(binding.value_type(), ValueType::Date);
        assert_eq!(binding.format_pattern(), Some("dd MMMM yyyy"));
        assert!(binding.is_required());
        assert_eq!(binding.section(), "certificate");
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "fieldPath": "course.hours",
            "label": "Hours",
            "valueType": "number",
            "formatPattern": "0.0",
            "defaultValue": 0
        }"#;

        let binding: DataBinding = serde_json::from_str(json).unwrap();
        assert_eq!(binding.value_type(), ValueType::Number);
        assert_eq!(binding.default_value(), Some(&serde_json::json!(0)));
        assert!(!binding.is_required());

        let qr: ValueType = serde_json::from_str("\"qrCode\"").unwrap();
        assert_eq!(qr, ValueType::QrCode);
    }
}
