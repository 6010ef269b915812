use certkit_model::{DataBinding, ValueType};
use serde_json::Value;

use crate::date::{DateFormatter, PatternDateFormatter, DEFAULT_DATE_PATTERN, DEFAULT_LOCALE};

/// Result of formatting a value
///
/// `Fallback` means the value could not be formatted as its declared type
/// and the raw text is shown instead. Callers log it; users see the raw
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted(String),
    Fallback { raw: String, reason: String },
}

impl FormatOutcome {
    pub fn text(&self) -> &str {
        match self {
            FormatOutcome::Formatted(text) => text,
            FormatOutcome::Fallback { raw, .. } => raw,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FormatOutcome::Formatted(text) => text,
            FormatOutcome::Fallback { raw, .. } => raw,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FormatOutcome::Fallback { .. })
    }
}

/// Turns a resolved record value into text according to its binding
pub struct ValueFormatter {
    date_formatter: Box<dyn DateFormatter>,
    locale: String,
    default_date_pattern: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(PatternDateFormatter)
    }
}

impl ValueFormatter {
    pub fn new(date_formatter: impl DateFormatter + 'static) -> Self {
        Self {
            date_formatter: Box::new(date_formatter),
            locale: DEFAULT_LOCALE.to_string(),
            default_date_pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Pattern used for date bindings without a `format_pattern`
    pub fn with_default_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.default_date_pattern = pattern.into();
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn format(&self, value: Option<&Value>, binding: &DataBinding) -> String {
        self.format_detailed(value, binding).into_text()
    }

    pub fn format_detailed(&self, value: Option<&Value>, binding: &DataBinding) -> FormatOutcome {
        let value = match value {
            None | Some(Value::Null) => {
                let text = binding.default_value().map(stringify).unwrap_or_default();
                return FormatOutcome::Formatted(text);
            }
            Some(value) => value,
        };

        match binding.value_type() {
            ValueType::Text | ValueType::Image | ValueType::QrCode => FormatOutcome::Formatted(stringify(value)),
            ValueType::Number => format_number(value, binding.format_pattern()),
            ValueType::Date => self.format_date(value, binding.format_pattern()),
        }
    }

    fn format_date(&self, value: &Value, pattern: Option<&str>) -> FormatOutcome {
        let raw = stringify(value);
        let pattern = pattern.unwrap_or(&self.default_date_pattern);

        match self.date_formatter.format_date(&raw, pattern, &self.locale) {
            Ok(text) => FormatOutcome::Formatted(text),
            Err(err) => FormatOutcome::Fallback {
                raw,
                reason: err.to_string(),
            },
        }
    }
}

/// Strings verbatim, scalars via display, compound values as compact JSON
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn format_number(value: &Value, pattern: Option<&str>) -> FormatOutcome {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    };

    let Some(number) = number else {
        return FormatOutcome::Fallback {
            raw: stringify(value),
            reason: "not a number".to_string(),
        };
    };

    match pattern {
        Some(pattern) => FormatOutcome::Formatted(apply_number_pattern(number, pattern)),
        None => FormatOutcome::Formatted(stringify(value)),
    }
}

const MAX_DECIMALS: usize = 15;

/// `0.00` fixes two decimals, `#,##0` groups thousands
pub fn apply_number_pattern(number: f64, pattern: &str) -> String {
    let (integer_part, decimals) = match pattern.split_once('.') {
        Some((integer_part, fraction)) => (integer_part, fraction.chars().count().min(MAX_DECIMALS)),
        None => (pattern, 0),
    };
    let grouped = integer_part.contains(',');

    let rounded = round_half_away(number, decimals);
    let text = format!("{:.*}", decimals, rounded);

    if grouped {
        group_thousands(&text)
    } else {
        text
    }
}

fn round_half_away(number: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = number * factor;
    if !scaled.is_finite() {
        return number;
    }

    // f64::round already rounds half away from zero
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DateFormatError, DateFormatResult};
    use serde_json::json;

    fn number(pattern: &str) -> DataBinding {
        DataBinding::new("course.score", "Score")
            .with_value_type(ValueType::Number)
            .with_format_pattern(pattern)
    }

    #[test]
    fn test_absent_uses_default_value() {
        let formatter = ValueFormatter::default();
        let binding = DataBinding::new("course.hours", "Hours").with_default_value(40);

        assert_eq!(formatter.format(None, &binding), "40");
        assert_eq!(formatter.format(Some(&Value::Null), &binding), "40");
        assert_eq!(formatter.format(None, &DataBinding::new("x", "X")), "");
    }

    #[test]
    fn test_text_stringification() {
        let formatter = ValueFormatter::default();
        let binding = DataBinding::new("x", "X");

        assert_eq!(formatter.format(Some(&json!("Ada")), &binding), "Ada");
        assert_eq!(formatter.format(Some(&json!(12)), &binding), "12");
        assert_eq!(formatter.format(Some(&json!(true)), &binding), "true");
        assert_eq!(formatter.format(Some(&json!(["a", 1])), &binding), r#"["a",1]"#);
    }

    #[test]
    fn test_number_decimals() {
        let formatter = ValueFormatter::default();

        assert_eq!(formatter.format(Some(&json!(92.456)), &number("0.00")), "92.46");
        assert_eq!(formatter.format(Some(&json!(7)), &number("0.0")), "7.0");
        assert_eq!(formatter.format(Some(&json!(2.5)), &number("0")), "3");
        assert_eq!(formatter.format(Some(&json!(-2.5)), &number("0")), "-3");
        assert_eq!(formatter.format(Some(&json!(-0.2)), &number("0")), "0");
        assert_eq!(formatter.format(Some(&json!("3.14159")), &number("0.000")), "3.142");
    }

    #[test]
    fn test_number_grouping() {
        let formatter = ValueFormatter::default();

        assert_eq!(formatter.format(Some(&json!(1234567.891)), &number("#,##0.00")), "1,234,567.89");
        assert_eq!(formatter.format(Some(&json!(-1500)), &number("#,##0")), "-1,500");
        assert_eq!(formatter.format(Some(&json!(999)), &number("#,##0")), "999");
    }

    #[test]
    fn test_number_without_pattern_is_verbatim() {
        let formatter = ValueFormatter::default();
        let binding = DataBinding::new("x", "X").with_value_type(ValueType::Number);

        assert_eq!(formatter.format(Some(&json!(92.5)), &binding), "92.5");
        assert_eq!(formatter.format(Some(&json!("007")), &binding), "007");
    }

    #[test]
    fn test_non_numeric_number_falls_back() {
        let formatter = ValueFormatter::default();
        let outcome = formatter.format_detailed(Some(&json!("n/a")), &number("0.0"));

        assert!(outcome.is_fallback());
        assert_eq!(outcome.text(), "n/a");
    }

    #[test]
    fn test_date_formatting() {
        let formatter = ValueFormatter::default();
        let binding = DataBinding::new("certificate.issueDate", "Issue Date").with_value_type(ValueType::Date);

        assert_eq!(formatter.format(Some(&json!("2024-03-05")), &binding), "05 March 2024");

        let custom = binding.clone().with_format_pattern("MMM d, yyyy");
        assert_eq!(formatter.format(Some(&json!("2024-03-05")), &custom), "Mar 5, 2024");
    }

    #[test]
    fn test_malformed_date_returns_raw() {
        let formatter = ValueFormatter::default();
        let binding = DataBinding::new("certificate.issueDate", "Issue Date").with_value_type(ValueType::Date);

        let outcome = formatter.format_detailed(Some(&json!("next tuesday")), &binding);
        assert_eq!(
            outcome,
            FormatOutcome::Fallback {
                raw: "next tuesday".to_string(),
                reason: DateFormatError::InvalidDate("next tuesday".to_string()).to_string(),
            }
        );
    }

    struct FailingFormatter;

    impl DateFormatter for FailingFormatter {
        fn format_date(&self, iso: &str, _pattern: &str, _locale: &str) -> DateFormatResult<String> {
            Err(DateFormatError::InvalidDate(iso.to_string()))
        }
    }

    #[test]
    fn test_collaborator_error_returns_raw() {
        let formatter = ValueFormatter::new(FailingFormatter);
        let binding = DataBinding::new("d", "D").with_value_type(ValueType::Date);

        assert_eq!(formatter.format(Some(&json!("2024-03-05")), &binding), "2024-03-05");
    }

    #[test]
    fn test_locale_and_default_pattern() {
        let formatter = ValueFormatter::default()
            .with_locale("en-GB")
            .with_default_date_pattern("d/M/yyyy");
        let binding = DataBinding::new("d", "D").with_value_type(ValueType::Date);

        assert_eq!(formatter.locale(), "en-GB");
        assert_eq!(formatter.format(Some(&json!("2024-03-05")), &binding), "5/3/2024");
    }

    #[test]
    fn test_image_reference_is_unchanged() {
        let formatter = ValueFormatter::default();
        let binding = DataBinding::new("user.photo", "Photo").with_value_type(ValueType::Image);

        assert_eq!(
            formatter.format(Some(&json!("https://cdn.example.com/a.png")), &binding),
            "https://cdn.example.com/a.png"
        );
    }
}
