//! Catalog of bindable fields offered by the designer's field picker
//!
//! The resolver never consults the catalog; any path works at render time.

use certkit_model::{DataBinding, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSection {
    User,
    Course,
    Certificate,
    Institution,
    Signatories,
    Custom,
}

impl FieldSection {
    pub const ALL: [FieldSection; 6] = [
        FieldSection::User,
        FieldSection::Course,
        FieldSection::Certificate,
        FieldSection::Institution,
        FieldSection::Signatories,
        FieldSection::Custom,
    ];

    /// Section owning `field_path`, by its first segment
    pub fn of_path(field_path: &str) -> Self {
        match field_path.split('.').next().unwrap_or_default() {
            "user" => FieldSection::User,
            "course" => FieldSection::Course,
            "certificate" => FieldSection::Certificate,
            "institution" => FieldSection::Institution,
            "signatories" => FieldSection::Signatories,
            _ => FieldSection::Custom,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FieldSection::User => "Recipient",
            FieldSection::Course => "Course",
            FieldSection::Certificate => "Certificate",
            FieldSection::Institution => "Institution",
            FieldSection::Signatories => "Signatories",
            FieldSection::Custom => "Custom",
        }
    }
}

impl fmt::Display for FieldSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: Vec<DataBinding>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard certificate fields
    pub fn default_catalog() -> Self {
        let text = |path: &str, label: &str| DataBinding::new(path, label);
        let date = |path: &str, label: &str| DataBinding::new(path, label).with_value_type(ValueType::Date);

        let fields = vec![
            text("user.fullName", "Full Name").with_required(true),
            text("user.firstName", "First Name"),
            text("user.lastName", "Last Name"),
            text("user.email", "Email"),
            DataBinding::new("user.photo", "Photo").with_value_type(ValueType::Image),
            text("course.title", "Course Title").with_required(true),
            text("course.code", "Course Code"),
            DataBinding::new("course.hours", "Course Hours")
                .with_value_type(ValueType::Number)
                .with_format_pattern("0"),
            DataBinding::new("course.score", "Score")
                .with_value_type(ValueType::Number)
                .with_format_pattern("0.0"),
            date("course.completedAt", "Completion Date"),
            text("certificate.id", "Certificate ID").with_required(true),
            date("certificate.issueDate", "Issue Date").with_required(true),
            date("certificate.expiryDate", "Expiry Date"),
            DataBinding::new("certificate.verifyUrl", "Verification URL").with_value_type(ValueType::QrCode),
            text("institution.name", "Institution Name"),
            DataBinding::new("institution.logo", "Institution Logo").with_value_type(ValueType::Image),
            text("signatories.0.name", "Primary Signatory"),
            text("signatories.0.title", "Primary Signatory Title"),
            text("signatories.1.name", "Secondary Signatory"),
            text("signatories.1.title", "Secondary Signatory Title"),
        ];

        Self { fields }
    }

    pub fn fields(&self) -> &[DataBinding] {
        &self.fields
    }

    pub fn find(&self, field_path: &str) -> Option<&DataBinding> {
        self.fields.iter().find(|f| f.field_path() == field_path)
    }

    /// Add a field, replacing any existing entry for the same path
    pub fn add_custom(&mut self, binding: DataBinding) {
        match self.fields.iter_mut().find(|f| f.field_path() == binding.field_path()) {
            Some(existing) => *existing = binding,
            None => self.fields.push(binding),
        }
    }

    /// Fields grouped by section, in section order, empty sections omitted
    pub fn group_by_section(&self) -> Vec<(FieldSection, Vec<&DataBinding>)> {
        FieldSection::ALL
            .into_iter()
            .map(|section| {
                let fields = self
                    .fields
                    .iter()
                    .filter(|f| FieldSection::of_path(f.field_path()) == section)
                    .collect::<Vec<_>>();
                (section, fields)
            })
            .filter(|(_, fields)| !fields.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_sections() {
        let catalog = FieldCatalog::default_catalog();
        let sections: Vec<_> = catalog.group_by_section().into_iter().map(|(s, _)| s).collect();

        assert_eq!(
            sections,
            vec![
                FieldSection::User,
                FieldSection::Course,
                FieldSection::Certificate,
                FieldSection::Institution,
                FieldSection::Signatories,
            ]
        );
    }

    #[test]
    fn test_find() {
        let catalog = FieldCatalog::default_catalog();
        let issue = catalog.find("certificate.issueDate").unwrap();

        assert_eq!(issue.value_type(), ValueType::Date);
        assert!(issue.is_required());
        assert!(catalog.find("user.shoeSize").is_none());
    }

    #[test]
    fn test_custom_fields() {
        let mut catalog = FieldCatalog::default_catalog();
        catalog.add_custom(DataBinding::new("extra.cohort", "Cohort"));
        catalog.add_custom(DataBinding::new("extra.cohort", "Cohort Name"));

        let groups = catalog.group_by_section();
        let (section, fields) = groups.last().unwrap();
        assert_eq!(*section, FieldSection::Custom);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label(), "Cohort Name");
    }
}
