// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory tree of a Versit document.

/// Format and version of a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum VersitType {
    /// Unknown or unset.
    #[default]
    Invalid,
    /// vCard 2.1.
    #[strum(serialize = "vCard 2.1")]
    VCard21,
    /// vCard 3.0.
    #[strum(serialize = "vCard 3.0")]
    VCard30,
    /// vCard 4.0.
    #[strum(serialize = "vCard 4.0")]
    VCard40,
    /// iCalendar 2.0.
    #[strum(serialize = "iCalendar 2.0")]
    ICalendar20,
}

/// Value of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersitValue {
    /// Free text, stored unescaped.
    Text(String),
    /// Comma separated text values, stored unescaped.
    List(Vec<String>),
    /// Structured value kept exactly as written, e.g. a date or a rule.
    Preformatted(String),
}

impl VersitValue {
    /// The value as a single string, `None` for lists.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VersitValue::Text(s) | VersitValue::Preformatted(s) => Some(s),
            VersitValue::List(_) => None,
        }
    }

    /// All values, a single one unless this is a list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            VersitValue::Text(s) | VersitValue::Preformatted(s) => vec![s.as_str()],
            VersitValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Whether there is no content.
    pub fn is_empty(&self) -> bool {
        match self {
            VersitValue::Text(s) | VersitValue::Preformatted(s) => s.is_empty(),
            VersitValue::List(items) => items.iter().all(String::is_empty),
        }
    }
}

/// A property: optional groups, an upper-cased name, ordered parameters and
/// a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersitProperty {
    groups: Vec<String>,
    name: String,
    parameters: Vec<(String, String)>,
    value: VersitValue,
}

impl VersitProperty {
    /// Create a property without groups or parameters.
    pub fn new(name: impl AsRef<str>, value: VersitValue) -> Self {
        Self {
            groups: Vec::new(),
            name: name.as_ref().to_ascii_uppercase(),
            parameters: Vec::new(),
            value,
        }
    }

    /// Create a text property.
    pub fn text(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self::new(name, VersitValue::Text(value.into()))
    }

    /// Create a preformatted property.
    pub fn preformatted(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self::new(name, VersitValue::Preformatted(value.into()))
    }

    /// Add a parameter, keeping earlier ones with the same name.
    #[must_use]
    pub fn with_parameter(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.add_parameter(name, value);
        self
    }

    /// Add a group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Add a parameter, keeping earlier ones with the same name.
    pub fn add_parameter(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.parameters
            .push((name.as_ref().to_ascii_uppercase(), value.into()));
    }

    /// Groups the property belongs to, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Upper-cased name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All parameters in source order.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// First value of a parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The value.
    pub fn value(&self) -> &VersitValue {
        &self.value
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: VersitValue) {
        self.value = value;
    }
}

/// A component with its properties and nested components.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VersitDocument {
    doc_type: VersitType,
    component_type: String,
    properties: Vec<VersitProperty>,
    sub_documents: Vec<VersitDocument>,
}

impl VersitDocument {
    /// Create an empty document of the given type and component.
    pub fn new(doc_type: VersitType, component_type: impl AsRef<str>) -> Self {
        Self {
            doc_type,
            component_type: component_type.as_ref().to_ascii_uppercase(),
            properties: Vec::new(),
            sub_documents: Vec::new(),
        }
    }

    /// Add a property.
    #[must_use]
    pub fn with_property(mut self, property: VersitProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a nested component.
    #[must_use]
    pub fn with_sub_document(mut self, document: VersitDocument) -> Self {
        self.sub_documents.push(document);
        self
    }

    /// Format and version.
    pub fn doc_type(&self) -> VersitType {
        self.doc_type
    }

    /// Change format and version.
    pub fn set_doc_type(&mut self, doc_type: VersitType) {
        self.doc_type = doc_type;
    }

    /// Change format and version of this document and every nested one.
    pub(crate) fn set_doc_type_deep(&mut self, doc_type: VersitType) {
        self.doc_type = doc_type;
        for sub in &mut self.sub_documents {
            sub.set_doc_type_deep(doc_type);
        }
    }

    /// Upper-cased component name, e.g. `VCALENDAR` or `VEVENT`.
    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    /// Properties in order.
    pub fn properties(&self) -> &[VersitProperty] {
        &self.properties
    }

    /// First property with a name.
    pub fn property(&self, name: &str) -> Option<&VersitProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Add a property.
    pub fn add_property(&mut self, property: VersitProperty) {
        self.properties.push(property);
    }

    /// Remove every property equal to `property`, returning how many went.
    pub fn remove_property(&mut self, property: &VersitProperty) -> usize {
        let before = self.properties.len();
        self.properties.retain(|p| p != property);
        before - self.properties.len()
    }

    /// Nested components in order.
    pub fn sub_documents(&self) -> &[VersitDocument] {
        &self.sub_documents
    }

    /// Add a nested component.
    pub fn add_sub_document(&mut self, document: VersitDocument) {
        self.sub_documents.push(document);
    }

    /// Whether the document has neither properties nor nested components.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.sub_documents.is_empty()
    }
}
