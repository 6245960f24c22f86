// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use pimkit_organizer::{Detail, ExtendedDetail, OrganizerItem};

use crate::document::{VersitDocument, VersitProperty, VersitValue};
use crate::keyword::KW_VALARM;
use crate::value::escape_text;

/// Hook into the importer, called once per property after the built-in
/// mapping has run.
pub trait PropertyHandler: fmt::Debug {
    /// Inspect or change what a property produced.
    ///
    /// `already_processed` tells whether a built-in mapping claimed the
    /// property, and `updated_details` holds what it produced. Both may be
    /// changed; the importer saves whatever `updated_details` holds once this
    /// returns, so clearing it vetoes the property.
    fn property_processed(
        &mut self,
        document: &VersitDocument,
        property: &VersitProperty,
        item: &OrganizerItem,
        already_processed: &mut bool,
        updated_details: &mut Vec<Detail>,
    );

    /// Called once a sub-document has become an item, with the item still
    /// open for changes.
    fn sub_document_processed(
        &mut self,
        top_level: &VersitDocument,
        sub_document: &VersitDocument,
        item: &mut OrganizerItem,
    ) {
        let _ = (top_level, sub_document, item);
    }
}

/// Hook into the exporter, called once per detail after the built-in
/// mapping has run.
pub trait DetailHandler: fmt::Debug {
    /// Inspect or change what a detail produced.
    ///
    /// `processed` tells whether a built-in mapping claimed the detail.
    /// Properties in `to_be_removed` are taken out of `document` and those in
    /// `to_be_added` appended once this returns.
    fn detail_processed(
        &mut self,
        item: &OrganizerItem,
        detail: &Detail,
        document: &VersitDocument,
        processed: &mut bool,
        to_be_removed: &mut Vec<VersitProperty>,
        to_be_added: &mut Vec<VersitProperty>,
    );

    /// Called once an item has become a sub-document, with the document still
    /// open for changes.
    fn item_processed(&mut self, item: &OrganizerItem, document: &mut VersitDocument) {
        let _ = (item, document);
    }
}

/// Keeps properties that no mapping understands.
///
/// On import, every unclaimed property of an item becomes an
/// [`Detail::Extended`] holding its name, parameters and value as written.
/// On export, extended details are written back as properties. Properties
/// of alarms are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtendedPropertyHandler;

impl ExtendedPropertyHandler {
    /// Create a handler.
    pub fn new() -> Self {
        Self
    }
}

impl PropertyHandler for ExtendedPropertyHandler {
    fn property_processed(
        &mut self,
        document: &VersitDocument,
        property: &VersitProperty,
        _item: &OrganizerItem,
        already_processed: &mut bool,
        updated_details: &mut Vec<Detail>,
    ) {
        if *already_processed || document.component_type() == KW_VALARM {
            return;
        }

        tracing::trace!(property = property.name(), "keeping unclaimed property");
        updated_details.push(Detail::Extended(ExtendedDetail {
            name: property.name().to_string(),
            parameters: property.parameters().to_vec(),
            data: raw_value(property.value()),
        }));
        *already_processed = true;
    }
}

impl DetailHandler for ExtendedPropertyHandler {
    fn detail_processed(
        &mut self,
        _item: &OrganizerItem,
        detail: &Detail,
        _document: &VersitDocument,
        processed: &mut bool,
        _to_be_removed: &mut Vec<VersitProperty>,
        to_be_added: &mut Vec<VersitProperty>,
    ) {
        let Detail::Extended(extended) = detail else {
            return;
        };
        if *processed {
            return;
        }

        let mut property = VersitProperty::preformatted(&extended.name, extended.data.clone());
        for (name, value) in &extended.parameters {
            property.add_parameter(name, value.clone());
        }
        to_be_added.push(property);
        *processed = true;
    }
}

/// The value as it would be written.
fn raw_value(value: &VersitValue) -> String {
    match value {
        VersitValue::Text(text) => escape_text(text),
        VersitValue::List(items) => items
            .iter()
            .map(|item| escape_text(item))
            .collect::<Vec<_>>()
            .join(","),
        VersitValue::Preformatted(raw) => raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pimkit_organizer::ItemType;

    use super::*;
    use crate::document::VersitType;

    #[test]
    fn keeps_unclaimed_properties() {
        let mut handler = ExtendedPropertyHandler::new();
        let document = VersitDocument::new(VersitType::ICalendar20, "VEVENT");
        let item = OrganizerItem::new(ItemType::Event);
        let property = VersitProperty::text("CONTACT", "Jim, ext. 5").with_parameter("LANGUAGE", "en");

        let mut processed = false;
        let mut details = Vec::new();
        handler.property_processed(&document, &property, &item, &mut processed, &mut details);
        assert!(processed);
        assert_eq!(
            details,
            [Detail::Extended(ExtendedDetail {
                name: "CONTACT".to_string(),
                parameters: vec![("LANGUAGE".to_string(), "en".to_string())],
                data: "Jim\\, ext. 5".to_string(),
            })]
        );

        let mut to_be_added = Vec::new();
        let mut processed = false;
        handler.detail_processed(
            &item,
            &details[0],
            &document,
            &mut processed,
            &mut Vec::new(),
            &mut to_be_added,
        );
        assert!(processed);
        assert_eq!(
            to_be_added,
            [VersitProperty::preformatted("CONTACT", "Jim\\, ext. 5").with_parameter("LANGUAGE", "en")]
        );
    }

    #[test]
    fn leaves_claimed_and_alarm_properties() {
        let mut handler = ExtendedPropertyHandler::new();
        let item = OrganizerItem::new(ItemType::Event);
        let property = VersitProperty::preformatted("X-ALARM-ID", "1");

        let alarm = VersitDocument::new(VersitType::ICalendar20, "VALARM");
        let mut processed = false;
        let mut details = Vec::new();
        handler.property_processed(&alarm, &property, &item, &mut processed, &mut details);
        assert!(!processed);
        assert!(details.is_empty());

        let event = VersitDocument::new(VersitType::ICalendar20, "VEVENT");
        let mut processed = true;
        handler.property_processed(&event, &property, &item, &mut processed, &mut details);
        assert!(details.is_empty());
    }
}
