// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Convert organizer items into an iCalendar document.

mod properties;

use std::collections::BTreeMap;

use pimkit_organizer::{ItemType, OrganizerItem};

use crate::config::{DEFAULT_PRODUCT_ID, ExporterConfig};
use crate::document::{VersitDocument, VersitProperty, VersitType};
use crate::keyword::{
    KW_PRODID, KW_VCALENDAR, KW_VERSION, KW_VERSION_ICAL, KW_VEVENT, KW_VJOURNAL, KW_VTODO,
};
use crate::organizer::exporter::properties::{alarm_document, detail_properties};
use crate::organizer::handler::{DetailHandler, ExtendedPropertyHandler};

/// Why an item, or the whole export, failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ExportError {
    /// No error.
    NoError,
    /// The item has no details.
    EmptyItemError,
    /// The item type has no iCalendar component.
    UnknownComponentTypeError,
    /// There was nothing to export.
    NoItemsError,
}

/// Exports organizer items as the components of one `VCALENDAR`.
///
/// Each call to [`export_items`](Self::export_items) starts afresh; the
/// document and errors of the last call stay queryable until the next.
/// Errors are keyed by item index, or `-1` when there was nothing to export.
#[derive(Debug)]
pub struct OrganizerExporter<'h> {
    document: VersitDocument,
    error_map: BTreeMap<i32, ExportError>,
    detail_handler: Option<&'h mut dyn DetailHandler>,
    extended: Option<ExtendedPropertyHandler>,
    product_id: String,
}

impl Default for OrganizerExporter<'_> {
    fn default() -> Self {
        Self {
            document: VersitDocument::default(),
            error_map: BTreeMap::new(),
            detail_handler: None,
            extended: None,
            product_id: DEFAULT_PRODUCT_ID.to_string(),
        }
    }
}

impl<'h> OrganizerExporter<'h> {
    /// Create an exporter with no handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter as configured.
    pub fn from_config(config: &ExporterConfig) -> Self {
        Self {
            extended: config
                .extended_properties
                .then(ExtendedPropertyHandler::new),
            product_id: config.product_id.clone(),
            ..Self::default()
        }
    }

    /// Set the handler called for every detail, replacing any previous one.
    /// It takes the place of the configured extended property handler.
    pub fn set_detail_handler(&mut self, handler: Option<&'h mut dyn DetailHandler>) {
        self.detail_handler = handler;
    }

    /// The document built by the last export.
    pub fn document(&self) -> &VersitDocument {
        &self.document
    }

    /// Errors from the last export.
    pub fn error_map(&self) -> &BTreeMap<i32, ExportError> {
        &self.error_map
    }

    /// Export items, returning whether every item exported cleanly.
    ///
    /// A failing item is recorded in [`error_map`](Self::error_map) and
    /// left out of the document; the rest are still exported.
    #[tracing::instrument(skip_all, fields(count = items.len()))]
    pub fn export_items(&mut self, items: &[OrganizerItem]) -> bool {
        let mut document = VersitDocument::new(VersitType::ICalendar20, KW_VCALENDAR)
            .with_property(VersitProperty::preformatted(KW_VERSION, KW_VERSION_ICAL))
            .with_property(VersitProperty::text(KW_PRODID, self.product_id.as_str()));
        let mut error_map = BTreeMap::new();

        if items.is_empty() {
            tracing::debug!("no items to export");
            error_map.insert(-1, ExportError::NoItemsError);
        }

        let mut handler = self.handler();
        for (index, item) in items.iter().enumerate() {
            let index = i32::try_from(index).unwrap_or(i32::MAX);
            match export_item(item, handler.as_deref_mut()) {
                Ok(sub_document) => document.add_sub_document(sub_document),
                Err(err) => {
                    error_map.insert(index, err);
                }
            }
        }

        tracing::debug!(
            components = document.sub_documents().len(),
            errors = error_map.len(),
            "exported items"
        );
        self.document = document;
        self.error_map = error_map;
        self.error_map.is_empty()
    }

    fn handler(&mut self) -> Option<&mut (dyn DetailHandler + 'h)> {
        match &mut self.detail_handler {
            Some(handler) => Some(&mut **handler),
            None => match &mut self.extended {
                Some(handler) => Some(handler),
                None => None,
            },
        }
    }
}

fn component(item_type: ItemType) -> Option<&'static str> {
    match item_type {
        ItemType::Event | ItemType::EventOccurrence => Some(KW_VEVENT),
        ItemType::Todo | ItemType::TodoOccurrence => Some(KW_VTODO),
        ItemType::Journal => Some(KW_VJOURNAL),
        ItemType::Note => None,
    }
}

fn export_item<'h>(
    item: &OrganizerItem,
    mut handler: Option<&mut (dyn DetailHandler + 'h)>,
) -> Result<VersitDocument, ExportError> {
    let Some(component) = component(item.item_type()) else {
        tracing::debug!(item_type = %item.item_type(), "no component for item");
        return Err(ExportError::UnknownComponentTypeError);
    };
    if item.is_empty() {
        tracing::debug!(item_type = %item.item_type(), "item has no details");
        return Err(ExportError::EmptyItemError);
    }

    let mut document = VersitDocument::new(VersitType::ICalendar20, component);
    for detail in item.details() {
        let mut processed = false;
        let mut to_be_added = Vec::new();
        if let Some(alarm) = alarm_document(detail) {
            document.add_sub_document(alarm);
            processed = true;
        } else if let Some(properties) = detail_properties(detail) {
            to_be_added = properties;
            processed = true;
        }

        let mut to_be_removed = Vec::new();
        if let Some(handler) = handler.as_deref_mut() {
            handler.detail_processed(
                item,
                detail,
                &document,
                &mut processed,
                &mut to_be_removed,
                &mut to_be_added,
            );
        }
        if !processed {
            tracing::trace!(kind = %detail.kind(), "detail not exported");
        }
        for property in &to_be_removed {
            document.remove_property(property);
        }
        for property in to_be_added {
            document.add_property(property);
        }
    }

    if let Some(handler) = handler {
        handler.item_processed(item, &mut document);
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use pimkit_organizer::{Detail, ExtendedDetail, VisualReminder};

    use super::*;

    fn item(item_type: ItemType, details: Vec<Detail>) -> OrganizerItem {
        let mut item = OrganizerItem::new(item_type);
        for detail in details {
            item.save_detail(detail);
        }
        item
    }

    #[test]
    fn nothing_to_export() {
        let mut exporter = OrganizerExporter::new();
        assert!(!exporter.export_items(&[]));
        assert_eq!(
            exporter.error_map(),
            &BTreeMap::from([(-1, ExportError::NoItemsError)])
        );
        assert_eq!(exporter.document().component_type(), "VCALENDAR");
        assert!(exporter.document().sub_documents().is_empty());
    }

    #[test]
    fn calendar_header_and_failures_by_index() {
        let mut exporter = OrganizerExporter::from_config(&ExporterConfig {
            product_id: "-//Test//EN".to_string(),
            ..ExporterConfig::default()
        });
        let items = [
            item(ItemType::Event, vec![Detail::Guid("a".to_string())]),
            item(ItemType::Note, vec![Detail::Guid("b".to_string())]),
            item(ItemType::Todo, Vec::new()),
            item(ItemType::TodoOccurrence, vec![Detail::Guid("c".to_string())]),
        ];
        assert!(!exporter.export_items(&items));
        assert_eq!(
            exporter.error_map(),
            &BTreeMap::from([
                (1, ExportError::UnknownComponentTypeError),
                (2, ExportError::EmptyItemError),
            ])
        );

        let document = exporter.document();
        assert_eq!(
            document.properties(),
            [
                VersitProperty::preformatted("VERSION", "2.0"),
                VersitProperty::text("PRODID", "-//Test//EN"),
            ]
        );
        let components: Vec<_> = document
            .sub_documents()
            .iter()
            .map(VersitDocument::component_type)
            .collect();
        assert_eq!(components, ["VEVENT", "VTODO"]);
    }

    #[test]
    fn reminders_become_alarms() {
        let mut exporter = OrganizerExporter::new();
        let items = [item(
            ItemType::Event,
            vec![
                Detail::DisplayLabel("Standup".to_string()),
                Detail::VisualReminder(VisualReminder::default()),
            ],
        )];
        assert!(exporter.export_items(&items));
        let event = exporter.document().sub_documents().first().unwrap();
        assert_eq!(event.properties(), [VersitProperty::text("SUMMARY", "Standup")]);
        assert_eq!(
            event.sub_documents().first().unwrap().component_type(),
            "VALARM"
        );
    }

    #[test]
    fn extended_details_need_a_handler() {
        let items = [item(
            ItemType::Journal,
            vec![Detail::Extended(ExtendedDetail {
                name: "X-MOOD".to_string(),
                parameters: Vec::new(),
                data: "calm".to_string(),
            })],
        )];

        let mut plain = OrganizerExporter::new();
        assert!(plain.export_items(&items));
        let journal = plain.document().sub_documents().first().unwrap();
        assert!(journal.properties().is_empty());

        let mut extended = OrganizerExporter::from_config(&ExporterConfig {
            extended_properties: true,
            ..ExporterConfig::default()
        });
        assert!(extended.export_items(&items));
        let journal = extended.document().sub_documents().first().unwrap();
        assert_eq!(
            journal.properties(),
            [VersitProperty::preformatted("X-MOOD", "calm")]
        );
    }
}
