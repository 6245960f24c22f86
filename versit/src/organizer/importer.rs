// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Convert an iCalendar document into organizer items.

mod alarm;
mod properties;

use std::collections::BTreeMap;

use pimkit_organizer::{Detail, ItemType, OrganizerItem};

use crate::config::ImporterConfig;
use crate::document::{VersitDocument, VersitType};
use crate::keyword::{
    KW_ACTION, KW_VALARM, KW_VCALENDAR, KW_VEVENT, KW_VJOURNAL, KW_VTIMEZONE, KW_VTODO,
};
use crate::organizer::handler::{ExtendedPropertyHandler, PropertyHandler};
use crate::organizer::importer::alarm::{alarm_mapping, new_reminder};
use crate::organizer::importer::properties::mapping;

/// Why a sub-document, or the whole document, failed to import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ImportError {
    /// No error.
    NoError,
    /// The document is not an iCalendar, or a component is not understood.
    InvalidDocumentError,
    /// The document, or a component, has no content.
    EmptyDocumentError,
}

/// Imports the components of an iCalendar document as organizer items.
///
/// Each call to [`import_document`](Self::import_document) starts afresh;
/// the items and errors of the last call stay queryable until the next.
/// Errors are keyed by the index of the failing sub-document, or `-1` when
/// the document as a whole is rejected.
#[derive(Debug, Default)]
pub struct OrganizerImporter<'h> {
    items: Vec<OrganizerItem>,
    error_map: BTreeMap<i32, ImportError>,
    property_handler: Option<&'h mut dyn PropertyHandler>,
    extended: Option<ExtendedPropertyHandler>,
}

impl<'h> OrganizerImporter<'h> {
    /// Create an importer with no handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer as configured.
    pub fn from_config(config: &ImporterConfig) -> Self {
        Self {
            extended: config
                .extended_properties
                .then(ExtendedPropertyHandler::new),
            ..Self::default()
        }
    }

    /// Set the handler called for every property, replacing any previous
    /// one. It takes the place of the configured extended property handler.
    pub fn set_property_handler(&mut self, handler: Option<&'h mut dyn PropertyHandler>) {
        self.property_handler = handler;
    }

    /// Items from the last import, in sub-document order.
    pub fn items(&self) -> &[OrganizerItem] {
        &self.items
    }

    /// Errors from the last import.
    pub fn error_map(&self) -> &BTreeMap<i32, ImportError> {
        &self.error_map
    }

    /// Import a `VCALENDAR` document, returning whether every component
    /// imported cleanly.
    ///
    /// A failing component is recorded in [`error_map`](Self::error_map)
    /// and the rest still imported. `VTIMEZONE` components are skipped.
    #[tracing::instrument(skip_all, fields(component = document.component_type()))]
    pub fn import_document(&mut self, document: &VersitDocument) -> bool {
        self.items.clear();
        self.error_map.clear();

        if document.doc_type() != VersitType::ICalendar20
            || document.component_type() != KW_VCALENDAR
        {
            tracing::debug!(doc_type = %document.doc_type(), "not an iCalendar document");
            self.error_map.insert(-1, ImportError::InvalidDocumentError);
            return false;
        }
        if document.sub_documents().is_empty() {
            tracing::debug!("no components to import");
            self.error_map.insert(-1, ImportError::EmptyDocumentError);
            return false;
        }

        let mut items = Vec::new();
        let mut error_map = BTreeMap::new();
        let mut handler = self.handler();
        for (index, sub_document) in document.sub_documents().iter().enumerate() {
            let index = i32::try_from(index).unwrap_or(i32::MAX);
            match import_sub_document(document, sub_document, handler.as_deref_mut()) {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(err) => {
                    error_map.insert(index, err);
                }
            }
        }

        tracing::debug!(
            items = items.len(),
            errors = error_map.len(),
            "imported document"
        );
        self.items = items;
        self.error_map = error_map;
        self.error_map.is_empty()
    }

    fn handler(&mut self) -> Option<&mut (dyn PropertyHandler + 'h)> {
        match &mut self.property_handler {
            Some(handler) => Some(&mut **handler),
            None => match &mut self.extended {
                Some(handler) => Some(handler),
                None => None,
            },
        }
    }
}

fn item_type(component: &str) -> Option<ItemType> {
    match component {
        KW_VEVENT => Some(ItemType::Event),
        KW_VTODO => Some(ItemType::Todo),
        KW_VJOURNAL => Some(ItemType::Journal),
        _ => None,
    }
}

/// Import one component, `Ok(None)` when it is skipped.
fn import_sub_document<'h>(
    top_level: &VersitDocument,
    sub_document: &VersitDocument,
    mut handler: Option<&mut (dyn PropertyHandler + 'h)>,
) -> Result<Option<OrganizerItem>, ImportError> {
    let component = sub_document.component_type();
    if component == KW_VTIMEZONE {
        tracing::debug!("skipping timezone");
        return Ok(None);
    }
    let Some(item_type) = item_type(component) else {
        tracing::warn!(component, "skipping unknown component");
        return Err(ImportError::InvalidDocumentError);
    };
    if sub_document.properties().is_empty() {
        tracing::debug!(component, "component has no properties");
        return Err(ImportError::EmptyDocumentError);
    }

    tracing::debug!(component, "importing component");
    let mut item = OrganizerItem::new(item_type);
    for property in sub_document.properties() {
        let mapped = match mapping(property.name()) {
            Some(map) => map(sub_document, property, &item).unwrap_or_else(|err| {
                tracing::debug!(property = property.name(), %err, "dropping unparsable property");
                None
            }),
            None => None,
        };

        let mut processed = mapped.is_some();
        let mut details = mapped.unwrap_or_default();
        if let Some(handler) = handler.as_deref_mut() {
            handler.property_processed(sub_document, property, &item, &mut processed, &mut details);
        }
        if !processed {
            tracing::trace!(property = property.name(), "property not imported");
        }
        for detail in details {
            save_detail(&mut item, detail);
        }
    }

    for alarm in sub_document.sub_documents() {
        if alarm.component_type() == KW_VALARM {
            import_alarm(alarm, &mut item, handler.as_deref_mut());
        } else {
            tracing::debug!(component = alarm.component_type(), "skipping nested component");
        }
    }

    if let Some(handler) = handler {
        handler.sub_document_processed(top_level, sub_document, &mut item);
    }
    Ok(Some(item))
}

/// Turn a `VALARM` into a reminder detail of `item`. The alarm is dropped
/// when the handler takes the reminder away from its `ACTION`.
fn import_alarm(
    alarm: &VersitDocument,
    item: &mut OrganizerItem,
    mut handler: Option<&mut (dyn PropertyHandler + '_)>,
) {
    let Some(mut reminder) = new_reminder(alarm) else {
        tracing::debug!("skipping alarm without a known action");
        return;
    };

    let mut vetoed = false;
    for property in alarm.properties() {
        let mapped = match alarm_mapping(property.name()) {
            Some(map) => map(property, &reminder, item).unwrap_or_else(|err| {
                tracing::debug!(property = property.name(), %err, "dropping unparsable property");
                None
            }),
            None => None,
        };

        let mut processed = mapped.is_some();
        let mut details: Vec<Detail> = mapped.into_iter().collect();
        if let Some(handler) = handler.as_deref_mut() {
            handler.property_processed(alarm, property, item, &mut processed, &mut details);
        }
        if property.name() == KW_ACTION && !details.iter().any(|d| d.kind().is_reminder()) {
            vetoed = true;
        }
        for detail in details {
            if detail.kind() == reminder.kind() {
                reminder = detail;
            } else {
                save_detail(item, detail);
            }
        }
    }
    if vetoed {
        tracing::debug!("skipping alarm whose action was vetoed");
        return;
    }
    item.save_detail(reminder);
}

/// Save a detail, turning the item into an occurrence when it gains a
/// parent.
fn save_detail(item: &mut OrganizerItem, detail: Detail) {
    if matches!(detail, Detail::Parent(_)) {
        match item.item_type() {
            ItemType::Event => item.set_item_type(ItemType::EventOccurrence),
            ItemType::Todo => item.set_item_type(ItemType::TodoOccurrence),
            _ => {}
        }
    }
    item.save_detail(detail);
}
