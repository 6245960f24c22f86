// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing the document hierarchy from content lines.
//!
//! 1. On `BEGIN:X`, push a new document onto the stack
//! 2. On a property, add it to the document on top of the stack
//! 3. On `END:X`, pop from the stack and attach to the parent, or emit it as
//!    a root once the stack is empty

use crate::document::{VersitDocument, VersitProperty, VersitType};
use crate::keyword::{
    KW_BEGIN, KW_END, KW_VCALENDAR, KW_VCARD, KW_VERSION, KW_VERSION_VCARD21, KW_VERSION_VCARD30,
    KW_VERSION_VCARD40,
};
use crate::reader::ReadError;
use crate::reader::scanner::ContentLine;

/// Build root documents from content lines.
///
/// `line_of` maps a byte offset to a 1-based line number for error reports;
/// `into_property` types the value of a property line.
///
/// # Errors
/// Returns an error on unbalanced `BEGIN`/`END` or a property outside any
/// component.
pub fn build_tree(
    lines: Vec<ContentLine>,
    line_of: impl Fn(usize) -> usize,
    into_property: impl Fn(ContentLine) -> VersitProperty,
) -> Result<Vec<VersitDocument>, ReadError> {
    // (document, line of its BEGIN)
    let mut stack: Vec<(VersitDocument, usize)> = Vec::new();
    let mut roots = Vec::new();

    for line in lines {
        let line_no = line_of(line.start);
        if line.name.eq_ignore_ascii_case(KW_BEGIN) {
            let doc_type = stack
                .last()
                .map_or_else(|| root_type(&line.value), |(parent, _)| parent.doc_type());
            tracing::trace!(component = %line.value, line = line_no, "begin component");
            stack.push((VersitDocument::new(doc_type, line.value.trim()), line_no));
        } else if line.name.eq_ignore_ascii_case(KW_END) {
            let found = line.value.trim().to_ascii_uppercase();
            let Some((mut document, _)) = stack.pop() else {
                return Err(ReadError::UnexpectedEnd {
                    line: line_no,
                    found,
                });
            };
            if document.component_type() != found {
                return Err(ReadError::MismatchedEnd {
                    line: line_no,
                    expected: document.component_type().to_string(),
                    found,
                });
            }
            match stack.last_mut() {
                Some((parent, _)) => parent.add_sub_document(document),
                None => {
                    if document.component_type() == KW_VCARD {
                        let doc_type = vcard_type(&document);
                        document.set_doc_type_deep(doc_type);
                    }
                    roots.push(document);
                }
            }
        } else {
            let Some((document, _)) = stack.last_mut() else {
                return Err(ReadError::PropertyOutsideComponent {
                    line: line_no,
                    name: line.name,
                });
            };
            document.add_property(into_property(line));
        }
    }

    match stack.into_iter().next_back() {
        Some((document, line)) => Err(ReadError::Unterminated {
            line,
            component: document.component_type().to_string(),
        }),
        None => Ok(roots),
    }
}

fn root_type(component: &str) -> VersitType {
    match component.trim().eq_ignore_ascii_case(KW_VCALENDAR) {
        true => VersitType::ICalendar20,
        false => VersitType::Invalid,
    }
}

fn vcard_type(document: &VersitDocument) -> VersitType {
    let version = document
        .property(KW_VERSION)
        .and_then(|p| p.value().as_str())
        .map(str::trim);
    match version {
        Some(KW_VERSION_VCARD21) => VersitType::VCard21,
        Some(KW_VERSION_VCARD30) => VersitType::VCard30,
        Some(KW_VERSION_VCARD40) => VersitType::VCard40,
        _ => VersitType::Invalid,
    }
}
