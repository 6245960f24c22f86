// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read Versit text into document trees.
//!
//! ```text
//! Source Text → Lexer → Token Stream → Scanner → Content Lines → Tree Builder → Documents
//! ```

mod lexer;
mod scanner;
mod tree_builder;

pub use crate::reader::scanner::ContentLineError;

use crate::document::{VersitDocument, VersitProperty, VersitValue};
use crate::reader::lexer::tokenize;
use crate::reader::scanner::{ContentLine, scan_content_lines};
use crate::reader::tree_builder::build_tree;
use crate::value::text::{split_text_list, unescape_text};

/// Errors from reading Versit text. Every variant carries the 1-based line
/// number where the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReadError {
    /// A content line is malformed.
    #[error("line {line}: {kind}")]
    Syntax {
        /// Line number.
        line: usize,
        /// What is wrong with the line.
        kind: ContentLineError,
    },

    /// An `END` names a different component than the open `BEGIN`.
    #[error("line {line}: END:{found} does not close BEGIN:{expected}")]
    MismatchedEnd {
        /// Line number.
        line: usize,
        /// Component that is open.
        expected: String,
        /// Component named by the `END`.
        found: String,
    },

    /// An `END` without an open component.
    #[error("line {line}: END:{found} without BEGIN")]
    UnexpectedEnd {
        /// Line number.
        line: usize,
        /// Component named by the `END`.
        found: String,
    },

    /// The input ends inside a component.
    #[error("line {line}: BEGIN:{component} is never closed")]
    Unterminated {
        /// Line number of the `BEGIN`.
        line: usize,
        /// Component left open.
        component: String,
    },

    /// A property appears outside of any component.
    #[error("line {line}: property {name} outside of a component")]
    PropertyOutsideComponent {
        /// Line number.
        line: usize,
        /// Property name.
        name: String,
    },
}

impl ReadError {
    /// Line number where the error was found.
    pub fn line(&self) -> usize {
        match self {
            ReadError::Syntax { line, .. }
            | ReadError::MismatchedEnd { line, .. }
            | ReadError::UnexpectedEnd { line, .. }
            | ReadError::Unterminated { line, .. }
            | ReadError::PropertyOutsideComponent { line, .. } => *line,
        }
    }
}

/// Properties whose value is free text.
const TEXT_PROPERTIES: &[&str] = &[
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "COMMENT",
    "CONTACT",
    "UID",
    "RELATED-TO",
    "TZNAME",
    "FN",
    "NOTE",
    "TITLE",
    "ROLE",
];

/// Properties whose value is a comma separated list of text.
const LIST_PROPERTIES: &[&str] = &["CATEGORIES", "RESOURCES", "NICKNAME"];

/// Read every top-level document in `src`.
///
/// Folded lines are joined, property names upper-cased, and values typed by
/// property name: text is unescaped, lists are split, everything else is
/// kept preformatted.
///
/// # Errors
/// Returns the first malformed line or unbalanced component.
#[tracing::instrument(skip_all, fields(len = src.len()))]
pub fn read_documents(src: &str) -> Result<Vec<VersitDocument>, ReadError> {
    let line_of = |offset: usize| {
        src.get(..offset)
            .map_or(1, |head| head.bytes().filter(|&b| b == b'\n').count() + 1)
    };

    let lines = scan_content_lines(tokenize(src)).map_err(|(offset, kind)| ReadError::Syntax {
        line: line_of(offset),
        kind,
    })?;
    tracing::trace!(count = lines.len(), "scanned content lines");

    let documents = build_tree(lines, line_of, into_property)?;
    tracing::debug!(count = documents.len(), "read documents");
    Ok(documents)
}

fn into_property(line: ContentLine) -> VersitProperty {
    let name = line.name.to_ascii_uppercase();
    let value = if TEXT_PROPERTIES.contains(&name.as_str()) {
        VersitValue::Text(unescape_text(&line.value))
    } else if LIST_PROPERTIES.contains(&name.as_str()) {
        VersitValue::List(split_text_list(&line.value))
    } else {
        VersitValue::Preformatted(line.value)
    };

    let mut property = VersitProperty::new(name, value);
    for group in line.groups {
        property = property.with_group(group);
    }
    for (name, value) in line.parameters {
        property.add_parameter(name, value);
    }
    property
}
