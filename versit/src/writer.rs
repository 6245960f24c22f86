// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Write document trees as Versit text.
//!
//! Lines end with CRLF and are folded at a configurable octet width without
//! splitting a UTF-8 sequence or an escape.
//!
//! # Example
//!
//! ```
//! use pimkit_versit::{VersitDocument, VersitProperty, VersitType, WriteOptions};
//!
//! let doc = VersitDocument::new(VersitType::ICalendar20, "VCALENDAR")
//!     .with_property(VersitProperty::preformatted("VERSION", "2.0"));
//! let text = WriteOptions::default().write_to_string(&doc).unwrap();
//! assert_eq!(text, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
//! ```

use std::io::{self, Write};

use serde::Deserialize;

use crate::document::{VersitDocument, VersitProperty, VersitValue};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::value::text::escape_text;

/// Write documents to a `String` with default options.
///
/// # Errors
/// Returns an error if writing to the internal buffer fails.
pub fn write_documents(documents: &[VersitDocument]) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new(&mut buffer, WriteOptions::default());
    for document in documents {
        writer.write_document(document)?;
    }
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Options for the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)`.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl WriteOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write a document to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, document: &VersitDocument, w: &mut impl Write) -> io::Result<()> {
        Writer::new(w, *self).write_document(document)
    }

    /// Write a document to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to_string(&self, document: &VersitDocument) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(document, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Continuation character after the CRLF of a folded line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldingStyle {
    /// CRLF + SPACE
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }
}

/// Writer of Versit text to any `Write` implementer.
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    options: WriteOptions,
    /// Current line length in bytes, excluding the pending CRLF.
    line_length: usize,
}

impl<W: Write> Writer<W> {
    /// Create a new writer with options.
    pub fn new(writer: W, options: WriteOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Consumes this writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a document and everything nested in it.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_document(&mut self, document: &VersitDocument) -> io::Result<()> {
        write!(self, "{KW_BEGIN}:{}", document.component_type())?;
        self.writeln()?;
        for property in document.properties() {
            self.write_property(property)?;
        }
        for sub in document.sub_documents() {
            self.write_document(sub)?;
        }
        write!(self, "{KW_END}:{}", document.component_type())?;
        self.writeln()
    }

    /// Write one content line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&mut self, property: &VersitProperty) -> io::Result<()> {
        let mut line = String::new();
        for group in property.groups() {
            line.push_str(group);
            line.push('.');
        }
        line.push_str(property.name());
        for (name, value) in property.parameters() {
            line.push(';');
            line.push_str(name);
            line.push('=');
            if value.contains([':', ';', ',']) {
                line.push('"');
                line.push_str(value);
                line.push('"');
            } else {
                line.push_str(value);
            }
        }
        line.push(':');
        match property.value() {
            VersitValue::Text(text) => line.push_str(&escape_text(text)),
            VersitValue::List(items) => {
                let items: Vec<_> = items.iter().map(|s| escape_text(s)).collect();
                line.push_str(&items.join(","));
            }
            VersitValue::Preformatted(raw) => line.push_str(raw),
        }
        self.write_all(line.as_bytes())?;
        self.writeln()
    }

    fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer.write_all(self.options.folding_style.as_bytes())?;
        self.line_length = 1;
        Ok(())
    }
}

impl<W: Write> Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            self.writer.write_all(buf)?;
            return Ok(buf.len());
        };

        let mut remaining = buf;
        while !remaining.is_empty() {
            if self.line_length >= max_len {
                self.insert_fold()?;
            }
            let available = max_len.saturating_sub(self.line_length);
            let len = safe_write_length(remaining, available);
            let (head, tail) = remaining.split_at(len);
            self.writer.write_all(head)?;
            self.line_length += len;
            remaining = tail;
            if !remaining.is_empty() {
                self.insert_fold()?;
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Number of bytes of `buf` to write on the current line, at most
/// `max_bytes` unless the first character alone is longer.
///
/// The cut never lands inside a UTF-8 sequence or between a backslash and the
/// character it escapes.
fn safe_write_length(buf: &[u8], max_bytes: usize) -> usize {
    if max_bytes >= buf.len() {
        return buf.len();
    }

    let is_continuation = |i: usize| buf.get(i).is_some_and(|b| b & 0xC0 == 0x80);

    let mut pos = max_bytes;
    while pos > 0 && is_continuation(pos) {
        pos -= 1;
    }

    // an odd run of backslashes before the cut opens an escape
    let backslashes = buf
        .get(..pos)
        .map_or(0, |head| head.iter().rev().take_while(|&&b| b == b'\\').count());
    if backslashes % 2 == 1 {
        pos -= 1;
    }

    if pos == 0 {
        // write the first character or escape whole, even if it overflows
        pos = match buf.first() {
            Some(b'\\') => 2,
            _ => 1,
        };
        while is_continuation(pos) {
            pos += 1;
        }
    }
    pos.min(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::VersitType;

    fn lines(text: &str) -> Vec<&str> {
        text.split_terminator("\r\n").collect()
    }

    #[test]
    fn writes_parameters_and_values() {
        let doc = VersitDocument::new(VersitType::ICalendar20, "VEVENT")
            .with_property(
                VersitProperty::text("SUMMARY", "a, b; c")
                    .with_parameter("ALTREP", "cid:x")
                    .with_parameter("LANGUAGE", "en"),
            )
            .with_property(VersitProperty::new(
                "CATEGORIES",
                VersitValue::List(vec!["x,y".to_string(), "z".to_string()]),
            ))
            .with_property(
                VersitProperty::preformatted("RRULE", "FREQ=DAILY;COUNT=2").with_group("g"),
            );
        let text = WriteOptions::default().write_to_string(&doc).unwrap();
        assert_eq!(
            lines(&text),
            [
                "BEGIN:VEVENT",
                "SUMMARY;ALTREP=\"cid:x\";LANGUAGE=en:a\\, b\\; c",
                "CATEGORIES:x\\,y,z",
                "g.RRULE:FREQ=DAILY;COUNT=2",
                "END:VEVENT",
            ]
        );
    }

    #[test]
    fn folds_long_lines() {
        let doc = VersitDocument::new(VersitType::ICalendar20, "VEVENT")
            .with_property(VersitProperty::text("DESCRIPTION", "x".repeat(200)));
        let text = WriteOptions::default().write_to_string(&doc).unwrap();
        let physical = lines(&text);
        assert!(physical.iter().all(|l| l.len() <= 75), "{physical:?}");
        assert_eq!(physical[1].len(), 75);
        assert!(physical[2].starts_with(' '));

        let unfolded = text.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("DESCRIPTION:{}", "x".repeat(200))));
    }

    #[test]
    fn folding_keeps_utf8_and_escapes_whole() {
        let value = "ü\\n".repeat(40);
        let doc = VersitDocument::new(VersitType::ICalendar20, "VEVENT")
            .with_property(VersitProperty::preformatted("X-TEXT", value.clone()));
        let text = WriteOptions::default()
            .folding(Some(10))
            .folding_style(FoldingStyle::Tab)
            .write_to_string(&doc)
            .unwrap();
        for line in lines(&text) {
            assert!(line.len() <= 10, "{line:?}");
            assert!(!line.ends_with('\\') || line.ends_with("\\\\"), "{line:?}");
        }
        assert!(text.replace("\r\n\t", "").contains(&value));
    }

    #[test]
    fn folding_can_be_disabled() {
        let doc = VersitDocument::new(VersitType::ICalendar20, "VEVENT")
            .with_property(VersitProperty::text("DESCRIPTION", "y".repeat(100)));
        let text = WriteOptions::default().folding(None).write_to_string(&doc).unwrap();
        assert_eq!(lines(&text)[1].len(), "DESCRIPTION:".len() + 100);
    }

    #[test]
    fn safe_length_backs_off() {
        assert_eq!(safe_write_length(b"abc", 5), 3);
        assert_eq!(safe_write_length(b"ab\\n", 3), 2);
        assert_eq!(safe_write_length(b"a\\\\b", 3), 3);
        assert_eq!(safe_write_length("aü".as_bytes(), 2), 1);
        assert_eq!(safe_write_length("üa".as_bytes(), 1), 2);
        assert_eq!(safe_write_length(b"\\n", 1), 2);
    }
}
