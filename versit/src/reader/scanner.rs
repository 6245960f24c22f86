// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for Versit content lines.
//!
//! ```text
//! contentline = [group "."] name *(";" param) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//!             / param-value                  ; vCard 2.1 bare TYPE value
//! ```

use std::iter::Peekable;

use crate::reader::lexer::{Span, SpannedToken, Token};

/// A scanned content line with unfolded, still escaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Groups before the name, e.g. `item1` in `item1.TEL`.
    pub groups: Vec<String>,

    /// Property name as written.
    pub name: String,

    /// Parameters in source order; multi-valued parameters are flattened.
    pub parameters: Vec<(String, String)>,

    /// Raw value text.
    pub value: String,

    /// Byte offset of the first token of the line.
    pub start: usize,
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ContentLineError {
    /// Missing colon separator, e.g. `SUMMARY value`.
    #[error("missing colon in property {0}")]
    MissingColon(String),

    /// The line does not start with a name.
    #[error("missing property name")]
    EmptyName,

    /// A parameter has no name before `=`.
    #[error("empty parameter name")]
    EmptyParameterName,

    /// A quoted parameter value is not closed on the same line.
    #[error("unterminated quoted string")]
    UnterminatedQuote,

    /// The line contains a control character.
    #[error("invalid character")]
    InvalidCharacter,
}

/// Scan a token stream into content lines, stopping at the first malformed
/// line. Blank lines are skipped.
///
/// # Errors
/// Returns the byte offset of the malformed line with the reason.
pub fn scan_content_lines<'src>(
    tokens: impl IntoIterator<Item = SpannedToken<'src>>,
) -> Result<Vec<ContentLine>, (usize, ContentLineError)> {
    let mut tokens = tokens.into_iter().peekable();
    let mut lines = Vec::new();

    while let Some(&SpannedToken(token, span)) = tokens.peek() {
        if token == Token::Newline {
            tokens.next();
            continue;
        }
        let line = scan_content_line(&mut tokens).map_err(|err| (span.start, err))?;
        lines.push(line);
    }

    Ok(lines)
}

fn scan_content_line<'src, I>(tokens: &mut Peekable<I>) -> Result<ContentLine, ContentLineError>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let start = tokens.peek().map_or(0, |SpannedToken(_, Span { start, .. })| *start);

    let mut groups = scan_name(tokens)
        .split('.')
        .map(str::to_string)
        .collect::<Vec<_>>();
    let name = groups.pop().unwrap_or_default();
    if name.is_empty() || groups.iter().any(String::is_empty) {
        consume_until_newline(tokens);
        return Err(ContentLineError::EmptyName);
    }

    let mut parameters = Vec::new();
    while let Some(SpannedToken(Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
        if let Err(err) = scan_parameter(tokens, &mut parameters) {
            consume_until_newline(tokens);
            return Err(err);
        }
    }

    match tokens.next() {
        Some(SpannedToken(Token::Colon, _)) => {}
        Some(SpannedToken(Token::Error, _)) => {
            consume_until_newline(tokens);
            return Err(ContentLineError::InvalidCharacter);
        }
        Some(SpannedToken(Token::Newline, _)) | None => {
            return Err(ContentLineError::MissingColon(name));
        }
        Some(_) => {
            consume_until_newline(tokens);
            return Err(ContentLineError::MissingColon(name));
        }
    }

    let mut value = String::new();
    while let Some(SpannedToken(token, _)) = tokens.next() {
        match token {
            Token::Newline => break,
            Token::Error => {
                consume_until_newline(tokens);
                return Err(ContentLineError::InvalidCharacter);
            }
            token => value.push_str(token.text()),
        }
    }

    Ok(ContentLine {
        groups,
        name,
        parameters,
        value,
        start,
    })
}

/// Collect a name with optional dotted groups.
fn scan_name<'src, I>(tokens: &mut Peekable<I>) -> String
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut name = String::new();
    while let Some(&SpannedToken(token, _)) = tokens.peek() {
        match token {
            Token::Word(s) => name.push_str(s),
            Token::Symbol(".") => name.push('.'),
            _ => break,
        }
        tokens.next();
    }
    name
}

/// Scan one parameter after its `;`, pushing one entry per value.
fn scan_parameter<'src, I>(
    tokens: &mut Peekable<I>,
    parameters: &mut Vec<(String, String)>,
) -> Result<(), ContentLineError>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let name = scan_name(tokens);

    if !matches!(tokens.peek(), Some(SpannedToken(Token::Equal, _))) {
        // vCard 2.1 style bare parameter, e.g. `TEL;HOME:...`
        if name.is_empty() {
            return Err(ContentLineError::EmptyParameterName);
        }
        parameters.push(("TYPE".to_string(), name));
        return Ok(());
    }
    tokens.next();
    if name.is_empty() {
        return Err(ContentLineError::EmptyParameterName);
    }

    let name = name.to_ascii_uppercase();
    loop {
        let value = scan_parameter_value(tokens)?;
        parameters.push((name.clone(), value));
        match tokens.peek() {
            Some(SpannedToken(Token::Comma, _)) => {
                tokens.next();
            }
            _ => break Ok(()),
        }
    }
}

fn scan_parameter_value<'src, I>(tokens: &mut Peekable<I>) -> Result<String, ContentLineError>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut value = String::new();

    if let Some(SpannedToken(Token::DQuote, _)) = tokens.peek() {
        tokens.next();
        loop {
            match tokens.peek().map(|t| t.0) {
                Some(Token::DQuote) => {
                    tokens.next();
                    return Ok(value);
                }
                Some(Token::Newline) | None => return Err(ContentLineError::UnterminatedQuote),
                Some(Token::Error) => return Err(ContentLineError::InvalidCharacter),
                Some(token) => {
                    value.push_str(token.text());
                    tokens.next();
                }
            }
        }
    }

    while let Some(&SpannedToken(token, _)) = tokens.peek() {
        match token {
            Token::Semicolon | Token::Colon | Token::Comma | Token::Newline => break,
            Token::Error => return Err(ContentLineError::InvalidCharacter),
            token => value.push_str(token.text()),
        }
        tokens.next();
    }
    Ok(value)
}

/// Consume all tokens until a newline is found (including the newline).
fn consume_until_newline<'src, I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    for SpannedToken(token, _) in tokens.by_ref() {
        if token == Token::Newline {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::lexer::tokenize;

    fn scan(src: &str) -> Result<Vec<ContentLine>, (usize, ContentLineError)> {
        scan_content_lines(tokenize(src))
    }

    fn pairs(params: &[(&str, &str)]) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn scans_name_parameters_and_value() {
        let lines = scan("DTSTART;TZID=\"America/New_York\":20260101T090000\r\n").unwrap();
        assert_eq!(
            lines,
            [ContentLine {
                groups: Vec::new(),
                name: "DTSTART".to_string(),
                parameters: pairs(&[("TZID", "America/New_York")]),
                value: "20260101T090000".to_string(),
                start: 0,
            }]
        );
    }

    #[test]
    fn value_keeps_separators_and_escapes() {
        let lines = scan("DESCRIPTION:a:b;c\\, d=e\r\n").unwrap();
        assert_eq!(lines[0].value, "a:b;c\\, d=e");
    }

    #[test]
    fn multi_valued_and_bare_parameters() {
        let lines = scan("item1.TEL;type=home,voice;PREF:+1 555\r\n").unwrap();
        assert_eq!(lines[0].groups, ["item1"]);
        assert_eq!(lines[0].name, "TEL");
        assert_eq!(
            lines[0].parameters,
            pairs(&[("TYPE", "home"), ("TYPE", "voice"), ("TYPE", "PREF")])
        );
    }

    #[test]
    fn quoted_parameter_may_contain_separators() {
        let lines = scan("ATTENDEE;CN=\"Doe, Jane; PhD\":mailto:jane@example.com\r\n").unwrap();
        assert_eq!(lines[0].parameters, pairs(&[("CN", "Doe, Jane; PhD")]));
        assert_eq!(lines[0].value, "mailto:jane@example.com");
    }

    #[test]
    fn skips_blank_lines() {
        let lines = scan("A:1\r\n\r\nB:2\r\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].start, 7);
    }

    #[test]
    fn reports_malformed_lines() {
        assert_eq!(
            scan("A:1\r\nSUMMARY text\r\n"),
            Err((5, ContentLineError::MissingColon("SUMMARY".to_string())))
        );
        assert_eq!(
            scan("X;CN=\"open:1\r\n"),
            Err((0, ContentLineError::UnterminatedQuote))
        );
        assert_eq!(scan(":value\r\n"), Err((0, ContentLineError::EmptyName)));
        assert_eq!(
            scan("A:b\x07c\r\n"),
            Err((0, ContentLineError::InvalidCharacter))
        );
    }
}
