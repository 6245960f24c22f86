// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for Versit content lines.

use std::fmt::{self, Display};

use logos::Logos;

/// Byte range of a token in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Tokenize Versit source text. Folded lines are joined; lexing failures
/// become [`Token::Error`].
pub fn tokenize(src: &str) -> impl Iterator<Item = SpannedToken<'_>> {
    Token::lexer(src).spanned().map(|(tok, span)| {
        let span = Span {
            start: span.start,
            end: span.end,
        };
        match tok {
            Ok(tok) => SpannedToken(tok, span),
            Err(()) => SpannedToken(Token::Error, span),
        }
    })
}

/// Token emitted by the Versit lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
#[logos(skip r"\r?\n[ \t]")] // skip folding
pub enum Token<'a> {
    /// Double Quote (")
    #[token(r#"""#)]
    DQuote,

    /// Comma (,)
    #[token(",")]
    Comma,

    /// Colon (:)
    #[token(":")]
    Colon,

    /// Semicolon (;)
    #[token(";")]
    Semicolon,

    /// Equal sign (=)
    #[token("=")]
    Equal,

    /// Runs of printable ASCII punctuation, space and tab
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'a str),

    /// Line break, CRLF or a bare LF
    #[regex(r"\r?\n")]
    Newline,

    /// ASCII word characters: 0-9, A-Z, a-z, underscore, hyphen
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'a str),

    /// Runs of non-ASCII characters
    #[regex(r"[^\x00-\x7F]+")]
    UnicodeText(&'a str),

    /// Control characters and anything else the lexer rejects
    Error,
}

impl Token<'_> {
    /// Source text of the token, empty for [`Token::Newline`] and [`Token::Error`].
    pub fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Symbol(s) | Token::UnicodeText(s) => s,
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Equal => "=",
            Token::DQuote => "\"",
            Token::Newline | Token::Error => "",
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Symbol(s) => write!(f, "Symbol({s})"),
            Self::Newline => write!(f, "Newline"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its span in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);
