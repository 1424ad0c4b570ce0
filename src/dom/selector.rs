// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! CSS-subset selector parsing.
//!
//! Supported grammar: compound simple selectors (`tag`, `*`, `#id`, `.class`, `[attr]`,
//! `[attr='v']`, `[attr*='v']`, `[attr^='v']`, `[attr$='v']`) joined by descendant
//! combinators (whitespace). Backslash escapes inside identifiers are honored (Tailwind
//! classes like `md\:grid-cols-2`). Comma-separated alternatives are *not* part of the
//! grammar; steps carry an ordered selector list instead.

use std::fmt;
use std::str::FromStr;

/// A parsed descendant chain, e.g. `.sidebar [data-nav='links'] a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse()
    }

    /// The compound selectors from outermost ancestor to the subject.
    pub(crate) fn parts(&self) -> &[Compound] {
        &self.parts
    }

    /// The compound the matched element itself must satisfy.
    pub(crate) fn subject(&self) -> &Compound {
        self.parts.last().expect("selector has at least one compound")
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One compound simple selector (no combinators).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrPredicate>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttrPredicate {
    pub(crate) name: String,
    pub(crate) op: AttrOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrOp {
    Present,
    Equals(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
}

impl AttrOp {
    pub(crate) fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::Present => value.is_some(),
            Self::Equals(expected) => value == Some(expected.as_str()),
            Self::Contains(needle) => value.is_some_and(|v| v.contains(needle.as_str())),
            Self::StartsWith(prefix) => value.is_some_and(|v| v.starts_with(prefix.as_str())),
            Self::EndsWith(suffix) => value.is_some_and(|v| v.ends_with(suffix.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { ch: char, at: usize },
    EmptyName { at: usize },
    UnclosedAttribute { at: usize },
    UnclosedQuote { at: usize },
    DanglingEscape,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("selector must not be empty"),
            Self::UnexpectedChar { ch, at } => {
                write!(f, "unexpected character '{ch}' at offset {at}")
            }
            Self::EmptyName { at } => write!(f, "empty name at offset {at}"),
            Self::UnclosedAttribute { at } => {
                write!(f, "attribute selector opened at offset {at} is not closed")
            }
            Self::UnclosedQuote { at } => {
                write!(f, "quoted value opened at offset {at} is not closed")
            }
            Self::DanglingEscape => f.write_str("selector ends with a dangling '\\' escape"),
        }
    }
}

impl std::error::Error for SelectorError {}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut parts = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            parts.push(self.parse_compound()?);
        }

        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        while let Some(ch) = self.peek() {
            match ch {
                ch if ch.is_whitespace() => break,
                '*' => {
                    self.pos += 1;
                    // Universal selector: no constraint on tag.
                }
                '#' => {
                    self.pos += 1;
                    compound.id = Some(self.parse_ident()?);
                }
                '.' => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                '[' => {
                    compound.attrs.push(self.parse_attr()?);
                }
                ch if is_ident_start(ch) => {
                    if compound.is_empty() {
                        compound.tag = Some(self.parse_ident()?);
                    } else {
                        return Err(SelectorError::UnexpectedChar { ch, at: self.pos });
                    }
                }
                ch => return Err(SelectorError::UnexpectedChar { ch, at: self.pos }),
            }
        }

        if compound.is_empty() && self.pos == start {
            return Err(SelectorError::EmptyName { at: start });
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '\\' => {
                    self.pos += 1;
                    let escaped = self.bump().ok_or(SelectorError::DanglingEscape)?;
                    ident.push(escaped);
                }
                ch if is_ident_char(ch) => {
                    self.pos += 1;
                    ident.push(ch);
                }
                _ => break,
            }
        }

        if ident.is_empty() {
            return Err(SelectorError::EmptyName { at: start });
        }
        Ok(ident)
    }

    fn parse_attr(&mut self) -> Result<AttrPredicate, SelectorError> {
        let open = self.pos;
        self.pos += 1; // consume '['
        self.skip_whitespace();

        let name = self.parse_ident()?;
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttrPredicate { name, op: AttrOp::Present });
            }
            Some('=') => {
                self.pos += 1;
                AttrKind::Equals
            }
            Some('*') => self.expect_op_eq(AttrKind::Contains)?,
            Some('^') => self.expect_op_eq(AttrKind::StartsWith)?,
            Some('$') => self.expect_op_eq(AttrKind::EndsWith)?,
            Some(ch) => return Err(SelectorError::UnexpectedChar { ch, at: self.pos }),
            None => return Err(SelectorError::UnclosedAttribute { at: open }),
        };

        self.skip_whitespace();
        let value = self.parse_attr_value()?;
        self.skip_whitespace();

        match self.bump() {
            Some(']') => Ok(AttrPredicate { name, op: op.with_value(value) }),
            Some(ch) => Err(SelectorError::UnexpectedChar { ch, at: self.pos - 1 }),
            None => Err(SelectorError::UnclosedAttribute { at: open }),
        }
    }

    fn expect_op_eq(&mut self, kind: AttrKind) -> Result<AttrKind, SelectorError> {
        self.pos += 1; // consume '*', '^', or '$'
        match self.bump() {
            Some('=') => Ok(kind),
            Some(ch) => Err(SelectorError::UnexpectedChar { ch, at: self.pos - 1 }),
            None => Err(SelectorError::UnclosedAttribute { at: self.pos }),
        }
    }

    fn parse_attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                let open = self.pos;
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some(ch) if ch == quote => return Ok(value),
                        Some('\\') => {
                            let escaped = self.bump().ok_or(SelectorError::DanglingEscape)?;
                            value.push(escaped);
                        }
                        Some(ch) => value.push(ch),
                        None => return Err(SelectorError::UnclosedQuote { at: open }),
                    }
                }
            }
            _ => {
                // Bare value: read until ']' or whitespace.
                let start = self.pos;
                let mut value = String::new();
                while let Some(ch) = self.peek() {
                    if ch == ']' || ch.is_whitespace() {
                        break;
                    }
                    self.pos += 1;
                    value.push(ch);
                }
                if value.is_empty() {
                    return Err(SelectorError::EmptyName { at: start });
                }
                Ok(value)
            }
        }
    }
}

enum AttrKind {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

impl AttrKind {
    fn with_value(self, value: String) -> AttrOp {
        match self {
            Self::Equals => AttrOp::Equals(value),
            Self::Contains => AttrOp::Contains(value),
            Self::StartsWith => AttrOp::StartsWith(value),
            Self::EndsWith => AttrOp::EndsWith(value),
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '-'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}
