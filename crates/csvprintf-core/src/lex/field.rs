// csvprintf - CSV record formatting for the command line
//
// Copyright (c) 2025 The csvprintf contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Field lexing state machine.
//!
//! A field is either unquoted (whitespace-trimmed, terminated by the
//! separator or a line end) or quoted (taken verbatim, with a doubled quote
//! standing for one literal quote). Leading whitespace before either form is
//! discarded.
//!
//! # Quoted field states
//!
//! ```text
//!            quote            quote + non-quote
//!   Start ─────────▶ Inside ───────────────────▶ Closed ──▶ separator / LF / EOF
//!                     │  ▲                         │
//!                     └──┘ quote + quote           └─ whitespace skipped
//!                      (literal quote)
//! ```

use super::source::{CharSource, ReadMode};
use crate::config::ReaderConfig;
use crate::error::{LexError, LexResult};
use std::io::BufRead;

/// What terminated a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEnd {
    /// A separator was consumed; another field follows.
    Separator,
    /// A line end or end of input was consumed; the row is complete.
    EndOfRow,
}

/// A lexed field and the reason it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedField {
    pub value: Vec<u8>,
    pub end: FieldEnd,
}

impl LexedField {
    #[inline]
    fn new(value: Vec<u8>, end: FieldEnd) -> Self {
        Self { value, end }
    }

    /// Returns `true` if more fields follow in the same row.
    #[inline]
    pub fn more(&self) -> bool {
        self.end == FieldEnd::Separator
    }
}

/// Whitespace as classified by C `isspace` in the "C" locale.
#[inline]
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Trim leading and trailing whitespace in place.
fn trim_in_place(buf: &mut Vec<u8>) {
    let end = buf.iter().rposition(|&b| !is_space(b)).map_or(0, |i| i + 1);
    buf.truncate(end);
    let start = buf.iter().position(|&b| !is_space(b)).unwrap_or(buf.len());
    buf.drain(..start);
}

/// Lexes one field at a time from a [`CharSource`].
///
/// # Examples
///
/// ```
/// use csvprintf_core::lex::{CharSource, FieldEnd, FieldLexer};
/// use csvprintf_core::ReaderConfig;
///
/// let config = ReaderConfig::default();
/// let mut source = CharSource::new(&b"  abc  ,\"  x  \"\n"[..]);
/// let mut lexer = FieldLexer::new(&mut source, &config);
///
/// let first = lexer.next_field().unwrap();
/// assert_eq!(first.value, b"abc");
/// assert_eq!(first.end, FieldEnd::Separator);
///
/// let second = lexer.next_field().unwrap();
/// assert_eq!(second.value, b"  x  ");
/// assert_eq!(second.end, FieldEnd::EndOfRow);
/// ```
pub struct FieldLexer<'a, R> {
    source: &'a mut CharSource<R>,
    quote: u8,
    separator: u8,
}

impl<'a, R: BufRead> FieldLexer<'a, R> {
    pub fn new(source: &'a mut CharSource<R>, config: &ReaderConfig) -> Self {
        Self {
            source,
            quote: config.quote(),
            separator: config.separator(),
        }
    }

    /// Lex the next field, skipping leading whitespace.
    ///
    /// A line end or end of input before any field byte yields an empty
    /// field that completes the row.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::PrematureEof`] if input ends inside a quoted field,
    /// [`LexError::UnexpectedAfterQuote`] if a closing quote is followed by
    /// anything but whitespace, a separator or a line end, and
    /// [`LexError::Io`] if reading fails.
    pub fn next_field(&mut self) -> LexResult<LexedField> {
        loop {
            match self.source.next(ReadMode::Collapse)? {
                None | Some(b'\n') => return Ok(LexedField::new(Vec::new(), FieldEnd::EndOfRow)),
                // Whitespace goes first, so a whitespace separator never opens an empty field.
                Some(b) if is_space(b) => continue,
                Some(b) if b == self.quote => return self.quoted(),
                Some(b) if b == self.separator => {
                    return Ok(LexedField::new(Vec::new(), FieldEnd::Separator))
                }
                Some(b) => {
                    self.source.unread(b);
                    return self.unquoted();
                }
            }
        }
    }

    /// Lex an unquoted field; the first byte is known not to be whitespace.
    fn unquoted(&mut self) -> LexResult<LexedField> {
        let mut buf = Vec::new();
        let end = loop {
            match self.source.next(ReadMode::Collapse)? {
                None | Some(b'\n') => break FieldEnd::EndOfRow,
                Some(b) if b == self.separator => break FieldEnd::Separator,
                Some(b) => buf.push(b),
            }
        };
        trim_in_place(&mut buf);
        Ok(LexedField::new(buf, end))
    }

    /// Lex a quoted field; the opening quote has been consumed.
    fn quoted(&mut self) -> LexResult<LexedField> {
        let mut buf = Vec::new();

        // Inside
        loop {
            match self.source.next(ReadMode::Raw)? {
                None => {
                    return Err(LexError::PrematureEof {
                        line: self.source.line(),
                    })
                }
                Some(b) if b == self.quote => match self.source.next(ReadMode::Raw)? {
                    Some(next) if next == self.quote => buf.push(self.quote),
                    Some(next) => {
                        self.source.unread(next);
                        break;
                    }
                    None => break,
                },
                Some(b) => buf.push(b),
            }
        }

        // Closed
        loop {
            match self.source.next(ReadMode::Collapse)? {
                None | Some(b'\n') => return Ok(LexedField::new(buf, FieldEnd::EndOfRow)),
                Some(b) if b == self.separator => {
                    return Ok(LexedField::new(buf, FieldEnd::Separator))
                }
                Some(b) if is_space(b) => continue,
                Some(byte) => {
                    return Err(LexError::UnexpectedAfterQuote {
                        line: self.source.line(),
                        byte,
                    })
                }
            }
        }
    }
}
