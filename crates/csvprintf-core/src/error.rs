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

//! Error types for tokenizing, compiling and rendering.
//!
//! Every failure in this crate is fatal to a conversion run: there is no
//! partial-row recovery. Errors therefore carry enough context (line numbers,
//! offending bytes, template excerpts) to produce a single useful diagnostic.
//!
//! # Error Categories
//!
//! - [`LexError`]: malformed CSV input or I/O failure while reading it
//! - [`CompileError`]: malformed format template or unresolvable accessor
//! - [`ConfigError`]: invalid quote/separator configuration
//! - [`HeaderError`]: header names unusable for the selected output
//! - [`RenderError`]: out-of-range accessor under the strict policy

use std::fmt;
use std::io;
use thiserror::Error;

/// Maximum number of template characters quoted in compile diagnostics.
pub const EXCERPT_LEN: usize = 20;

/// Renders a byte for diagnostics, escaping anything non-printable.
fn show_byte(byte: &u8) -> String {
    std::ascii::escape_default(*byte).to_string()
}

/// Errors raised while tokenizing CSV input.
#[derive(Debug, Error)]
pub enum LexError {
    /// Input ended inside a quoted field.
    #[error("line {line}: premature end of input inside quoted field")]
    PrematureEof {
        /// Line on which input ended (1-based).
        line: usize,
    },

    /// Something other than whitespace, a separator or a line end followed a
    /// closing quote.
    #[error("line {line}: unexpected character \"{}\" after closing quote", show_byte(.byte))]
    UnexpectedAfterQuote {
        /// Line of the offending byte (1-based).
        line: usize,
        /// The offending byte.
        byte: u8,
    },

    /// Field text is not valid in the configured character encoding.
    #[error("line {line}: illegal {encoding} sequence starting with byte 0x{byte:02x}")]
    Decode {
        /// Line on which the record started (1-based).
        line: usize,
        /// First byte of the malformed sequence.
        byte: u8,
        /// Name of the source encoding.
        encoding: String,
    },

    /// Reading the underlying stream failed.
    #[error("line {line}: read error: {source}")]
    Io {
        /// Line being read when the failure happened (1-based).
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LexError {
    /// Returns the 1-based line number associated with the error.
    pub fn line(&self) -> usize {
        match self {
            LexError::PrematureEof { line }
            | LexError::UnexpectedAfterQuote { line, .. }
            | LexError::Decode { line, .. }
            | LexError::Io { line, .. } => *line,
        }
    }
}

/// The part of a conversion specification an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecPart {
    /// The accessor directly after `%`.
    Conversion,
    /// A `*` field width.
    Width,
    /// A `.*` precision.
    Precision,
}

impl fmt::Display for SpecPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecPart::Conversion => write!(f, "format specification"),
            SpecPart::Width => write!(f, "field width for format specification"),
            SpecPart::Precision => write!(f, "precision for format specification"),
        }
    }
}

/// Errors raised while compiling a format template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The template ended before the conversion character.
    #[error("truncated format specification starting at \"{excerpt}...\"")]
    Truncated { excerpt: String },

    /// No `N$` or `{name}` accessor where one is required.
    #[error("missing required column accessor in {part} starting at \"{excerpt}...\"")]
    MissingAccessor { part: SpecPart, excerpt: String },

    /// A `{name}` accessor is unterminated or an ordinal does not fit.
    #[error("malformed column accessor in {part} starting at \"{excerpt}...\"")]
    MalformedAccessor { part: SpecPart, excerpt: String },

    /// A `{name}` accessor was used without header names.
    #[error("symbolic column accessors require header names in {part} starting at \"{excerpt}...\"")]
    HeaderNamesRequired { part: SpecPart, excerpt: String },

    /// No header field matches the name.
    #[error("unknown column name \"{name}\" in symbolic column accessor in {part} starting at \"{excerpt}...\"")]
    UnknownColumn {
        name: String,
        part: SpecPart,
        excerpt: String,
    },

    /// More than one header field matches the name.
    #[error("ambiguous column name \"{name}\" in symbolic column accessor in {part} starting at \"{excerpt}...\"")]
    AmbiguousColumn {
        name: String,
        part: SpecPart,
        excerpt: String,
    },

    /// A template stage transition was requested in the wrong state.
    #[error("format template {0}")]
    OutOfOrder(&'static str),
}

/// Errors in reader configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Quote and separator are the same byte.
    #[error("quote and field separators cannot be the same character (\"{}\")", show_byte(.0))]
    SameQuoteAndSeparator(u8),

    /// A character literal could not be parsed.
    #[error("invalid character literal \"{0}\"")]
    InvalidCharLiteral(String),
}

/// Header names that cannot be used by the selected output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Two header fields are byte-for-byte equal.
    #[error("duplicate column name \"{0}\"")]
    DuplicateName(String),

    /// Two header fields map to the same identifier.
    #[error("duplicate (bash variable) column names \"{first}\" and \"{second}\"")]
    DuplicateIdentifier { first: String, second: String },

    /// A header field is empty where an identifier is needed.
    #[error("illegal empty string column name")]
    EmptyName,
}

/// Errors raised while rendering a row against a compiled template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// An accessor points past the end of the row.
    #[error("line {line}: column {ordinal} requested but row has only {width} fields")]
    FieldOutOfRange {
        ordinal: usize,
        width: usize,
        line: usize,
    },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result alias for tokenizer operations.
pub type LexResult<T> = Result<T, LexError>;

/// Result alias for operations that may fail in any stage.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_line() {
        let err = LexError::UnexpectedAfterQuote { line: 7, byte: b'x' };
        assert_eq!(err.line(), 7);
        assert_eq!(
            err.to_string(),
            "line 7: unexpected character \"x\" after closing quote"
        );
    }

    #[test]
    fn test_unprintable_byte_is_escaped() {
        let err = LexError::UnexpectedAfterQuote { line: 1, byte: 0x01 };
        assert!(err.to_string().contains("\\x01"));
    }

    #[test]
    fn test_decode_error_message() {
        let err = LexError::Decode {
            line: 3,
            byte: 0xff,
            encoding: "UTF-8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 3: illegal UTF-8 sequence starting with byte 0xff"
        );
    }

    #[test]
    fn test_compile_error_mentions_part() {
        let err = CompileError::MissingAccessor {
            part: SpecPart::Width,
            excerpt: "%1$*d".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required column accessor in field width for format specification starting at \"%1$*d...\""
        );
    }

    #[test]
    fn test_error_from_conversions() {
        let err: Error = ConfigError::SameQuoteAndSeparator(b',').into();
        assert!(matches!(err, Error::Config(_)));

        let err: Error = HeaderError::EmptyName.into();
        assert_eq!(err.to_string(), "illegal empty string column name");
    }
}
