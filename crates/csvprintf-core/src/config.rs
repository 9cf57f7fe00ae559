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

//! Reader configuration.
//!
//! A [`ReaderConfig`] is captured by value when a [`RowReader`](crate::RowReader)
//! is built; nothing in the tokenizer consults global state.
//!
//! # Examples
//!
//! ```
//! use csvprintf_core::{parse_char_literal, ReaderConfig};
//!
//! let config = ReaderConfig::new()
//!     .with_separator(parse_char_literal("\\t").unwrap())
//!     .with_headers(true);
//! assert_eq!(config.separator(), b'\t');
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;

/// Tokenizer configuration: quote and separator bytes plus header handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    quote: u8,
    separator: u8,
    has_headers: bool,
    skip_blank_lines: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            quote: Self::DEFAULT_QUOTE,
            separator: Self::DEFAULT_SEPARATOR,
            has_headers: false,
            skip_blank_lines: false,
        }
    }
}

impl ReaderConfig {
    /// Default quote character.
    pub const DEFAULT_QUOTE: u8 = b'"';

    /// Default field separator.
    pub const DEFAULT_SEPARATOR: u8 = b',';

    /// Create a configuration with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Set the field separator.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Treat the first record as header names.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Silently drop lines holding nothing but a line terminator.
    ///
    /// When disabled (the default) such a line is a one-field row whose only
    /// field is empty.
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    #[inline]
    pub fn quote(&self) -> u8 {
        self.quote
    }

    #[inline]
    pub fn separator(&self) -> u8 {
        self.separator
    }

    #[inline]
    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    #[inline]
    pub fn skip_blank_lines(&self) -> bool {
        self.skip_blank_lines
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SameQuoteAndSeparator`] when the quote and
    /// separator bytes coincide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quote == self.separator {
            return Err(ConfigError::SameQuoteAndSeparator(self.quote));
        }
        Ok(())
    }
}

/// Parse a user-supplied character literal into a single byte.
///
/// Accepted forms:
///
/// - a single byte, taken literally (`,`, `;`, `|`)
/// - a backslash escape: `\a`, `\t`, `\b`, `\r`, `\f`, `\v`, `\\`, `\'`, `\"`
/// - a hexadecimal escape `\xHH` or an octal escape `\ooo`
///
/// A line feed can never be a quote or separator, and values above `0xff`
/// are rejected.
///
/// # Examples
///
/// ```
/// use csvprintf_core::parse_char_literal;
///
/// assert_eq!(parse_char_literal(";").unwrap(), b';');
/// assert_eq!(parse_char_literal("\\t").unwrap(), b'\t');
/// assert_eq!(parse_char_literal("\\x7c").unwrap(), b'|');
/// assert_eq!(parse_char_literal("\\047").unwrap(), b'\'');
/// assert!(parse_char_literal("\\n").is_err());
/// ```
pub fn parse_char_literal(literal: &str) -> Result<u8, ConfigError> {
    let invalid = || ConfigError::InvalidCharLiteral(literal.to_string());
    let bytes = literal.as_bytes();

    let value: u32 = match bytes {
        [ch] => u32::from(*ch),
        [b'\\', escape] => match escape {
            b'a' => 0x07,
            b't' => u32::from(b'\t'),
            b'b' => 0x08,
            b'r' => u32::from(b'\r'),
            b'f' => 0x0c,
            b'v' => 0x0b,
            b'\\' | b'\'' | b'"' => u32::from(*escape),
            _ => return Err(invalid()),
        },
        [b'\\', b'x', digits @ ..] if digits.len() == 2 => {
            if !digits.iter().all(u8::is_ascii_hexdigit) {
                return Err(invalid());
            }
            u32::from_str_radix(&literal[2..], 16).map_err(|_| invalid())?
        }
        [b'\\', digits @ ..] if digits.len() == 3 => {
            if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                return Err(invalid());
            }
            u32::from_str_radix(&literal[1..], 8).map_err(|_| invalid())?
        }
        _ => return Err(invalid()),
    };

    if value == u32::from(b'\n') {
        return Err(invalid());
    }
    u8::try_from(value).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.quote(), b'"');
        assert_eq!(config.separator(), b',');
        assert!(!config.has_headers());
        assert!(!config.skip_blank_lines());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_same_quote_and_separator_rejected() {
        let config = ReaderConfig::new().with_quote(b';').with_separator(b';');
        assert_eq!(
            config.validate(),
            Err(ConfigError::SameQuoteAndSeparator(b';'))
        );
    }

    #[test]
    fn test_parse_plain_characters() {
        assert_eq!(parse_char_literal(",").unwrap(), b',');
        assert_eq!(parse_char_literal("'").unwrap(), b'\'');
        assert_eq!(parse_char_literal(" ").unwrap(), b' ');
    }

    #[test]
    fn test_parse_simple_escapes() {
        assert_eq!(parse_char_literal("\\a").unwrap(), 0x07);
        assert_eq!(parse_char_literal("\\b").unwrap(), 0x08);
        assert_eq!(parse_char_literal("\\r").unwrap(), b'\r');
        assert_eq!(parse_char_literal("\\f").unwrap(), 0x0c);
        assert_eq!(parse_char_literal("\\v").unwrap(), 0x0b);
        assert_eq!(parse_char_literal("\\\\").unwrap(), b'\\');
        assert_eq!(parse_char_literal("\\\"").unwrap(), b'"');
        assert_eq!(parse_char_literal("\\'").unwrap(), b'\'');
    }

    #[test]
    fn test_parse_numeric_escapes() {
        assert_eq!(parse_char_literal("\\x09").unwrap(), b'\t');
        assert_eq!(parse_char_literal("\\xFF").unwrap(), 0xff);
        assert_eq!(parse_char_literal("\\073").unwrap(), b';');
        assert_eq!(parse_char_literal("\\377").unwrap(), 0xff);
    }

    #[test]
    fn test_parse_rejects_bad_literals() {
        for bad in ["", "ab", "\\n", "\\q", "\\x0a", "\\012", "\\400", "\\xZZ", "\\08", "é"] {
            assert!(
                parse_char_literal(bad).is_err(),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}
