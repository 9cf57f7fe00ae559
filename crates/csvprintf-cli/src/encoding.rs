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

//! Input character-set decoding for the XML and JSON outputs.

use crate::error::CliError;
use csvprintf_core::LexError;
use encoding_rs::{DecoderResult, Encoding};

/// Default input encoding label.
pub const DEFAULT_ENCODING: &str = "ISO-8859-1";

/// Decodes field bytes from a fixed source encoding into UTF-8.
///
/// Labels are resolved per the WHATWG Encoding Standard, so `ISO-8859-1`
/// and `latin1` select windows-1252.
///
/// # Examples
///
/// ```
/// use csvprintf_cli::encoding::FieldDecoder;
///
/// let decoder = FieldDecoder::for_label("ISO-8859-1").unwrap();
/// assert_eq!(decoder.decode(b"caf\xe9", 1).unwrap(), "café");
///
/// let utf8 = FieldDecoder::for_label("utf-8").unwrap();
/// assert!(utf8.decode(b"caf\xe9", 7).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder {
    encoding: &'static Encoding,
}

impl FieldDecoder {
    /// Look up an encoding by label.
    pub fn for_label(label: &str) -> Result<Self, CliError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| CliError::UnknownEncoding(label.to_string()))
    }

    /// Canonical name of the source encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode one field. `line` is reported if the bytes are malformed.
    pub fn decode(&self, bytes: &[u8], line: usize) -> Result<String, LexError> {
        if self.encoding == encoding_rs::UTF_8 {
            return std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| self.malformed(bytes, e.valid_up_to(), line));
        }

        let mut decoder = self.encoding.new_decoder_without_bom_handling();
        let capacity = decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len());
        let mut out = String::with_capacity(capacity);
        let mut consumed = 0;

        loop {
            let (result, read) =
                decoder.decode_to_string_without_replacement(&bytes[consumed..], &mut out, true);
            consumed += read;
            match result {
                DecoderResult::InputEmpty => return Ok(out),
                DecoderResult::OutputFull => out.reserve(bytes.len() - consumed + 16),
                DecoderResult::Malformed(bad, pending) => {
                    let start = consumed
                        .saturating_sub(usize::from(pending))
                        .saturating_sub(usize::from(bad));
                    return Err(self.malformed(bytes, start, line));
                }
            }
        }
    }

    fn malformed(&self, bytes: &[u8], start: usize, line: usize) -> LexError {
        LexError::Decode {
            line,
            byte: bytes.get(start).copied().unwrap_or_default(),
            encoding: self.encoding.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_is_known() {
        let decoder = FieldDecoder::for_label(DEFAULT_ENCODING).unwrap();
        assert_eq!(decoder.name(), "windows-1252");
        assert_eq!(decoder.decode(b"\xa9 2010", 1).unwrap(), "\u{a9} 2010");
    }

    #[test]
    fn test_unknown_label() {
        assert!(matches!(
            FieldDecoder::for_label("no-such-charset"),
            Err(CliError::UnknownEncoding(ref label)) if label == "no-such-charset"
        ));
    }

    #[test]
    fn test_utf8_passthrough_and_error() {
        let decoder = FieldDecoder::for_label("UTF-8").unwrap();
        assert_eq!(decoder.decode("naïve".as_bytes(), 1).unwrap(), "naïve");

        let err = decoder.decode(b"ab\xffcd", 5).unwrap_err();
        assert!(matches!(err, LexError::Decode { line: 5, byte: 0xff, .. }));
    }

    #[test]
    fn test_multibyte_source_encoding() {
        let decoder = FieldDecoder::for_label("Shift_JIS").unwrap();
        assert_eq!(decoder.decode(b"\x82\xa0", 1).unwrap(), "\u{3042}");

        let err = decoder.decode(b"ok\x82", 2).unwrap_err();
        assert!(matches!(err, LexError::Decode { line: 2, byte: 0x82, .. }));
    }

    #[test]
    fn test_empty_field() {
        let decoder = FieldDecoder::for_label("utf-16le").unwrap();
        assert_eq!(decoder.decode(b"", 1).unwrap(), "");
    }
}
