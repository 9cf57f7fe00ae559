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

//! Shell variable assignment output (`-b`).
//!
//! Without header names each record becomes an array assignment,
//! `ROW=( 'a' 'b' )`; with them, one assignment per column,
//! `name='a'; other='b';`. Field bytes are written unconverted.

use super::{numbered_column, RowSink};
use crate::error::CliError;
use csvprintf_core::{bash_identifier, HeaderNames, NameEquivalence, Row};
use std::io::Write;

/// Writes one line of bash assignments per record.
pub struct BashSink<W: Write> {
    out: W,
    names: Option<Vec<String>>,
}

impl<W: Write> BashSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, names: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for BashSink<W> {
    fn header(&mut self, header: &HeaderNames) -> Result<(), CliError> {
        header.ensure_unique(NameEquivalence::Identifier)?;
        self.names = Some(header.iter().map(bash_identifier).collect());
        Ok(())
    }

    fn row(&mut self, row: &Row) -> Result<(), CliError> {
        let mut line = Vec::with_capacity(64);
        match &self.names {
            None => {
                line.extend_from_slice(b"ROW=(");
                for field in row.iter() {
                    line.push(b' ');
                    quote_value(field, &mut line);
                }
                line.extend_from_slice(b" )");
            }
            Some(names) => {
                for (index, field) in row.iter().enumerate() {
                    if index > 0 {
                        line.push(b' ');
                    }
                    match names.get(index) {
                        Some(name) => line.extend_from_slice(name.as_bytes()),
                        None => line.extend_from_slice(numbered_column(index).as_bytes()),
                    }
                    line.push(b'=');
                    quote_value(field, &mut line);
                    line.push(b';');
                }
            }
        }
        line.push(b'\n');
        self.out.write_all(&line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CliError> {
        self.out.flush()?;
        Ok(())
    }
}

#[inline]
fn is_print(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// Quote a value for bash: plain `'...'` when every byte is printable ASCII
/// other than `'`, otherwise ANSI-C `$'...'` quoting.
fn quote_value(value: &[u8], out: &mut Vec<u8>) {
    if value.iter().all(|&b| is_print(b) && b != b'\'') {
        out.push(b'\'');
        out.extend_from_slice(value);
        out.push(b'\'');
        return;
    }

    out.extend_from_slice(b"$'");
    for &b in value {
        match b {
            b'\'' => out.extend_from_slice(b"\\'"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0c => out.extend_from_slice(b"\\f"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x0b => out.extend_from_slice(b"\\v"),
            b if is_print(b) => out.push(b),
            b => out.extend_from_slice(format!("\\x{:02x}", b).as_bytes()),
        }
    }
    out.push(b'\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvprintf_core::HeaderError;

    fn row(fields: &[&str]) -> Row {
        Row::from_fields(fields.iter().map(|f| f.as_bytes().to_vec()).collect(), 1)
    }

    fn quoted(value: &[u8]) -> String {
        let mut out = Vec::new();
        quote_value(value, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_array_form() {
        let mut s = BashSink::new(Vec::new());
        s.row(&row(&["a b", "it's"])).unwrap();
        s.row(&row(&[""])).unwrap();
        assert_eq!(
            String::from_utf8(s.into_inner()).unwrap(),
            "ROW=( 'a b' $'it\\'s' )\nROW=( '' )\n"
        );
    }

    #[test]
    fn test_named_form() {
        let mut s = BashSink::new(Vec::new());
        s.header(&HeaderNames::from_row(row(&["first name", "id"]))).unwrap();
        s.row(&row(&["Ada", "7", "extra"])).unwrap();
        assert_eq!(
            String::from_utf8(s.into_inner()).unwrap(),
            "first_name='Ada'; id='7'; col3='extra';\n"
        );
    }

    #[test]
    fn test_invalid_names() {
        let mut s = BashSink::new(Vec::new());
        let err = s.header(&HeaderNames::from_row(row(&["a-b", "a b"]))).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(csvprintf_core::Error::Header(HeaderError::DuplicateIdentifier { .. }))
        ));

        let err = s.header(&HeaderNames::from_row(row(&["a", ""]))).unwrap_err();
        assert_eq!(err.to_string(), "illegal empty string column name");
    }

    #[test]
    fn test_quote_value() {
        assert_eq!(quoted(b"plain text"), "'plain text'");
        assert_eq!(quoted(b"back\\slash"), "'back\\slash'");
        assert_eq!(quoted(b"tab\there"), "$'tab\\there'");
        assert_eq!(quoted(b"\x08\x0b\x0c\r\n"), "$'\\b\\v\\f\\r\\n'");
        assert_eq!(quoted(b"caf\xc3\xa9\\"), "$'caf\\xc3\\xa9\\\\'");
        assert_eq!(quoted(b"\x00\x7f"), "$'\\x00\\x7f'");
    }
}
