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

//! JSON text sequence output (`-j`, RFC 7464).
//!
//! Every record is written as an ASCII record separator (`0x1E`), a JSON
//! array of strings (or an object keyed by header name), and a line feed.

use super::{numbered_column, RowSink};
use crate::encoding::FieldDecoder;
use crate::error::CliError;
use csvprintf_core::{HeaderNames, NameEquivalence, Row};
use std::io::Write;

const RECORD_SEPARATOR: u8 = 0x1e;

/// Writes one JSON text per record.
pub struct JsonSink<W: Write> {
    out: W,
    decoder: FieldDecoder,
    keys: Option<Vec<String>>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, decoder: FieldDecoder) -> Self {
        Self {
            out,
            decoder,
            keys: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn string(&mut self, value: &str) -> Result<(), CliError> {
        serde_json::to_writer(&mut self.out, value).map_err(|e| CliError::Output(e.into()))
    }
}

impl<W: Write> RowSink for JsonSink<W> {
    fn header(&mut self, header: &HeaderNames) -> Result<(), CliError> {
        header.ensure_unique(NameEquivalence::Exact)?;
        let line = header.as_row().line();
        let keys = header
            .iter()
            .map(|name| self.decoder.decode(name, line))
            .collect::<Result<Vec<_>, _>>()?;
        self.keys = Some(keys);
        Ok(())
    }

    fn row(&mut self, row: &Row) -> Result<(), CliError> {
        let values = row
            .iter()
            .map(|field| self.decoder.decode(field, row.line()))
            .collect::<Result<Vec<_>, _>>()?;
        let keyed = self.keys.is_some();

        self.out.write_all(&[RECORD_SEPARATOR, if keyed { b'{' } else { b'[' }])?;
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.out.write_all(b",")?;
            }
            if keyed {
                let key = match self.keys.as_ref().and_then(|keys| keys.get(index)) {
                    Some(key) => key.clone(),
                    None => numbered_column(index),
                };
                self.string(&key)?;
                self.out.write_all(b":")?;
            }
            self.string(value)?;
        }
        self.out.write_all(if keyed { b"}\n" } else { b"]\n" })?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CliError> {
        self.out.flush()?;
        Ok(())
    }
}
