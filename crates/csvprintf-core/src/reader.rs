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

//! Record-at-a-time CSV reader.

use crate::config::ReaderConfig;
use crate::error::{ConfigError, LexResult};
use crate::header::HeaderNames;
use crate::lex::{CharSource, FieldLexer, ReadMode};
use crate::row::Row;
use std::io::{BufRead, BufReader, Read};
use tracing::{debug, trace};

/// Reads CSV records from a byte stream.
///
/// When the configuration enables headers, the first record is held back as
/// [`HeaderNames`] and never returned by [`next_row`](RowReader::next_row).
///
/// # Examples
///
/// ```
/// use csvprintf_core::{ReaderConfig, RowReader};
///
/// let input = b"a, \"b,c\", \"d\"\"e\"\n";
/// let mut reader = RowReader::new(&input[..], ReaderConfig::default()).unwrap();
///
/// let row = reader.next_row().unwrap().unwrap();
/// assert_eq!(row.into_fields(), vec![b"a".to_vec(), b"b,c".to_vec(), b"d\"e".to_vec()]);
/// assert!(reader.next_row().unwrap().is_none());
/// ```
///
/// With header names:
///
/// ```
/// use csvprintf_core::{NameLookup, ReaderConfig, RowReader};
///
/// let input = b"id,name\n1,Ann\n";
/// let config = ReaderConfig::new().with_headers(true);
/// let mut reader = RowReader::new(&input[..], config).unwrap();
///
/// let header = reader.header_names().unwrap().unwrap();
/// assert_eq!(header.lookup(b"name"), NameLookup::Unique(2));
///
/// let row = reader.next_row().unwrap().unwrap();
/// assert_eq!(row.field(2), Some(&b"Ann"[..]));
/// ```
pub struct RowReader<R> {
    source: CharSource<R>,
    config: ReaderConfig,
    header: Option<HeaderNames>,
    header_done: bool,
    rows_read: usize,
}

impl<R: Read> RowReader<BufReader<R>> {
    /// Wrap an unbuffered reader.
    pub fn from_reader(reader: R, config: ReaderConfig) -> Result<Self, ConfigError> {
        RowReader::new(BufReader::new(reader), config)
    }
}

impl<R: BufRead> RowReader<R> {
    /// Create a reader over buffered input.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`ReaderConfig::validate`].
    pub fn new(reader: R, config: ReaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            quote = %char::from(config.quote()).escape_default(),
            separator = %char::from(config.separator()).escape_default(),
            has_headers = config.has_headers(),
            skip_blank_lines = config.skip_blank_lines(),
            "row reader configured"
        );
        Ok(Self {
            source: CharSource::new(reader),
            config,
            header: None,
            header_done: !config.has_headers(),
            rows_read: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Current 1-based input line.
    #[inline]
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// Number of data rows returned so far (the header is not counted).
    #[inline]
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Header names, reading the first record if that has not happened yet.
    ///
    /// Returns `Ok(None)` when headers are disabled or the input is empty.
    pub fn header_names(&mut self) -> LexResult<Option<&HeaderNames>> {
        self.capture_header()?;
        Ok(self.header.as_ref())
    }

    /// Read the next data row, or `None` at end of input.
    pub fn next_row(&mut self) -> LexResult<Option<Row>> {
        self.capture_header()?;
        let row = self.read_record()?;
        if let Some(row) = &row {
            self.rows_read += 1;
            trace!(line = row.line(), fields = row.len(), "row");
        }
        Ok(row)
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    fn capture_header(&mut self) -> LexResult<()> {
        if self.header_done {
            return Ok(());
        }
        self.header_done = true;
        if let Some(row) = self.read_record()? {
            debug!(line = row.line(), columns = row.len(), "captured header names");
            self.header = Some(HeaderNames::from_row(row));
        }
        Ok(())
    }

    fn read_record(&mut self) -> LexResult<Option<Row>> {
        loop {
            let line = self.source.line();
            match self.source.next(ReadMode::Collapse)? {
                None => return Ok(None),
                Some(b'\n') if self.config.skip_blank_lines() => continue,
                Some(b'\n') => return Ok(Some(Row::from_fields(vec![Vec::new()], line))),
                Some(byte) => {
                    self.source.unread(byte);
                    let mut fields = Vec::new();
                    let mut lexer = FieldLexer::new(&mut self.source, &self.config);
                    loop {
                        let field = lexer.next_field()?;
                        let more = field.more();
                        fields.push(field.value);
                        if !more {
                            break;
                        }
                    }
                    return Ok(Some(Row::from_fields(fields, line)));
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = LexResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

impl<R> std::fmt::Debug for RowReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowReader")
            .field("config", &self.config)
            .field("source", &self.source)
            .field("rows_read", &self.rows_read)
            .finish_non_exhaustive()
    }
}
