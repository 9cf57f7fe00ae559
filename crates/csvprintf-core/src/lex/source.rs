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

//! Byte source with line-ending normalization and push-back.
//!
//! All three line-ending conventions (LF, CR LF, lone CR) reach the lexer as a
//! single LF when reading in [`ReadMode::Collapse`]. Quoted field interiors are
//! read in [`ReadMode::Raw`] so their bytes are preserved exactly.

use crate::error::{LexError, LexResult};
use std::io::{BufRead, ErrorKind};

/// How [`CharSource::next`] treats carriage returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Fold CR and CR LF into a single LF.
    Collapse,
    /// Return bytes exactly as they appear in the input.
    Raw,
}

/// Forward-only byte reader with a small push-back stack.
///
/// The source tracks the 1-based line number by counting the line feeds it
/// hands out; pushing a line feed back un-counts it.
///
/// # Examples
///
/// ```
/// use csvprintf_core::lex::{CharSource, ReadMode};
///
/// let mut source = CharSource::new(&b"a\r\nb\rc"[..]);
/// assert_eq!(source.next(ReadMode::Collapse).unwrap(), Some(b'a'));
/// assert_eq!(source.next(ReadMode::Collapse).unwrap(), Some(b'\n'));
/// assert_eq!(source.next(ReadMode::Collapse).unwrap(), Some(b'b'));
/// assert_eq!(source.next(ReadMode::Collapse).unwrap(), Some(b'\n'));
/// assert_eq!(source.next(ReadMode::Collapse).unwrap(), Some(b'c'));
/// assert_eq!(source.next(ReadMode::Collapse).unwrap(), None);
/// assert_eq!(source.line(), 3);
/// ```
pub struct CharSource<R> {
    reader: R,
    // Stack: the last pushed byte is read first.
    pending: Vec<u8>,
    line: usize,
}

impl<R: BufRead> CharSource<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::with_capacity(2),
            line: 1,
        }
    }

    /// Current 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next byte, or `None` at end of input.
    pub fn next(&mut self, mode: ReadMode) -> LexResult<Option<u8>> {
        let mut byte = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        if mode == ReadMode::Collapse && byte == b'\r' {
            match self.read_byte()? {
                Some(b'\n') | None => {}
                Some(other) => self.pending.push(other),
            }
            byte = b'\n';
        }

        if byte == b'\n' {
            self.line += 1;
        }
        Ok(Some(byte))
    }

    /// Push a byte back so the next read returns it again.
    pub fn unread(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line = self.line.saturating_sub(1).max(1);
        }
        self.pending.push(byte);
    }

    /// Give back the wrapped reader, dropping any pushed-back bytes.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_byte(&mut self) -> LexResult<Option<u8>> {
        if let Some(byte) = self.pending.pop() {
            return Ok(Some(byte));
        }
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(LexError::Io {
                        line: self.line,
                        source,
                    })
                }
            };
            let Some(&byte) = buf.first() else {
                return Ok(None);
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }
}

impl<R> std::fmt::Debug for CharSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharSource")
            .field("pending", &self.pending)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}
