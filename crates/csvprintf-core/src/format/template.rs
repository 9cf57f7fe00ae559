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

//! Compiled templates and per-row argument rendering.

use super::accessor::Accessor;
use crate::error::RenderError;
use crate::row::Row;
use std::borrow::Cow;

/// What to do when an accessor points past the end of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    /// Render the missing field as an empty string.
    #[default]
    Empty,
    /// Fail with [`RenderError::FieldOutOfRange`].
    Error,
}

/// A template with its accessors stripped out, ready to render rows.
///
/// Built once by [`compile`](crate::compile) and reused for every row.
///
/// # Examples
///
/// ```
/// use csvprintf_core::{compile, Row};
///
/// let compiled = compile("%0$d:%3$s:%5$s", None).unwrap();
/// let row = Row::from_fields(vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec(), b"d".to_vec()], 1);
///
/// let args = compiled.render(&row);
/// assert_eq!(&*args[0], b"4");
/// assert_eq!(&*args[1], b"c");
/// assert_eq!(&*args[2], b"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    format: String,
    accessors: Vec<Accessor>,
}

impl CompiledTemplate {
    pub(crate) fn new(format: String, accessors: Vec<Accessor>) -> Self {
        Self { format, accessors }
    }

    /// The template text with every accessor removed.
    #[inline]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Accessors in the order their values are consumed.
    #[inline]
    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    /// One argument per accessor; out-of-range columns render empty.
    pub fn render<'r>(&self, row: &'r Row) -> Vec<Cow<'r, [u8]>> {
        self.accessors
            .iter()
            .map(|&accessor| render_one(accessor, row).unwrap_or(Cow::Borrowed(&[])))
            .collect()
    }

    /// Like [`render`](Self::render) with an explicit out-of-range policy.
    ///
    /// # Errors
    ///
    /// With [`MissingFieldPolicy::Error`], returns
    /// [`RenderError::FieldOutOfRange`] for the first accessor past the end of
    /// the row.
    pub fn render_with<'r>(
        &self,
        row: &'r Row,
        policy: MissingFieldPolicy,
    ) -> Result<Vec<Cow<'r, [u8]>>, RenderError> {
        match policy {
            MissingFieldPolicy::Empty => Ok(self.render(row)),
            MissingFieldPolicy::Error => self
                .accessors
                .iter()
                .map(|&accessor| {
                    render_one(accessor, row).ok_or(RenderError::FieldOutOfRange {
                        ordinal: accessor.ordinal(),
                        width: row.len(),
                        line: row.line(),
                    })
                })
                .collect(),
        }
    }
}

fn render_one(accessor: Accessor, row: &Row) -> Option<Cow<'_, [u8]>> {
    match accessor {
        Accessor::FieldCount => Some(Cow::Owned(row.len().to_string().into_bytes())),
        Accessor::Column(ordinal) => row.field(ordinal).map(Cow::Borrowed),
    }
}
