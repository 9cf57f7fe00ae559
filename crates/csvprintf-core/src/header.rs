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

//! Header-name table built from the first record.

use crate::error::HeaderError;
use crate::row::Row;

/// Result of looking a name up in a [`HeaderNames`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLookup {
    /// Exactly one header field matches; carries its 1-based ordinal.
    Unique(usize),
    /// No header field matches.
    Missing,
    /// More than one header field matches.
    Ambiguous,
}

/// How two header names are compared when checking uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEquivalence {
    /// Byte-for-byte equality (JSON object keys).
    Exact,
    /// Equality after [`bash_identifier`] normalization; empty names are
    /// rejected as well.
    Identifier,
}

/// Column names taken from the header record.
///
/// # Examples
///
/// ```
/// use csvprintf_core::{HeaderNames, NameLookup, Row};
///
/// let header = HeaderNames::from_row(Row::from_fields(
///     vec![b"a".to_vec(), b"b".to_vec(), b"a".to_vec()],
///     1,
/// ));
/// assert_eq!(header.lookup(b"b"), NameLookup::Unique(2));
/// assert_eq!(header.lookup(b"a"), NameLookup::Ambiguous);
/// assert_eq!(header.lookup(b"c"), NameLookup::Missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    row: Row,
}

impl HeaderNames {
    pub fn from_row(row: Row) -> Self {
        Self { row }
    }

    /// Number of header fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.row.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Name of the column at a 1-based ordinal.
    #[inline]
    pub fn name(&self, ordinal: usize) -> Option<&[u8]> {
        self.row.field(ordinal)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.row.iter()
    }

    /// The underlying header record.
    pub fn as_row(&self) -> &Row {
        &self.row
    }

    /// Mutable access for output stages that re-encode the names.
    pub fn as_row_mut(&mut self) -> &mut Row {
        &mut self.row
    }

    /// Find the column whose name equals `name` exactly.
    pub fn lookup(&self, name: &[u8]) -> NameLookup {
        let mut matches = self
            .row
            .iter()
            .enumerate()
            .filter(|(_, field)| *field == name)
            .map(|(index, _)| index + 1);

        match (matches.next(), matches.next()) {
            (None, _) => NameLookup::Missing,
            (Some(ordinal), None) => NameLookup::Unique(ordinal),
            (Some(_), Some(_)) => NameLookup::Ambiguous,
        }
    }

    /// Check that no two names are equivalent under `equivalence`.
    ///
    /// # Errors
    ///
    /// [`HeaderError::DuplicateName`] for exact duplicates,
    /// [`HeaderError::DuplicateIdentifier`] for names that normalize to the
    /// same identifier, and [`HeaderError::EmptyName`] for an empty name under
    /// [`NameEquivalence::Identifier`].
    pub fn ensure_unique(&self, equivalence: NameEquivalence) -> Result<(), HeaderError> {
        let names: Vec<&[u8]> = self.row.iter().collect();
        match equivalence {
            NameEquivalence::Exact => {
                for (i, first) in names.iter().enumerate() {
                    if names[i + 1..].contains(first) {
                        return Err(HeaderError::DuplicateName(lossy(first)));
                    }
                }
            }
            NameEquivalence::Identifier => {
                if names.iter().any(|name| name.is_empty()) {
                    return Err(HeaderError::EmptyName);
                }
                let idents: Vec<String> = names.iter().map(|name| bash_identifier(name)).collect();
                for i in 0..idents.len() {
                    if let Some(j) = (i + 1..idents.len()).find(|&j| idents[j] == idents[i]) {
                        return Err(HeaderError::DuplicateIdentifier {
                            first: lossy(names[i]),
                            second: lossy(names[j]),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Normalize a name into a shell-safe variable identifier.
///
/// ASCII letters and `_` are kept anywhere, ASCII digits everywhere but the
/// first position; every other byte becomes `_`. The result has exactly one
/// character per input byte.
///
/// # Examples
///
/// ```
/// use csvprintf_core::bash_identifier;
///
/// assert_eq!(bash_identifier(b"first name"), "first_name");
/// assert_eq!(bash_identifier(b"2nd"), "_nd");
/// assert_eq!(bash_identifier(b"x9"), "x9");
/// ```
pub fn bash_identifier(name: &[u8]) -> String {
    name.iter()
        .enumerate()
        .map(|(i, &b)| {
            if b.is_ascii_alphabetic() || b == b'_' || (i > 0 && b.is_ascii_digit()) {
                char::from(b)
            } else {
                '_'
            }
        })
        .collect()
}
