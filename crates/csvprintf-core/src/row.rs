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

//! Assembled CSV records.

use std::borrow::Cow;
use std::ops::Index;

/// One CSV record: an ordered list of field byte strings.
///
/// Fields are addressed from zero with [`get`](Row::get) and from one with
/// [`field`](Row::field), matching the ordinals used by format accessors.
///
/// # Examples
///
/// ```
/// use csvprintf_core::Row;
///
/// let row = Row::from_fields(vec![b"a".to_vec(), b"b,c".to_vec()], 1);
/// assert_eq!(row.len(), 2);
/// assert_eq!(row.field(2), Some(&b"b,c"[..]));
/// assert_eq!(row.field(3), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<Vec<u8>>,
    line: usize,
}

impl Row {
    /// Build a row from already-lexed fields.
    pub fn from_fields(fields: Vec<Vec<u8>>, line: usize) -> Self {
        Self { fields, line }
    }

    /// Number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 1-based input line on which the record started.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Field by 0-based index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.fields.get(index).map(Vec::as_slice)
    }

    /// Field by 1-based ordinal. Ordinal 0 is never a field.
    #[inline]
    pub fn field(&self, ordinal: usize) -> Option<&[u8]> {
        ordinal.checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.fields.iter().map(Vec::as_slice)
    }

    /// Fields as text, replacing invalid UTF-8 with U+FFFD.
    pub fn to_strings_lossy(&self) -> Vec<Cow<'_, str>> {
        self.fields
            .iter()
            .map(|f| String::from_utf8_lossy(f))
            .collect()
    }

    /// Replace every field in place, keeping the line number.
    ///
    /// Used by output stages that re-encode field text.
    pub fn map_fields<E, F>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<Vec<u8>, E>,
    {
        for field in &mut self.fields {
            *field = f(field)?;
        }
        Ok(())
    }

    pub fn into_fields(self) -> Vec<Vec<u8>> {
        self.fields
    }
}

impl Index<usize> for Row {
    type Output = [u8];

    fn index(&self, index: usize) -> &[u8] {
        &self.fields[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        Row::from_fields(fields.iter().map(|f| f.as_bytes().to_vec()).collect(), 4)
    }

    #[test]
    fn test_ordinal_access() {
        let r = row(&["x", "y", "z"]);
        assert_eq!(r.field(0), None);
        assert_eq!(r.field(1), Some(&b"x"[..]));
        assert_eq!(r.field(3), Some(&b"z"[..]));
        assert_eq!(r.field(4), None);
        assert_eq!(&r[1], b"y");
        assert_eq!(r.line(), 4);
    }

    #[test]
    fn test_iteration_order() {
        let r = row(&["1", "2"]);
        let collected: Vec<&[u8]> = r.iter().collect();
        assert_eq!(collected, vec![&b"1"[..], &b"2"[..]]);
        assert_eq!(r.iter().len(), 2);
    }

    #[test]
    fn test_lossy_strings() {
        let r = Row::from_fields(vec![b"ok".to_vec(), vec![0xff]], 1);
        let s = r.to_strings_lossy();
        assert_eq!(s[0], "ok");
        assert_eq!(s[1], "\u{fffd}");
    }

    #[test]
    fn test_map_fields() {
        let mut r = row(&["a", "b"]);
        r.map_fields::<(), _>(|f| Ok(f.to_ascii_uppercase())).unwrap();
        assert_eq!(r.into_fields(), vec![b"A".to_vec(), b"B".to_vec()]);

        let mut r = row(&["a", "b"]);
        let err = r.map_fields(|f| if f == b"b" { Err("bad") } else { Ok(f.to_vec()) });
        assert_eq!(err, Err("bad"));
    }
}
