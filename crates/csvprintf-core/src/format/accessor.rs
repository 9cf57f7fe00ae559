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

//! Resolved column references.

use std::fmt;

/// A resolved reference from a conversion specification to a row value.
///
/// # Examples
///
/// ```
/// use csvprintf_core::Accessor;
///
/// assert_eq!(Accessor::from_ordinal(0), Accessor::FieldCount);
/// assert_eq!(Accessor::from_ordinal(3), Accessor::Column(3));
/// assert_eq!(Accessor::Column(3).ordinal(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// `0$`: the number of fields in the row.
    FieldCount,
    /// A 1-based field ordinal. Never zero.
    Column(usize),
}

impl Accessor {
    pub fn from_ordinal(ordinal: usize) -> Self {
        match ordinal {
            0 => Accessor::FieldCount,
            n => Accessor::Column(n),
        }
    }

    /// The ordinal as written in a template; `0` for the field count.
    #[inline]
    pub fn ordinal(self) -> usize {
        match self {
            Accessor::FieldCount => 0,
            Accessor::Column(n) => n,
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}$", self.ordinal())
    }
}
