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

//! Lexical analysis of CSV input.
//!
//! # Module Structure
//!
//! - [`source`] - byte source with line-ending normalization and push-back
//! - [`field`] - quoted/unquoted field state machine
//!
//! Most callers want [`RowReader`](crate::RowReader), which drives these
//! pieces one record at a time. They are public for tools that need
//! field-level control.
//!
//! # Examples
//!
//! ```
//! use csvprintf_core::lex::{CharSource, FieldLexer};
//! use csvprintf_core::ReaderConfig;
//!
//! let config = ReaderConfig::default();
//! let mut source = CharSource::new(&b"\"d\"\"e\",f\r\n"[..]);
//! let mut lexer = FieldLexer::new(&mut source, &config);
//!
//! let field = lexer.next_field().unwrap();
//! assert_eq!(field.value, b"d\"e");
//! assert!(field.more());
//! assert_eq!(lexer.next_field().unwrap().value, b"f");
//! ```

pub mod field;
pub mod source;

pub use field::{is_space, FieldEnd, FieldLexer, LexedField};
pub use source::{CharSource, ReadMode};
