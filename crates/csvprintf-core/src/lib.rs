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

//! CSV tokenizing and printf template compilation for csvprintf.
//!
//! This crate holds the two engines behind the `csvprintf` tool:
//!
//! - a CSV reader ([`RowReader`]) that handles quoting, doubled quote
//!   characters, record separators inside quoted fields, configurable quote
//!   and separator bytes, trimming of unquoted fields and CR/CRLF/LF
//!   line-ending normalization;
//! - a template compiler ([`compile`]) that strips `N$`, `{name}` and `0$`
//!   accessors out of a printf template and records which column feeds each
//!   conversion.
//!
//! Fields are bytes; no character-set conversion happens here.
//!
//! # Examples
//!
//! ```
//! use csvprintf_core::{ReaderConfig, RowReader, TemplateStage};
//!
//! let input = b"name,qty\nwidget, 4\n\"gadget, large\",12\n";
//! let mut reader = RowReader::new(&input[..], ReaderConfig::new().with_headers(true)).unwrap();
//!
//! let mut stage = TemplateStage::new("%{name}s x%{qty}s (%0$d cols)");
//! stage.begin(true).unwrap();
//! stage.accept_header(reader.header_names().unwrap().unwrap()).unwrap();
//! let compiled = stage.compiled().unwrap();
//! assert_eq!(compiled.format(), "%s x%s (%d cols)");
//!
//! let row = reader.next_row().unwrap().unwrap();
//! let args = compiled.render(&row);
//! assert_eq!(&*args[0], b"widget");
//! assert_eq!(&*args[1], b"4");
//! assert_eq!(&*args[2], b"2");
//!
//! let row = reader.next_row().unwrap().unwrap();
//! assert_eq!(&*compiled.render(&row)[0], b"gadget, large");
//! ```

mod config;
pub mod error;
pub mod format;
mod header;
pub mod lex;
mod reader;
mod row;
mod stage;

pub use config::{parse_char_literal, ReaderConfig};
pub use error::{
    CompileError, ConfigError, Error, HeaderError, LexError, LexResult, RenderError, Result,
    SpecPart,
};
pub use format::{compile, Accessor, CompiledTemplate, MissingFieldPolicy};
pub use header::{bash_identifier, HeaderNames, NameEquivalence, NameLookup};
pub use reader::RowReader;
pub use row::Row;
pub use stage::TemplateStage;
