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

//! csvprintf command-line interface.
//!
//! Reads CSV records and, per record, either runs `printf(1)` with the
//! record's fields as arguments or writes the record as XML, JSON text
//! sequences or bash assignments.
//!
//! # Modules
//!
//! - [`cli`] - argument definitions
//! - [`convert`] - the conversion run
//! - [`encoding`] - input character-set decoding
//! - [`output`] - output modes
//! - [`error`] - error type and exit status mapping
//!
//! # Examples
//!
//! ```
//! use csvprintf_cli::cli::Mode;
//! use csvprintf_cli::convert::{ConvertOptions, Converter};
//! use csvprintf_core::{MissingFieldPolicy, ReaderConfig};
//!
//! # fn main() -> Result<(), csvprintf_cli::error::CliError> {
//! let options = ConvertOptions {
//!     mode: Mode::Json,
//!     reader: ReaderConfig::new().with_skip_blank_lines(true),
//!     encoding: "UTF-8".to_string(),
//!     template: None,
//!     printf_program: "printf".into(),
//!     policy: MissingFieldPolicy::Empty,
//! };
//!
//! let mut out = Vec::new();
//! Converter::new(&mut out, &options)?.convert(&b"a,\"b,c\"\n"[..])?;
//! assert_eq!(out, b"\x1e[\"a\",\"b,c\"]\n");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod convert;
pub mod encoding;
pub mod error;
pub mod output;

pub use cli::{Cli, Mode};
pub use convert::run;
pub use error::CliError;
