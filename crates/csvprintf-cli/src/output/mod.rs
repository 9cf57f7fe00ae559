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

//! Output modes.
//!
//! Each mode is a [`RowSink`]: it is told when the run starts, receives the
//! header names (if any) and then every data row, and is finally told the
//! input is exhausted.
//!
//! - [`printf`] - runs the printf program once per row
//! - [`xml`] - XML document with one element per row
//! - [`json`] - JSON text sequences
//! - [`bash`] - shell variable assignments

pub mod bash;
pub mod json;
pub mod printf;
pub mod xml;

use crate::error::CliError;
use csvprintf_core::{HeaderNames, Row};

pub use bash::BashSink;
pub use json::JsonSink;
pub use printf::PrintfSink;
pub use xml::XmlSink;

/// Receives the records of one conversion run.
pub trait RowSink {
    /// Called once before any input is read.
    fn begin(&mut self) -> Result<(), CliError> {
        Ok(())
    }

    /// Called once with the header names, before the first data row.
    fn header(&mut self, _header: &HeaderNames) -> Result<(), CliError> {
        Ok(())
    }

    /// Called for every data row in input order.
    fn row(&mut self, row: &Row) -> Result<(), CliError>;

    /// Called after the last row.
    fn finish(&mut self) -> Result<(), CliError> {
        Ok(())
    }
}

/// Fallback name for a column with no header name.
pub(crate) fn numbered_column(index: usize) -> String {
    format!("col{}", index + 1)
}
