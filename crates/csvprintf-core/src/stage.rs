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

//! Deferred template compilation.
//!
//! Symbolic accessors can only be resolved once the header record has been
//! read. [`TemplateStage`] tracks where a template is on that path:
//!
//! ```text
//! Uncompiled ──begin(false)──────────────────────────────▶ Compiled
//!     │                                                       ▲
//!     └──begin(true)──▶ AwaitingHeader ──accept_header()──────┘
//! ```

use crate::error::CompileError;
use crate::format::{compile, CompiledTemplate};
use crate::header::HeaderNames;
use std::mem;

/// Compilation state of a format template.
///
/// # Examples
///
/// ```
/// use csvprintf_core::{HeaderNames, Row, TemplateStage};
///
/// let mut stage = TemplateStage::new("%{name}s\\n");
/// stage.begin(true).unwrap();
/// assert!(stage.compiled().is_err());
///
/// let header = HeaderNames::from_row(Row::from_fields(vec![b"name".to_vec()], 1));
/// stage.accept_header(&header).unwrap();
/// assert_eq!(stage.compiled().unwrap().format(), "%s\\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStage {
    Uncompiled(String),
    AwaitingHeader(String),
    Compiled(CompiledTemplate),
}

impl TemplateStage {
    pub fn new(template: impl Into<String>) -> Self {
        TemplateStage::Uncompiled(template.into())
    }

    /// Compile now, or defer until header names arrive.
    ///
    /// With `expects_header == false` the template is compiled immediately
    /// and any error is reported before input is read.
    pub fn begin(&mut self, expects_header: bool) -> Result<(), CompileError> {
        let TemplateStage::Uncompiled(template) = self else {
            return Err(CompileError::OutOfOrder("has already been started"));
        };
        *self = if expects_header {
            TemplateStage::AwaitingHeader(mem::take(template))
        } else {
            TemplateStage::Compiled(compile(template, None)?)
        };
        Ok(())
    }

    /// Compile a deferred template against the header names.
    pub fn accept_header(&mut self, header: &HeaderNames) -> Result<(), CompileError> {
        let TemplateStage::AwaitingHeader(template) = self else {
            return Err(CompileError::OutOfOrder("is not waiting for header names"));
        };
        *self = TemplateStage::Compiled(compile(template, Some(header))?);
        Ok(())
    }

    /// The compiled template, once available.
    pub fn compiled(&self) -> Result<&CompiledTemplate, CompileError> {
        match self {
            TemplateStage::Compiled(compiled) => Ok(compiled),
            _ => Err(CompileError::OutOfOrder("has not been compiled")),
        }
    }

    #[inline]
    pub fn is_compiled(&self) -> bool {
        matches!(self, TemplateStage::Compiled(_))
    }
}
