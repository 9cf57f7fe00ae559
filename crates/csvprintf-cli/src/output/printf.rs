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

//! printf output (the default mode).
//!
//! For every data row the printf program is run as
//! `printf FORMAT ARG...`, where `FORMAT` is the compiled template and each
//! `ARG` the raw bytes of the column an accessor refers to. The child shares
//! our standard output, so buffered output is flushed before each spawn.

use super::RowSink;
use crate::error::CliError;
use csvprintf_core::{HeaderNames, MissingFieldPolicy, Row, TemplateStage};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Runs the printf program once per record.
pub struct PrintfSink<W: Write> {
    out: W,
    program: OsString,
    stage: TemplateStage,
    policy: MissingFieldPolicy,
}

impl<W: Write> PrintfSink<W> {
    /// Compile the template, or with `expects_header` defer compilation
    /// until the header names are known.
    ///
    /// # Errors
    ///
    /// Returns the template's compile error when it can be compiled now.
    pub fn new(
        out: W,
        program: impl Into<OsString>,
        template: impl Into<String>,
        expects_header: bool,
        policy: MissingFieldPolicy,
    ) -> Result<Self, CliError> {
        let mut stage = TemplateStage::new(template);
        stage.begin(expects_header)?;
        Ok(Self {
            out,
            program: program.into(),
            stage,
            policy,
        })
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl<W: Write> RowSink for PrintfSink<W> {
    fn header(&mut self, header: &HeaderNames) -> Result<(), CliError> {
        self.stage.accept_header(header)?;
        Ok(())
    }

    fn row(&mut self, row: &Row) -> Result<(), CliError> {
        let compiled = self.stage.compiled()?;
        let args = compiled.render_with(row, self.policy)?;

        let mut command = Command::new(&self.program);
        command.arg(compiled.format()).stdin(Stdio::null());
        for arg in &args {
            command.arg(os_arg(arg));
        }
        trace!(line = row.line(), args = args.len(), "running printf");

        self.out.flush()?;
        let status = command.status().map_err(|source| CliError::Spawn {
            program: self.program_name(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }
        debug!(line = row.line(), %status, "printf failed");
        match status.code() {
            Some(code) => Err(CliError::PrintfFailed {
                program: self.program_name(),
                code: u8::try_from(code).unwrap_or(1),
            }),
            None => Err(CliError::PrintfKilled {
                program: self.program_name(),
            }),
        }
    }

    fn finish(&mut self) -> Result<(), CliError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(unix)]
fn os_arg(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn os_arg(bytes: &[u8]) -> OsString {
    OsStr::new(String::from_utf8_lossy(bytes).as_ref()).to_os_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use csvprintf_core::{CompileError, RenderError};

    fn row(fields: &[&str]) -> Row {
        Row::from_fields(fields.iter().map(|f| f.as_bytes().to_vec()).collect(), 3)
    }

    #[test]
    fn test_compile_error_at_construction() {
        let err = PrintfSink::new(Vec::new(), "printf", "%s", false, MissingFieldPolicy::Empty)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            CliError::Core(csvprintf_core::Error::Compile(CompileError::MissingAccessor { .. }))
        ));
    }

    #[test]
    fn test_deferred_compile_needs_header() {
        let mut sink =
            PrintfSink::new(Vec::new(), "printf", "%{a}s", true, MissingFieldPolicy::Empty).unwrap();
        assert!(matches!(
            sink.row(&row(&["x"])),
            Err(CliError::Core(csvprintf_core::Error::Compile(CompileError::OutOfOrder(_))))
        ));
        sink.header(&HeaderNames::from_row(row(&["a"]))).unwrap();
    }

    #[test]
    fn test_strict_policy_stops_before_spawning() {
        let mut sink = PrintfSink::new(
            Vec::new(),
            "/nonexistent/printf",
            "%2$s",
            false,
            MissingFieldPolicy::Error,
        )
        .unwrap();
        assert!(matches!(
            sink.row(&row(&["only"])),
            Err(CliError::Core(csvprintf_core::Error::Render(
                RenderError::FieldOutOfRange { ordinal: 2, width: 1, line: 3 }
            )))
        ));
    }

    #[test]
    fn test_missing_program() {
        let mut sink = PrintfSink::new(
            Vec::new(),
            "/nonexistent/printf",
            "%1$s",
            false,
            MissingFieldPolicy::Empty,
        )
        .unwrap();
        assert!(matches!(sink.row(&row(&["x"])), Err(CliError::Spawn { .. })));
    }

    #[test]
    fn test_child_exit_status() {
        let mut sink =
            PrintfSink::new(Vec::new(), "false", "%1$s", false, MissingFieldPolicy::Empty).unwrap();
        assert!(matches!(
            sink.row(&row(&["x"])),
            Err(CliError::PrintfFailed { code: 1, .. })
        ));

        let mut sink =
            PrintfSink::new(Vec::new(), "true", "%1$s", false, MissingFieldPolicy::Empty).unwrap();
        assert!(sink.row(&row(&["x"])).is_ok());
    }

    #[test]
    fn test_os_arg_keeps_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;
        assert_eq!(os_arg(b"caf\xe9").as_bytes(), b"caf\xe9");
    }
}
