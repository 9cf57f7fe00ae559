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

//! Structured error types for the csvprintf CLI.
//!
//! Every failure ends the run. [`CliError::exit_code`] maps an error to the
//! process exit status, so a failing `printf` child passes its own status
//! through.

use csvprintf_core::{CompileError, ConfigError, HeaderError, LexError, RenderError};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// The main error type for csvprintf CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Tokenizing, compiling or rendering failed.
    #[error(transparent)]
    Core(#[from] csvprintf_core::Error),

    /// The `-e` label names no known character encoding.
    #[error("{0}: unknown character encoding")]
    UnknownEncoding(String),

    /// Writing converted output failed.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),

    /// The XML writer rejected an event.
    #[error("XML output error: {0}")]
    Xml(String),

    /// The printf program could not be started.
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The printf program exited with a non-zero status.
    #[error("{program} exited with status {code}")]
    PrintfFailed { program: String, code: u8 },

    /// The printf program was killed by a signal.
    #[error("{program} terminated abnormally")]
    PrintfKilled { program: String },
}

impl CliError {
    /// Create an input error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an XML writer error.
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }

    /// Numeric process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::PrintfFailed { code, .. } => *code,
            _ => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Whether a diagnostic has already been shown by someone else.
    ///
    /// A failing `printf` reports its own problem on stderr.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::PrintfFailed { .. })
    }
}

macro_rules! from_core_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CliError {
                fn from(err: $ty) -> Self {
                    CliError::Core(err.into())
                }
            }
        )*
    };
}

from_core_error!(LexError, CompileError, ConfigError, HeaderError, RenderError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_path() {
        let err = CliError::io_error(
            "missing.csv",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(err.to_string(), "missing.csv: No such file or directory");
    }

    #[test]
    fn test_core_errors_are_transparent() {
        let err: CliError = HeaderError::EmptyName.into();
        assert_eq!(err.to_string(), "illegal empty string column name");

        let err: CliError = LexError::PrematureEof { line: 3 }.into();
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn test_exit_codes() {
        let failed = CliError::PrintfFailed {
            program: "printf".to_string(),
            code: 3,
        };
        assert_eq!(failed.exit_status(), 3);
        assert!(failed.is_reported());

        let other = CliError::UnknownEncoding("EBCDIC-XYZ".to_string());
        assert_eq!(other.exit_status(), 1);
        assert!(!other.is_reported());
    }
}
