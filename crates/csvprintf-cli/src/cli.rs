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

//! Command-line argument definitions.

use crate::encoding::DEFAULT_ENCODING;
use clap::{ArgAction, ArgGroup, Parser};
use csvprintf_core::{parse_char_literal, MissingFieldPolicy, ReaderConfig};
use std::ffi::OsString;
use std::path::PathBuf;

/// Output mode selected by the mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run printf once per row (no mode flag).
    Printf,
    /// `-b`
    Bash,
    /// `-j`
    Json,
    /// `-x` and `-X`
    Xml { name_tags: bool },
}

/// Reformat CSV records with printf(1), or convert them to XML, JSON or bash
///
/// In printf mode every conversion in FORMAT names its column: `%2$s` for
/// the second field, `%{name}s` for a named column (with -i), `%0$d` for the
/// number of fields. Widths and precisions given as `*` take an accessor
/// too, e.g. `%1$*2$s`.
#[derive(Debug, Parser)]
#[command(name = "csvprintf", author, version)]
#[command(disable_version_flag = true, args_override_self = true)]
#[command(group(ArgGroup::new("mode").args(["bash", "json", "xml", "xml_names"])))]
pub struct Cli {
    /// Convert input to bash(1) variable assignments
    #[arg(short = 'b')]
    pub bash: bool,

    /// Convert input to JSON text sequences
    #[arg(short = 'j')]
    pub json: bool,

    /// Convert input to XML using numeric tags
    #[arg(short = 'x')]
    pub xml: bool,

    /// Convert input to XML using column name tags (implies -i)
    #[arg(short = 'X')]
    pub xml_names: bool,

    /// Input character encoding (XML and JSON modes only)
    #[arg(short = 'e', value_name = "ENCODING", default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Read CSV input from FILE ("-" for standard input)
    #[arg(short = 'f', value_name = "FILE", default_value = "-")]
    pub file: PathBuf,

    /// First CSV record contains column names
    #[arg(short = 'i')]
    pub column_names: bool,

    /// Quote character (a single character, \t style escape, \xHH or \ooo)
    #[arg(short = 'q', value_name = "CHAR", default_value = "\"", value_parser = parse_char_literal)]
    pub quote: u8,

    /// Field separator character (same forms as -q)
    #[arg(short = 's', value_name = "CHAR", default_value = ",", value_parser = parse_char_literal)]
    pub separator: u8,

    /// Print version information and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Program run for each row in printf mode
    #[arg(long, value_name = "PROGRAM", env = "CSVPRINTF_PRINTF", default_value = "printf")]
    pub printf_program: OsString,

    /// Fail on accessors past the end of a row instead of passing ""
    #[arg(long)]
    pub strict_fields: bool,

    /// printf(1) format with column accessors (printf mode only)
    #[arg(
        value_name = "FORMAT",
        required_unless_present = "mode",
        conflicts_with = "mode"
    )]
    pub format: Option<String>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.bash {
            Mode::Bash
        } else if self.json {
            Mode::Json
        } else if self.xml || self.xml_names {
            Mode::Xml {
                name_tags: self.xml_names,
            }
        } else {
            Mode::Printf
        }
    }

    /// Whether the first record holds column names.
    pub fn reads_header(&self) -> bool {
        self.column_names || self.xml_names
    }

    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::new()
            .with_quote(self.quote)
            .with_separator(self.separator)
            .with_headers(self.reads_header())
            .with_skip_blank_lines(true)
    }

    pub fn missing_field_policy(&self) -> MissingFieldPolicy {
        if self.strict_fields {
            MissingFieldPolicy::Error
        } else {
            MissingFieldPolicy::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("csvprintf").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_printf_mode_requires_format() {
        let cli = parse(&["%1$s\\n"]).unwrap();
        assert_eq!(cli.mode(), Mode::Printf);
        assert_eq!(cli.format.as_deref(), Some("%1$s\\n"));
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_conversion_modes_reject_format() {
        assert_eq!(parse(&["-j"]).unwrap().mode(), Mode::Json);
        assert_eq!(parse(&["-b"]).unwrap().mode(), Mode::Bash);
        assert!(parse(&["-j", "%1$s"]).is_err());
    }

    #[test]
    fn test_mode_flags_conflict() {
        assert!(parse(&["-b", "-j"]).is_err());
        assert!(parse(&["-x", "-X"]).is_err());
        assert!(parse(&["-x", "-x"]).is_ok());
    }

    #[test]
    fn test_xml_name_tags_imply_header() {
        let cli = parse(&["-X"]).unwrap();
        assert_eq!(cli.mode(), Mode::Xml { name_tags: true });
        assert!(cli.reads_header());
        assert!(cli.reader_config().has_headers());
    }

    #[test]
    fn test_character_options() {
        let cli = parse(&["-s", "\\t", "-q", "'", "-j"]).unwrap();
        assert_eq!(cli.separator, b'\t');
        assert_eq!(cli.quote, b'\'');
        assert!(parse(&["-s", "ab", "-j"]).is_err());

        let defaults = parse(&["-j"]).unwrap();
        assert_eq!(defaults.quote, b'"');
        assert_eq!(defaults.separator, b',');
        assert_eq!(defaults.encoding, "ISO-8859-1");
        assert_eq!(defaults.file, PathBuf::from("-"));
    }

    #[test]
    fn test_strict_fields() {
        assert_eq!(
            parse(&["--strict-fields", "%1$s"]).unwrap().missing_field_policy(),
            MissingFieldPolicy::Error
        );
        assert_eq!(
            parse(&["%1$s"]).unwrap().missing_field_policy(),
            MissingFieldPolicy::Empty
        );
    }
}
