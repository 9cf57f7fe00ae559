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

//! The conversion run: read records and feed them to the selected output.

use crate::cli::{Cli, Mode};
use crate::encoding::FieldDecoder;
use crate::error::CliError;
use crate::output::{BashSink, JsonSink, PrintfSink, RowSink, XmlSink};
use csvprintf_core::{MissingFieldPolicy, ReaderConfig, RowReader};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Everything a conversion run needs, independent of argument parsing.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub mode: Mode,
    pub reader: ReaderConfig,
    pub encoding: String,
    pub template: Option<String>,
    pub printf_program: OsString,
    pub policy: MissingFieldPolicy,
}

impl From<&Cli> for ConvertOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            mode: cli.mode(),
            reader: cli.reader_config(),
            encoding: cli.encoding.clone(),
            template: cli.format.clone(),
            printf_program: cli.printf_program.clone(),
            policy: cli.missing_field_policy(),
        }
    }
}

/// A conversion whose configuration and template have been checked.
///
/// Nothing is written until [`convert`](Converter::convert) is called.
pub struct Converter<'w> {
    sink: Box<dyn RowSink + 'w>,
    config: ReaderConfig,
}

impl<'w> Converter<'w> {
    /// Validate the options and build the output.
    ///
    /// Configuration errors, unknown encodings and (when no header is
    /// involved) template errors surface here, before any input is read or
    /// output written.
    pub fn new<W: Write + 'w>(output: W, options: &ConvertOptions) -> Result<Self, CliError> {
        options.reader.validate()?;
        debug!(mode = ?options.mode, encoding = %options.encoding, "starting conversion");

        let sink: Box<dyn RowSink + 'w> = match options.mode {
            Mode::Printf => Box::new(PrintfSink::new(
                output,
                options.printf_program.clone(),
                options.template.clone().unwrap_or_default(),
                options.reader.has_headers(),
                options.policy,
            )?),
            Mode::Bash => Box::new(BashSink::new(output)),
            Mode::Json => Box::new(JsonSink::new(
                output,
                FieldDecoder::for_label(&options.encoding)?,
            )),
            Mode::Xml { name_tags } => Box::new(XmlSink::new(
                output,
                FieldDecoder::for_label(&options.encoding)?,
                name_tags,
            )),
        };

        Ok(Self {
            sink,
            config: options.reader,
        })
    }

    /// Convert every record of `input`; returns the number of data rows.
    pub fn convert<R: BufRead>(mut self, input: R) -> Result<usize, CliError> {
        let mut reader = RowReader::new(input, self.config)?;
        self.sink.begin()?;

        if let Some(header) = reader.header_names()? {
            self.sink.header(header)?;
        }
        while let Some(row) = reader.next_row()? {
            self.sink.row(&row)?;
        }
        self.sink.finish()?;

        let rows = reader.rows_read();
        info!(rows, lines = reader.line() - 1, "conversion finished");
        Ok(rows)
    }
}

/// Run the command described by `cli` against stdin/stdout.
pub fn run(cli: &Cli) -> Result<usize, CliError> {
    let options = ConvertOptions::from(cli);
    let stdout = io::stdout();
    let converter = Converter::new(BufWriter::new(stdout.lock()), &options)?;

    let input: Box<dyn BufRead> = if cli.file == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&cli.file).map_err(|e| CliError::io_error(&cli.file, e))?;
        Box::new(BufReader::new(file))
    };
    converter.convert(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvprintf_core::{CompileError, ConfigError};

    fn options(mode: Mode) -> ConvertOptions {
        ConvertOptions {
            mode,
            reader: ReaderConfig::new().with_skip_blank_lines(true),
            encoding: "UTF-8".to_string(),
            template: None,
            printf_program: OsString::from("printf"),
            policy: MissingFieldPolicy::Empty,
        }
    }

    fn convert(options: &ConvertOptions, input: &str) -> Result<(usize, String), CliError> {
        let mut out = Vec::new();
        let rows = Converter::new(&mut out, options)?.convert(input.as_bytes())?;
        Ok((rows, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_bash_conversion_skips_blank_lines() {
        let (rows, out) = convert(&options(Mode::Bash), "a,b\n\n\nc\n").unwrap();
        assert_eq!(rows, 2);
        assert_eq!(out, "ROW=( 'a' 'b' )\nROW=( 'c' )\n");
    }

    #[test]
    fn test_json_with_header() {
        let mut opts = options(Mode::Json);
        opts.reader = opts.reader.with_headers(true);
        let (rows, out) = convert(&opts, "k,v\n1,2\n").unwrap();
        assert_eq!(rows, 1);
        assert_eq!(out, "\x1e{\"k\":\"1\",\"v\":\"2\"}\n");
    }

    #[test]
    fn test_xml_header_only_input() {
        let mut opts = options(Mode::Xml { name_tags: true });
        opts.reader = opts.reader.with_headers(true);
        let (rows, out) = convert(&opts, "a,b\n").unwrap();
        assert_eq!(rows, 0);
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<csv>\n</csv>\n");
    }

    #[test]
    fn test_nothing_written_before_convert() {
        let mut out = Vec::new();
        let converter = Converter::new(&mut out, &options(Mode::Xml { name_tags: false })).unwrap();
        drop(converter);
        assert!(out.is_empty());
    }

    #[test]
    fn test_config_checked_first() {
        let mut opts = options(Mode::Printf);
        opts.reader = opts.reader.with_quote(b',');
        opts.template = Some("%s".to_string());
        assert!(matches!(
            Converter::new(Vec::new(), &opts),
            Err(CliError::Core(csvprintf_core::Error::Config(
                ConfigError::SameQuoteAndSeparator(b',')
            )))
        ));
    }

    #[test]
    fn test_template_checked_before_input() {
        let mut opts = options(Mode::Printf);
        opts.template = Some("%1$".to_string());
        assert!(matches!(
            Converter::new(Vec::new(), &opts),
            Err(CliError::Core(csvprintf_core::Error::Compile(
                CompileError::Truncated { .. }
            )))
        ));
    }

    #[test]
    fn test_unknown_encoding_only_matters_for_text_modes() {
        let mut opts = options(Mode::Json);
        opts.encoding = "klingon".to_string();
        assert!(matches!(
            Converter::new(Vec::new(), &opts),
            Err(CliError::UnknownEncoding(_))
        ));

        opts.mode = Mode::Bash;
        assert!(Converter::new(Vec::new(), &opts).is_ok());
    }

    #[test]
    fn test_lex_error_ends_run() {
        let err = convert(&options(Mode::Json), "ok\n\"open\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 3: premature end of input inside quoted field"
        );
    }
}
