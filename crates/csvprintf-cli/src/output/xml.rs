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

//! XML output (`-x` and `-X`).
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <csv>
//!   <row>
//!     <col1>value</col1>
//!   </row>
//! </csv>
//! ```

use super::{numbered_column, RowSink};
use crate::encoding::FieldDecoder;
use crate::error::CliError;
use csvprintf_core::{HeaderNames, Row};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;

const ROOT_ELEMENT: &str = "csv";
const ROW_ELEMENT: &str = "row";

/// Writes every record as a `<row>` element.
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
    decoder: FieldDecoder,
    name_tags: bool,
    tags: Vec<String>,
}

impl<W: Write> XmlSink<W> {
    /// With `name_tags`, columns are tagged by their sanitized header names;
    /// otherwise, and for columns past the header, `colN` is used.
    pub fn new(out: W, decoder: FieldDecoder, name_tags: bool) -> Self {
        Self {
            writer: Writer::new(out),
            decoder,
            name_tags,
            tags: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<(), CliError> {
        self.writer.get_mut().write_all(bytes)?;
        Ok(())
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), CliError> {
        self.writer.write_event(event).map_err(CliError::xml)
    }

    fn element(&mut self, tag: &str, text: &str) -> Result<(), CliError> {
        self.raw(b"    ")?;
        self.event(Event::Start(BytesStart::new(tag)))?;
        self.event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        self.event(Event::End(BytesEnd::new(tag)))?;
        self.raw(b"\n")
    }
}

impl<W: Write> RowSink for XmlSink<W> {
    fn begin(&mut self) -> Result<(), CliError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.raw(b"\n")?;
        self.event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
        self.raw(b"\n")
    }

    fn header(&mut self, header: &HeaderNames) -> Result<(), CliError> {
        if !self.name_tags {
            return Ok(());
        }
        let line = header.as_row().line();
        self.tags = header
            .iter()
            .map(|name| self.decoder.decode(name, line).map(|name| tag_name(&name)))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn row(&mut self, row: &Row) -> Result<(), CliError> {
        self.raw(b"  ")?;
        self.event(Event::Start(BytesStart::new(ROW_ELEMENT)))?;
        self.raw(b"\n")?;

        for (index, field) in row.iter().enumerate() {
            let text = self.decoder.decode(field, row.line())?;
            let tag = match self.tags.get(index) {
                Some(tag) if !tag.is_empty() => tag.clone(),
                _ => numbered_column(index),
            };
            self.element(&tag, &text)?;
        }

        self.raw(b"  ")?;
        self.event(Event::End(BytesEnd::new(ROW_ELEMENT)))?;
        self.raw(b"\n")
    }

    fn finish(&mut self) -> Result<(), CliError> {
        self.event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        self.raw(b"\n")?;
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

/// Characters allowed in XML 1.0 text, minus CR and the C1 controls other
/// than NEL.
fn is_plain_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n'
        | '\u{20}'..='\u{d7ff}'
        | '\u{e000}'..='\u{fffd}'
        | '\u{10000}'..='\u{10ffff}')
        && !matches!(c, '\u{7f}'..='\u{84}' | '\u{86}'..='\u{9f}')
}

/// Escape `<`, `>` and `&`, and write everything outside the plain character
/// range as a numeric character reference.
fn escape_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_plain_xml_char) {
        return partial_escape(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut run_start = 0;
    for (i, c) in text.char_indices() {
        if !is_plain_xml_char(c) {
            out.push_str(&partial_escape(&text[run_start..i]));
            out.push_str(&format!("&#{};", u32::from(c)));
            run_start = i + c.len_utf8();
        }
    }
    out.push_str(&partial_escape(&text[run_start..]));
    Cow::Owned(out)
}

/// Sanitize a header name into an XML element name.
///
/// The first character must be an ASCII letter or `_`; later characters may
/// also be ASCII digits, `-` or `.`. Anything else becomes `_`.
fn tag_name(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            let ok = c.is_ascii_alphabetic()
                || c == '_'
                || (i > 0 && (c.is_ascii_digit() || c == '-' || c == '.'));
            if ok {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin1() -> FieldDecoder {
        FieldDecoder::for_label("ISO-8859-1").unwrap()
    }

    fn row(fields: &[&str]) -> Row {
        Row::from_fields(fields.iter().map(|f| f.as_bytes().to_vec()).collect(), 2)
    }

    fn run(name_tags: bool, header: Option<&[&str]>, rows: &[Row]) -> String {
        let mut sink = XmlSink::new(Vec::new(), latin1(), name_tags);
        sink.begin().unwrap();
        if let Some(names) = header {
            sink.header(&HeaderNames::from_row(row(names))).unwrap();
        }
        for r in rows {
            sink.row(r).unwrap();
        }
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_numeric_tags() {
        let out = run(false, None, &[row(&["a", "b & c"])]);
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <csv>\n\
             \x20 <row>\n\
             \x20   <col1>a</col1>\n\
             \x20   <col2>b &amp; c</col2>\n\
             \x20 </row>\n\
             </csv>\n"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            run(false, None, &[]),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<csv>\n</csv>\n"
        );
    }

    #[test]
    fn test_name_tags_with_fallback() {
        let out = run(
            true,
            Some(&["first name", "2nd", ""]),
            &[row(&["Ada", "x", "y", "extra"]), row(&[""])],
        );
        assert!(out.contains("    <first_name>Ada</first_name>\n"));
        assert!(out.contains("    <_nd>x</_nd>\n"));
        assert!(out.contains("    <col3>y</col3>\n"));
        assert!(out.contains("    <col4>extra</col4>\n"));
        assert!(out.contains("    <first_name></first_name>\n"));
    }

    #[test]
    fn test_header_ignored_for_numeric_tags() {
        let out = run(false, Some(&["name"]), &[row(&["v"])]);
        assert!(out.contains("<col1>v</col1>"));
        assert!(!out.contains("<name>"));
    }

    #[test]
    fn test_fields_are_decoded() {
        let latin = Row::from_fields(vec![b"caf\xe9".to_vec()], 1);
        let out = run(false, None, &[latin]);
        assert!(out.contains("<col1>caf\u{e9}</col1>"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a<b>\"c\"'"), "a&lt;b&gt;\"c\"'");
        assert_eq!(escape_text("x\ry\u{1}"), "x&#13;y&#1;");
        assert_eq!(escape_text("\u{85}\u{86}"), "\u{85}&#134;");
        assert_eq!(escape_text("tab\tnl\n"), "tab\tnl\n");
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("a-b.c9"), "a-b.c9");
        assert_eq!(tag_name("-x"), "_x");
        assert_eq!(tag_name("\u{e9} t"), "__t");
        assert_eq!(tag_name("_1"), "_1");
    }
}
