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

//! Template compilation and rendering against rows read from CSV text.

use csvprintf_core::{
    compile, Accessor, CompileError, MissingFieldPolicy, ReaderConfig, RenderError, RowReader,
    SpecPart, TemplateStage,
};

fn render_strings(template: &str, csv: &str, headers: bool) -> Vec<Vec<String>> {
    let config = ReaderConfig::new().with_headers(headers);
    let mut reader = RowReader::new(csv.as_bytes(), config).unwrap();
    let mut stage = TemplateStage::new(template);
    stage.begin(headers).unwrap();
    if headers {
        let header = reader.header_names().unwrap().unwrap();
        stage.accept_header(header).unwrap();
    }
    let compiled = stage.compiled().unwrap().clone();

    reader
        .map(|row| {
            let row = row.unwrap();
            compiled
                .render(&row)
                .iter()
                .map(|arg| String::from_utf8(arg.to_vec()).unwrap())
                .collect()
        })
        .collect()
}

// =============================================================================
// Accessor resolution
// =============================================================================

#[test]
fn test_positional_accessors() {
    assert_eq!(
        render_strings("%2$s %1$s\\n", "a,b\nc,d\n", false),
        vec![vec!["b", "a"], vec!["d", "c"]]
    );
}

#[test]
fn test_symbolic_accessors() {
    assert_eq!(
        render_strings("%{last}s, %{first}s", "first,last\nAda,Lovelace\n", true),
        vec![vec!["Lovelace", "Ada"]]
    );
}

#[test]
fn test_field_count_and_out_of_range() {
    assert_eq!(
        render_strings("%0$d %5$s|", "a,b,c,d\nx,y,z\n", false),
        vec![vec!["4", ""], vec!["3", ""]]
    );
}

#[test]
fn test_star_width_from_column() {
    let compiled = compile("%1$*2$s|", None).unwrap();
    assert_eq!(compiled.format(), "%*s|");
    assert_eq!(
        compiled.accessors(),
        &[Accessor::Column(1), Accessor::Column(2)]
    );
}

#[test]
fn test_ambiguous_header_names() {
    let mut reader = RowReader::new(
        &b"a,b,a\n1,2,3\n"[..],
        ReaderConfig::new().with_headers(true),
    )
    .unwrap();
    let header = reader.header_names().unwrap().unwrap();

    assert!(matches!(
        compile("%{a}s", Some(header)),
        Err(CompileError::AmbiguousColumn { .. })
    ));
    assert!(matches!(
        compile("%{c}s", Some(header)),
        Err(CompileError::UnknownColumn { .. })
    ));
    assert_eq!(
        compile("%1$s", Some(header)).unwrap().accessors(),
        &[Accessor::Column(1)]
    );
    assert_eq!(
        compile("%{b}s", Some(header)).unwrap().accessors(),
        &[Accessor::Column(2)]
    );
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_error_messages() {
    let cases = [
        (
            "%d",
            "missing required column accessor in format specification starting at \"%d...\"",
        ),
        (
            "%1$.*x",
            "missing required column accessor in precision for format specification starting at \"%1$.*x...\"",
        ),
        (
            "abc %2$-10",
            "truncated format specification starting at \"%2$-10...\"",
        ),
    ];
    for (template, message) in cases {
        assert_eq!(compile(template, None).unwrap_err().to_string(), message);
    }
}

#[test]
fn test_error_names_failing_part() {
    match compile("%1$*{w}d", None) {
        Err(CompileError::HeaderNamesRequired { part, .. }) => assert_eq!(part, SpecPart::Width),
        other => panic!("unexpected result: {:?}", other),
    }
}

// =============================================================================
// Render policy
// =============================================================================

#[test]
fn test_strict_policy_reports_row_line() {
    let mut reader = RowReader::new(&b"a,b,c\n\nx\n"[..], ReaderConfig::default()).unwrap();
    let compiled = compile("%3$s", None).unwrap();

    let first = reader.next_row().unwrap().unwrap();
    assert!(compiled.render_with(&first, MissingFieldPolicy::Error).is_ok());

    let blank = reader.next_row().unwrap().unwrap();
    assert_eq!(
        compiled.render_with(&blank, MissingFieldPolicy::Error),
        Err(RenderError::FieldOutOfRange {
            ordinal: 3,
            width: 1,
            line: 2,
        })
    );
}
