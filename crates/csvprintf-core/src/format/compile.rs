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

//! Format template compiler.
//!
//! A template is printf text in which every conversion specification names
//! its operand explicitly:
//!
//! ```text
//! %[accessor][flags][width][.precision]conversion
//!
//! accessor   := N$ | {name}
//! width      := digits | *accessor
//! precision  := digits | *accessor
//! flags      := any of "#-+ 0"
//! ```
//!
//! Compiling strips every accessor out of the template, leaving text a
//! standard `printf` accepts, and records the referenced columns in the order
//! they appear. `%%` is passed through untouched.

use super::accessor::Accessor;
use super::template::CompiledTemplate;
use crate::error::{CompileError, SpecPart, EXCERPT_LEN};
use crate::header::{HeaderNames, NameLookup};
use tracing::debug;

const FLAGS: &[u8] = b"#-+ 0";

/// Compile a template, resolving `{name}` accessors against `header`.
///
/// Without header names only positional accessors are accepted.
///
/// # Errors
///
/// Returns a [`CompileError`] describing the first malformed or unresolvable
/// conversion specification.
///
/// # Examples
///
/// ```
/// use csvprintf_core::{compile, Accessor};
///
/// let compiled = compile("%2$s=%1$-*3$d%%\\n", None).unwrap();
/// assert_eq!(compiled.format(), "%s=%-*d%%\\n");
/// assert_eq!(
///     compiled.accessors(),
///     &[Accessor::Column(2), Accessor::Column(1), Accessor::Column(3)]
/// );
/// ```
pub fn compile(template: &str, header: Option<&HeaderNames>) -> Result<CompiledTemplate, CompileError> {
    let mut compiler = Compiler {
        template,
        pos: 0,
        header,
        out: String::with_capacity(template.len()),
        accessors: Vec::new(),
    };
    compiler.run()?;

    debug!(
        format = %compiler.out,
        accessors = compiler.accessors.len(),
        symbolic = header.is_some(),
        "compiled format template"
    );
    Ok(CompiledTemplate::new(compiler.out, compiler.accessors))
}

struct Compiler<'a> {
    template: &'a str,
    pos: usize,
    header: Option<&'a HeaderNames>,
    out: String,
    accessors: Vec<Accessor>,
}

impl<'a> Compiler<'a> {
    fn run(&mut self) -> Result<(), CompileError> {
        while self.pos < self.template.len() {
            let rest = &self.template[self.pos..];
            let Some(offset) = rest.find('%') else {
                self.out.push_str(rest);
                break;
            };
            self.out.push_str(&rest[..offset]);
            let start = self.pos + offset;
            self.pos = start + 1;
            self.out.push('%');

            if self.peek() == Some(b'%') {
                self.pos += 1;
                self.out.push('%');
                continue;
            }
            self.specification(start)?;
        }
        Ok(())
    }

    /// Everything after the `%` of a conversion specification.
    fn specification(&mut self, start: usize) -> Result<(), CompileError> {
        self.accessor(SpecPart::Conversion, start)?;

        while let Some(flag) = self.peek().filter(|b| FLAGS.contains(b)) {
            self.out.push(char::from(flag));
            self.pos += 1;
        }

        self.width_or_precision(SpecPart::Width, start)?;
        if self.peek() == Some(b'.') {
            self.out.push('.');
            self.pos += 1;
            self.width_or_precision(SpecPart::Precision, start)?;
        }

        // Conversion character, copied as-is.
        let Some(conversion) = self.template[self.pos..].chars().next() else {
            return Err(CompileError::Truncated {
                excerpt: self.excerpt(start),
            });
        };
        self.out.push(conversion);
        self.pos += conversion.len_utf8();
        Ok(())
    }

    fn width_or_precision(&mut self, part: SpecPart, start: usize) -> Result<(), CompileError> {
        if self.peek() == Some(b'*') {
            self.out.push('*');
            self.pos += 1;
            return self.accessor(part, start);
        }
        let digits = self.digits();
        self.out.push_str(digits);
        Ok(())
    }

    /// Consume a required `N$` or `{name}` accessor without copying it.
    fn accessor(&mut self, part: SpecPart, start: usize) -> Result<(), CompileError> {
        let accessor = if self.peek() == Some(b'{') {
            self.symbolic(part, start)?
        } else {
            self.positional(part, start)?
        };
        self.accessors.push(accessor);
        Ok(())
    }

    fn symbolic(&mut self, part: SpecPart, start: usize) -> Result<Accessor, CompileError> {
        let Some(header) = self.header else {
            return Err(CompileError::HeaderNamesRequired {
                part,
                excerpt: self.excerpt(start),
            });
        };

        let name_start = self.pos + 1;
        let Some(len) = self.template[name_start..].find('}') else {
            return Err(CompileError::MalformedAccessor {
                part,
                excerpt: self.excerpt(start),
            });
        };
        let name = &self.template[name_start..name_start + len];
        self.pos = name_start + len + 1;

        match header.lookup(name.as_bytes()) {
            NameLookup::Unique(ordinal) => Ok(Accessor::Column(ordinal)),
            NameLookup::Missing => Err(CompileError::UnknownColumn {
                name: name.to_string(),
                part,
                excerpt: self.excerpt(start),
            }),
            NameLookup::Ambiguous => Err(CompileError::AmbiguousColumn {
                name: name.to_string(),
                part,
                excerpt: self.excerpt(start),
            }),
        }
    }

    fn positional(&mut self, part: SpecPart, start: usize) -> Result<Accessor, CompileError> {
        let digits = self.digits();
        if digits.is_empty() || self.peek() != Some(b'$') {
            return Err(CompileError::MissingAccessor {
                part,
                excerpt: self.excerpt(start),
            });
        }
        self.pos += 1;

        let ordinal: u32 = digits.parse().map_err(|_| CompileError::MalformedAccessor {
            part,
            excerpt: self.excerpt(start),
        })?;
        Ok(Accessor::from_ordinal(ordinal as usize))
    }

    /// Consume a run of ASCII digits and return it.
    fn digits(&mut self) -> &'a str {
        let template = self.template;
        let rest = &template[self.pos..];
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        self.pos += len;
        &rest[..len]
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.template.as_bytes().get(self.pos).copied()
    }

    fn excerpt(&self, start: usize) -> String {
        self.template[start..].chars().take(EXCERPT_LEN).collect()
    }
}
