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

//! Printf template compilation.
//!
//! - [`accessor`] - resolved column references
//! - [`compile`](mod@compile) - template scanner and accessor resolution
//! - [`template`] - compiled templates and row rendering

pub mod accessor;
pub mod compile;
pub mod template;

pub use accessor::Accessor;
pub use compile::compile;
pub use template::{CompiledTemplate, MissingFieldPolicy};
