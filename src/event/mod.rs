/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Turns a [`Token`](crate::token::Token) stream produced by the
//! [`Scanner`](crate::scanner::Scanner) into a stream of higher level
//! [`Event`](types::Event)s -- the grammar-aware layer that knows a
//! `Key`/`Value` pair forms a mapping entry, that a bare scalar at
//! stream start implies a document, and so on.

pub(crate) mod error;
pub(crate) mod parser;
pub(crate) mod types;

mod state;

pub(crate) use self::parser::Parser;
