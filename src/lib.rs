/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A YAML 1.1 loading pipeline: Scanner -> Parser -> Composer, fronted by
//! a [`loader`] module exposing the whole thing as a handful of
//! `load*` functions.
//!
//! ```rust
//! use yamlet::loader::load_single;
//!
//! let doc = load_single("{a: 1, b: 2}").unwrap();
//! let pairs = doc.as_mapping().unwrap();
//!
//! assert_eq!(pairs[0].0.as_scalar(), Some("a"));
//! ```
//!
//! It is currently still in development, and will likely have multiple
//! breaking changes to the exposed API before stabilizing. Use at your
//! own risk.

#![allow(clippy::suspicious_else_formatting)]

pub mod error;
pub mod loader;
pub mod mark;
pub mod reader;

pub(crate) mod event;
pub(crate) mod node;
pub(crate) mod scanner;
pub(crate) mod token;

pub use self::{
    loader::Loader,
    node::{Node, Value},
    token::ScalarStyle,
};
