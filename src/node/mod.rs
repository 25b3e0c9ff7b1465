/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Composing a [`Parser`](crate::event::Parser)'s event stream into
//! [`Node`] trees: tag resolution, anchor/alias tracking, and merge-key
//! flattening.

mod composer;
mod constructor;
mod error;
mod graph;
mod resolver;
mod types;

pub(crate) use self::{
    composer::Composer,
    constructor::{Constructor, CoreConstructor, RawValue},
    error::{NodeError, NodeResult},
    resolver::{CoreResolver, NodeKind, Resolver},
    types::Value,
};

pub use self::types::Node;
