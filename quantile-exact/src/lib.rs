// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! An exact quantile aggregator: a column-database aggregate-function core
//! that computes order statistics over a stream of numeric samples by
//! materializing them and applying partial selection.
//!
//! Three conventions share one underlying [`state::QuantileState`]:
//! [`policy::Nearest`] (no interpolation, always returns a retained sample),
//! [`policy::Exclusive`] (Excel `PERCENTILE.EXC`) and [`policy::Inclusive`]
//! (Excel `PERCENTILE.INC`). The aggregate contract is the usual one for this
//! kind of per-group state: construct, `add`/`merge` any number of times in
//! any order, then `get`/`get_float` (optionally more than once, at
//! different levels).
//!
//! This crate does not parse SQL, plan queries, or provide approximate
//! quantile methods (T-Digest, reservoir sampling); it is the aggregate
//! state core those layers would sit on top of.
// no_std
#![cfg_attr(not(any(test, doc, feature = "std")), no_std)]
// Regular nightly features
#![cfg_attr(feature = "unstable", feature(coverage_attribute))]
#![cfg_attr(feature = "unstable", feature(doc_cfg))]
#![cfg_attr(feature = "unstable", feature(likely_unlikely))]
// In the code maintenance mode, disallow all warnings.
#![cfg_attr(feature = "maint-code", deny(warnings))]
// Non-test code requires documents (including private items)
#![cfg_attr(not(test), warn(missing_docs))]
#![cfg_attr(not(test), warn(clippy::missing_docs_in_private_items))]
// Unless in the maintenance mode, allow unknown lints.
#![cfg_attr(not(feature = "maint-lints"), allow(unknown_lints))]
// Unless in the maintenance mode, allow old lint names.
#![cfg_attr(not(feature = "maint-lints"), allow(renamed_and_removed_lints))]
// Tests: allow unused unsafe blocks (invariant! does not need unsafe on
// tests but others may need this macro).
#![cfg_attr(test, allow(unused_unsafe))]
// Tests: non-simplified boolean expressions should be allowed.
#![cfg_attr(test, allow(clippy::nonminimal_bool))]
// Tests: assertion on constants should be allowed.
#![cfg_attr(test, allow(clippy::assertions_on_constants))]
// Tests: redundant clones should be allowed.
#![cfg_attr(test, allow(clippy::redundant_clone))]

// alloc is required when the "alloc" feature is enabled or testing (including doctests).
#[cfg(any(feature = "alloc", test, doc))]
extern crate alloc;

mod internals;

mod buffer;
mod element;
mod errors;
mod policy;
mod select;
mod state;
mod wire;

// Type re-exports
pub use element::{Element, I256, U256};
pub use errors::{QuantileError, ResourceError, UsageError};
pub use policy::{Exclusive, Inclusive, Nearest, QuantilePolicy};
pub use state::{QuantileState, QuantileStateOptions};
pub use wire::{ByteSink, ByteSource};

/// The recommended set (prelude) to import.
///
/// It provides a subset of crate-root types and traits suitable for using
/// this crate. Because some methods require importing certain traits, just
/// importing this can be convenient (not to confuse beginners, those traits
/// are imported as `_`).
pub mod prelude {
    pub use super::Element as _;
    pub use super::QuantilePolicy as _;

    pub use super::{Exclusive, Inclusive, Nearest};
    pub use super::{QuantileState, QuantileStateOptions};
    pub use super::{QuantileError, ResourceError, UsageError};
}

mod tests;
