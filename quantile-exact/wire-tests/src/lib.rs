// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire-format cross-checks for `quantile-exact`, kept as a separate
//! workspace member so its test-only dependencies don't leak into the core
//! crate's own dependency graph.

#![cfg(test)]

mod tests;
