// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! Types representing specific types of errors.

use core::fmt::{Display, Formatter, Result};

/// An error caused by the caller invoking an unsupported or malformed
/// operation.
///
/// These are always detected synchronously at the call boundary and should
/// be treated by the host as a bug in the caller (or an unsupported SQL
/// feature) rather than as a transient failure of a single aggregate group:
/// the enclosing query should abort, not just the offending group.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum UsageError {
    /// `add_weighted` was called.
    ///
    /// The exact quantile aggregator does not support per-sample weights.
    NotImplemented,
    /// An interpolation policy was given a `level` outside the range it
    /// accepts.
    ///
    /// The exclusive-interpolation policy rejects the closed endpoints
    /// `0.0` and `1.0`; both interpolation policies reject levels outside
    /// `[0.0, 1.0]` and `NaN`.
    BadArguments {
        /// The offending level.
        level: f64,
    },
}
impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            UsageError::NotImplemented => {
                f.write_str("weighted samples are not supported by the exact quantile aggregator")
            }
            UsageError::BadArguments { level } => {
                write!(f, "quantile level {level} is out of the accepted range")
            }
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for UsageError {}
#[cfg(all(not(feature = "std"), quantile_exact_error_in_core = "stable"))]
impl core::error::Error for UsageError {}

/// An error caused by a failure of a collaborator the aggregator depends on:
/// the allocator, or the byte source handed to `deserialize`.
///
/// Resource errors leave the state poisoned; the host must discard the
/// group rather than continue operating on it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ResourceError {
    /// The sample buffer could not grow to the requested capacity.
    MemoryLimitExceeded,
    /// `deserialize` needed more bytes than the byte source had available.
    CannotReadAllData {
        /// Number of bytes the wire format declared it would contain.
        expected: usize,
        /// Number of bytes the source was actually able to supply.
        available: usize,
    },
}
impl Display for ResourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ResourceError::MemoryLimitExceeded => {
                f.write_str("allocation failed while growing the sample buffer")
            }
            ResourceError::CannotReadAllData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "expected {expected} bytes of sample data but only {available} were available"
                )
            }
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for ResourceError {}
#[cfg(all(not(feature = "std"), quantile_exact_error_in_core = "stable"))]
impl core::error::Error for ResourceError {}

/// The unified error type returned by the public aggregator surface.
///
/// Callers that only care about the two broad categories from the design
/// notes (usage vs. resource) can match on this outer enum; callers that
/// want to discriminate further can match through to [`UsageError`] or
/// [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum QuantileError {
    /// See [`UsageError`].
    Usage(UsageError),
    /// See [`ResourceError`].
    Resource(ResourceError),
}
impl Display for QuantileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            QuantileError::Usage(err) => err.fmt(f),
            QuantileError::Resource(err) => err.fmt(f),
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for QuantileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantileError::Usage(err) => Some(err),
            QuantileError::Resource(err) => Some(err),
        }
    }
}
#[cfg(all(not(feature = "std"), quantile_exact_error_in_core = "stable"))]
impl core::error::Error for QuantileError {}
impl From<UsageError> for QuantileError {
    fn from(value: UsageError) -> Self {
        QuantileError::Usage(value)
    }
}
impl From<ResourceError> for QuantileError {
    fn from(value: ResourceError) -> Self {
        QuantileError::Resource(value)
    }
}

mod tests;
