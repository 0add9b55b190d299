// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! The three quantile conventions sharing one sample buffer.
//!
//! Each policy is a zero-sized marker type implementing [`QuantilePolicy`],
//! per the design's substitution (a) for the source's policy inheritance:
//! one generic finalizer parameterized by a policy trait, preserving
//! inlining, instead of a tagged variant matched at finalize time.

use crate::errors::UsageError;

/// The target position(s) a policy needs computed by partial selection for
/// one query level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Target {
    /// The nearest-rank policy needs exactly one order statistic, at this
    /// 0-indexed position.
    Nearest {
        /// 0-indexed target position.
        index: usize,
    },
    /// An interpolation policy needs two adjacent order statistics and an
    /// interpolation fraction, unless the level falls outside `[min, max]`
    /// boundaries (handled by the caller via `n` falling outside
    /// `1..=len`).
    Interpolate {
        /// `floor(h)`, 1-indexed position of the lower order statistic.
        n: usize,
        /// `h - n`, the interpolation fraction in `[0, 1)`.
        frac: f64,
    },
}

/// A quantile convention: maps a query level and a buffer length to the
/// position(s) partial selection must compute.
///
/// Implementations are zero-sized marker types; the trait's methods are
/// pure index arithmetic, independent of the sample buffer itself.
pub trait QuantilePolicy: Copy + 'static {
    /// Whether this policy linearly interpolates between two order
    /// statistics (`true`) or returns a single sample verbatim (`false`).
    const INTERPOLATES: bool;

    /// Validates `level` is in the range this policy accepts, returning
    /// [`UsageError::BadArguments`] otherwise.
    fn validate_level(level: f64) -> Result<(), UsageError> {
        if !(0.0..=1.0).contains(&level) {
            return Err(UsageError::BadArguments { level });
        }
        Ok(())
    }

    /// Computes the target position(s) for `level` over a buffer of length
    /// `len`. `len` must be non-zero; callers handle the empty state
    /// themselves.
    fn target(level: f64, len: usize) -> Target;
}

/// Nearest-rank policy (the default, "exact" convention): no
/// interpolation, always returns an element of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nearest;

impl QuantilePolicy for Nearest {
    const INTERPOLATES: bool = false;

    fn target(level: f64, len: usize) -> Target {
        let index = if level < 1.0 {
            ((level * len as f64).floor() as usize).min(len - 1)
        } else {
            len - 1
        };
        Target::Nearest { index }
    }
}

/// Exclusive-interpolation policy (Excel `PERCENTILE.EXC`, R type-6, SciPy
/// `(0, 0)`). Rejects the closed endpoints `0.0` and `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusive;

impl QuantilePolicy for Exclusive {
    const INTERPOLATES: bool = true;

    fn validate_level(level: f64) -> Result<(), UsageError> {
        if !(level.is_finite()) || level <= 0.0 || level >= 1.0 {
            return Err(UsageError::BadArguments { level });
        }
        Ok(())
    }

    fn target(level: f64, len: usize) -> Target {
        let h = level * (len as f64 + 1.0);
        let n = h.floor() as isize;
        Target::Interpolate {
            n: n.max(0) as usize,
            frac: h - n as f64,
        }
    }
}

/// Inclusive-interpolation policy (Excel `PERCENTILE.INC`, R type-7, SciPy
/// `(1, 1)`). The closed endpoints `0.0` and `1.0` are valid and map to the
/// minimum and maximum respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inclusive;

impl QuantilePolicy for Inclusive {
    const INTERPOLATES: bool = true;

    fn target(level: f64, len: usize) -> Target {
        let h = level * (len as f64 - 1.0) + 1.0;
        let n = h.floor() as isize;
        Target::Interpolate {
            n: n.max(0) as usize,
            frac: h - n as f64,
        }
    }
}

mod tests;
