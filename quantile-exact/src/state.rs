// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! The public aggregate state: accumulation plus single- and multi-level
//! finalization, generic over element type and quantile policy.

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;

use core::marker::PhantomData;

use crate::buffer::SampleBuffer;
use crate::element::Element;
use crate::errors::{QuantileError, ResourceError, UsageError};
use crate::internals::macros::{invariant, optionally_unsafe};
use crate::policy::{Exclusive, Inclusive, Nearest, QuantilePolicy, Target};
use crate::select::{max_to_back, min_to_front, select_nth, slice_max, slice_min};
use crate::wire::{read_varuint, write_varuint, ByteSink, ByteSource};

/// Construction-time knobs for a [`QuantileState`].
///
/// The aggregator itself has no runtime configuration beyond element type
/// and policy (both chosen at the type level); this only controls an
/// optional up-front reservation, useful when the host knows roughly how
/// many samples a group will receive and wants to avoid repeated
/// reallocation during `add`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantileStateOptions {
    /// Number of samples to reserve capacity for immediately.
    pub reserve_hint: usize,
}

impl QuantileStateOptions {
    /// Sets [`Self::reserve_hint`].
    pub fn with_reserve_hint(mut self, hint: usize) -> Self {
        self.reserve_hint = hint;
        self
    }
}

/// The exact quantile aggregate state.
///
/// `T` is the sample element type (see [`crate::element::Element`]); `P`
/// selects one of the three quantile conventions ([`Nearest`],
/// [`Exclusive`], [`Inclusive`]) and determines which `get`/`get_float`
/// entry points are available (see the per-policy `impl` blocks below).
///
/// Lifecycle: `EMPTY` (via [`QuantileState::new`]) `-> ACCUMULATING` (via
/// [`add`](Self::add)/[`merge`](Self::merge), any number of times, in any
/// order) `-> FINALIZED` (via a `get`/`get_float` call, which may be
/// repeated with different levels: finalization only permutes the buffer,
/// it never discards samples).
pub struct QuantileState<T: Element, P: QuantilePolicy> {
    buffer: SampleBuffer<T>,
    _policy: PhantomData<P>,
}

impl<T: Element, P: QuantilePolicy> core::fmt::Debug for QuantileState<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuantileState")
            .field("count", &self.buffer.len())
            .finish()
    }
}

impl<T: Element, P: QuantilePolicy> Default for QuantileState<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, P: QuantilePolicy> QuantileState<T, P> {
    /// Creates an empty state. Does not allocate.
    pub fn new() -> Self {
        QuantileState {
            buffer: SampleBuffer::new(),
            _policy: PhantomData,
        }
    }

    /// Creates an empty state, reserving capacity up front per `options`.
    pub fn with_options(options: QuantileStateOptions) -> Result<Self, ResourceError> {
        let mut state = Self::new();
        state.buffer.reserve(options.reserve_hint)?;
        Ok(state)
    }

    /// Logical number of retained samples.
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    /// Appends one sample. NaN samples (floating element types only) are
    /// silently dropped, per the design's rationale: partial-selection
    /// comparators require a total order, so NaN is filtered at insertion
    /// rather than at finalization.
    pub fn add(&mut self, x: T) -> Result<(), ResourceError> {
        if x.is_nan() {
            return Ok(());
        }
        let result = self.buffer.push(x);
        #[cfg(feature = "tracing")]
        if result.is_err() {
            tracing::error!(
                element = core::any::type_name::<T>(),
                "sample buffer allocation failed"
            );
        }
        result
    }

    /// Always fails: the exact quantile aggregator does not support
    /// per-sample weights.
    pub fn add_weighted(&mut self, _x: T, _weight: f64) -> Result<(), UsageError> {
        #[cfg(feature = "tracing")]
        tracing::warn!("add_weighted called on exact quantile aggregator");
        Err(UsageError::NotImplemented)
    }

    /// Merges `other` into `self`, appending all of its retained samples.
    /// Commutative, associative, and has the empty state as identity.
    pub fn merge(&mut self, other: &Self) -> Result<(), ResourceError> {
        let result = self.buffer.extend(&other.buffer);
        #[cfg(feature = "tracing")]
        if result.is_err() {
            tracing::error!("sample buffer allocation failed while merging");
        }
        result
    }

    /// Serializes the state: a varuint sample count followed by that many
    /// little-endian encoded elements, per the wire format.
    pub fn serialize(&self, sink: &mut impl ByteSink) {
        write_varuint(sink, self.buffer.len() as u64);
        let mut byte_buf = [0u8; 32];
        for sample in self.buffer.as_slice() {
            sample.write_le(&mut byte_buf[..T::WIDTH]);
            sink.write(&byte_buf[..T::WIDTH]);
        }
    }

    /// Deserializes a state written by [`serialize`](Self::serialize). Does
    /// not revalidate NaN-freedom or bounds: the wire format is trusted
    /// intra-cluster data, per the design.
    pub fn deserialize(source: &mut impl ByteSource) -> Result<Self, ResourceError> {
        let len = read_varuint(source)? as usize;
        let mut buffer = SampleBuffer::new();
        buffer.resize(len)?;
        let mut byte_buf = [0u8; 32];
        for slot in buffer.as_mut_slice() {
            let result = source.read_exact(&mut byte_buf[..T::WIDTH]);
            #[cfg(feature = "tracing")]
            if result.is_err() {
                tracing::error!("short read while deserializing quantile state");
            }
            result?;
            *slot = T::read_le(&byte_buf[..T::WIDTH]);
        }
        Ok(QuantileState {
            buffer,
            _policy: PhantomData,
        })
    }
}

/// One element of a query result: either an exact sample (nearest policy)
/// or an interpolated 64-bit float (interpolation policies).
enum FinalizeResult<T> {
    Exact(T),
    Float(f64),
}

/// Single-quantile finalization shared by every policy. `buf` is mutated
/// in place (partially sorted around the queried position(s)); re-running
/// with a different level remains correct, since partial selection always
/// operates on the full (sub-)range.
fn finalize_single<T: Element, P: QuantilePolicy>(
    buf: &mut [T],
    level: f64,
) -> Result<FinalizeResult<T>, UsageError> {
    P::validate_level(level)?;
    if buf.is_empty() {
        return Ok(if P::INTERPOLATES {
            FinalizeResult::Float(f64::NAN)
        } else {
            FinalizeResult::Exact(T::empty_sentinel())
        });
    }
    match P::target(level, buf.len()) {
        Target::Nearest { index } => Ok(FinalizeResult::Exact(select_nth(buf, index))),
        Target::Interpolate { n, frac } => {
            let len = buf.len();
            if n >= len {
                Ok(FinalizeResult::Float(slice_max(buf).to_f64_lossy()))
            } else if n < 1 {
                Ok(FinalizeResult::Float(slice_min(buf).to_f64_lossy()))
            } else {
                let lower = select_nth(buf, n - 1).to_f64_lossy();
                let upper = min_to_front(&mut buf[n..]).to_f64_lossy();
                Ok(FinalizeResult::Float(lower + frac * (upper - lower)))
            }
        }
    }
}

/// Multi-quantile finalization shared by every policy, implementing the
/// ascending-interval-reuse algorithm from the design: each query after
/// the first operates on a strictly smaller suffix of `buf`, reusing the
/// partial-sort work of every prior query.
///
/// `indices` must be a permutation of `0..levels.len()` such that
/// `levels[indices[i]]` is non-decreasing in `i`; this is a caller
/// obligation enforced through [`crate::internals::macros::invariant`]
/// (not a recoverable error), since honoring it is what makes the reuse
/// across queries sound.
#[cfg(feature = "alloc")]
fn finalize_many<T: Element, P: QuantilePolicy>(
    buf: &mut [T],
    levels: &[f64],
    indices: &[usize],
) -> Result<alloc_crate::vec::Vec<FinalizeResult<T>>, UsageError> {
    for &level in levels {
        P::validate_level(level)?;
    }
    optionally_unsafe! {
        invariant!(indices.len() == levels.len());
    }
    #[cfg(debug_assertions)]
    {
        let mut prev = f64::NEG_INFINITY;
        for &idx in indices {
            optionally_unsafe! {
                invariant!(levels[idx] >= prev);
            }
            prev = levels[idx];
        }
    }

    let mut out: alloc_crate::vec::Vec<FinalizeResult<T>> = (0..levels.len())
        .map(|_| FinalizeResult::Exact(T::empty_sentinel()))
        .collect();

    if buf.is_empty() {
        for &idx in indices {
            out[idx] = if P::INTERPOLATES {
                FinalizeResult::Float(f64::NAN)
            } else {
                FinalizeResult::Exact(T::empty_sentinel())
            };
        }
        return Ok(out);
    }

    let len = buf.len();
    let mut interval_start = 0usize;

    for &idx in indices {
        let level = levels[idx];
        match P::target(level, len) {
            Target::Nearest { index } => {
                if index + 1 != interval_start {
                    select_nth(&mut buf[interval_start..], index - interval_start);
                }
                out[idx] = FinalizeResult::Exact(buf[index]);
                interval_start = index + 1;
            }
            Target::Interpolate { n, frac } => {
                if n >= len {
                    let n_i = len - 1;
                    let value = if n_i + 1 == interval_start {
                        buf[n_i].to_f64_lossy()
                    } else {
                        max_to_back(&mut buf[interval_start..]).to_f64_lossy()
                    };
                    out[idx] = FinalizeResult::Float(value);
                    interval_start = n_i + 1;
                } else if n < 1 {
                    let n_i = 0;
                    let value = if n_i + 1 == interval_start {
                        buf[n_i].to_f64_lossy()
                    } else {
                        min_to_front(&mut buf[interval_start..]).to_f64_lossy()
                    };
                    out[idx] = FinalizeResult::Float(value);
                    interval_start = n_i + 1;
                } else {
                    if n + 1 == interval_start {
                        // Exact repeat of the previous query's target: both
                        // positions are already correctly placed.
                    } else if interval_start == n {
                        // The lower position (n - 1) already holds the
                        // previous query's upper value; only the upper
                        // position for this query remains unknown.
                    } else {
                        select_nth(&mut buf[interval_start..], (n - 1) - interval_start);
                    }
                    let lower = buf[n - 1].to_f64_lossy();
                    let upper = min_to_front(&mut buf[n..]).to_f64_lossy();
                    out[idx] = FinalizeResult::Float(lower + frac * (upper - lower));
                    interval_start = n + 1;
                }
            }
        }
    }
    Ok(out)
}

impl<T: Element> QuantileState<T, Nearest> {
    /// Returns the `level` quantile under the nearest-rank convention: no
    /// interpolation, always an element of the retained samples (or the
    /// element type's empty sentinel if the state has no samples).
    pub fn get(&mut self, level: f64) -> Result<T, QuantileError> {
        match finalize_single::<T, Nearest>(self.buffer.as_mut_slice(), level)
            .map_err(QuantileError::from)?
        {
            FinalizeResult::Exact(v) => Ok(v),
            FinalizeResult::Float(_) => unreachable!("Nearest never interpolates"),
        }
    }

    /// Computes `levels.len()` quantiles in one pass, writing
    /// `out[indices[i]]` for each `i`. See [`finalize_many`] for the reuse
    /// strategy; `indices` must order `levels` ascending.
    #[cfg(feature = "alloc")]
    pub fn get_many(
        &mut self,
        levels: &[f64],
        indices: &[usize],
        out: &mut [T],
    ) -> Result<(), QuantileError> {
        let results = finalize_many::<T, Nearest>(self.buffer.as_mut_slice(), levels, indices)
            .map_err(QuantileError::from)?;
        for (slot, result) in out.iter_mut().zip(results) {
            *slot = match result {
                FinalizeResult::Exact(v) => v,
                FinalizeResult::Float(_) => unreachable!("Nearest never interpolates"),
            };
        }
        Ok(())
    }
}

macro_rules! impl_interpolation_entry_points {
    ($policy:ty) => {
        impl<T: Element> QuantileState<T, $policy> {
            /// Returns the `level` quantile as a 64-bit float, interpolating
            /// between adjacent order statistics per this policy's
            /// convention.
            pub fn get_float(&mut self, level: f64) -> Result<f64, QuantileError> {
                match finalize_single::<T, $policy>(self.buffer.as_mut_slice(), level)
                    .map_err(QuantileError::from)?
                {
                    FinalizeResult::Float(v) => Ok(v),
                    FinalizeResult::Exact(_) => unreachable!("interpolation policies always interpolate"),
                }
            }

            /// Computes `levels.len()` quantiles in one pass as 64-bit
            /// floats, writing `out[indices[i]]` for each `i`. `indices`
            /// must order `levels` ascending.
            #[cfg(feature = "alloc")]
            pub fn get_many_float(
                &mut self,
                levels: &[f64],
                indices: &[usize],
                out: &mut [f64],
            ) -> Result<(), QuantileError> {
                let results =
                    finalize_many::<T, $policy>(self.buffer.as_mut_slice(), levels, indices)
                        .map_err(QuantileError::from)?;
                for (slot, result) in out.iter_mut().zip(results) {
                    *slot = match result {
                        FinalizeResult::Float(v) => v,
                        FinalizeResult::Exact(_) => {
                            unreachable!("interpolation policies always interpolate")
                        }
                    };
                }
                Ok(())
            }
        }
    };
}

impl_interpolation_entry_points!(Exclusive);
impl_interpolation_entry_points!(Inclusive);
