// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! The sample element type abstraction.
//!
//! [`Element`] generalizes the eleven concrete numeric types the aggregator
//! supports (signed/unsigned integers of width 8 through 256 bits, plus
//! `f32`/`f64`) into one sealed trait so the rest of the crate — the sample
//! buffer, the partial-selection primitive, the policies — can be written
//! once and monomorphized per type rather than duplicated per width.

use crate::internals::utils::Sealed;

/// Total number of bytes of sample data the sample buffer keeps inline
/// before spilling to the heap, not counting the buffer's own header
/// (length, and the heap/inline discriminant). Combined with a small
/// header this keeps the whole `SampleBuffer<T>` close to the 64-byte
/// budget from the design for every element width; see `DESIGN.md`'s open
/// question on why an enum-based buffer cannot hit that figure exactly.
pub(crate) const INLINE_BUDGET_BYTES: usize = 32;

// The widest supported element (I256/U256) must still fit at least one
// inline slot, or INLINE_CAPACITY's zero-fallback below would be reachable
// on every push and the small-object optimization would be pointless.
static_assertions::const_assert!(INLINE_BUDGET_BYTES >= 32);

/// A numeric sample type the aggregator can operate on.
///
/// This trait is sealed: it is implemented for exactly the eleven types
/// named in the data model (`i8`..`i256`, `u8`..`u256`, `f32`, `f64`) and
/// cannot be implemented by downstream crates.
pub trait Element: Sealed + Copy + Default + PartialOrd + Send + Sync + 'static {
    /// Width of one sample, in bytes, in the wire format.
    const WIDTH: usize;

    /// Number of samples the sample buffer keeps inline before spilling to
    /// the heap. Derived from [`INLINE_BUDGET_BYTES`], never zero.
    const INLINE_CAPACITY: usize;

    /// Returns `true` if this value must be rejected at insertion because
    /// it cannot participate in the aggregator's total order.
    ///
    /// Always `false` for integer element types; tests the IEEE-754 bit
    /// pattern for floating-point types.
    fn is_nan(&self) -> bool;

    /// Total ordering consistent with [`is_nan`](Self::is_nan) filtering:
    /// every value retained by the buffer compares via `partial_cmp`
    /// without ever returning `None`.
    fn cmp_total(&self, other: &Self) -> core::cmp::Ordering {
        self.partial_cmp(other)
            .expect("non-NaN Element values must be totally ordered")
    }

    /// Lossy conversion used by the interpolation policies, whose result is
    /// always a 64-bit float regardless of the element type.
    fn to_f64_lossy(&self) -> f64;

    /// The value `get`/`get_float` return for the nearest-rank policy when
    /// the state is empty: the floating NaN sentinel for float types, the
    /// default (zero) value for integer types. See the open question in
    /// the design notes about this being potentially indistinguishable
    /// from a legitimate zero-valued quantile for unsigned integers.
    fn empty_sentinel() -> Self {
        Self::default()
    }

    /// Writes this value to `out` (which must be exactly [`Self::WIDTH`]
    /// bytes) in little-endian order.
    fn write_le(&self, out: &mut [u8]);

    /// Reads a value from `bytes` (which must be exactly [`Self::WIDTH`]
    /// bytes), interpreted as little-endian.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_element_primitive {
    ($t:ty, is_nan = $is_nan:expr, empty_sentinel = $empty_sentinel:expr) => {
        impl Sealed for $t {}
        impl Element for $t {
            const WIDTH: usize = core::mem::size_of::<$t>();
            const INLINE_CAPACITY: usize = {
                let width = core::mem::size_of::<$t>();
                let cap = INLINE_BUDGET_BYTES / width;
                if cap == 0 {
                    1
                } else {
                    cap
                }
            };

            fn is_nan(&self) -> bool {
                #[allow(clippy::redundant_closure_call)]
                ($is_nan)(*self)
            }

            fn to_f64_lossy(&self) -> f64 {
                *self as f64
            }

            fn empty_sentinel() -> Self {
                #[allow(clippy::redundant_closure_call)]
                ($empty_sentinel)()
            }

            fn write_le(&self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; core::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }
        }
    };
}

impl_element_primitive!(i8, is_nan = |_: i8| false, empty_sentinel = || 0i8);
impl_element_primitive!(i16, is_nan = |_: i16| false, empty_sentinel = || 0i16);
impl_element_primitive!(i32, is_nan = |_: i32| false, empty_sentinel = || 0i32);
impl_element_primitive!(i64, is_nan = |_: i64| false, empty_sentinel = || 0i64);
impl_element_primitive!(i128, is_nan = |_: i128| false, empty_sentinel = || 0i128);
impl_element_primitive!(u8, is_nan = |_: u8| false, empty_sentinel = || 0u8);
impl_element_primitive!(u16, is_nan = |_: u16| false, empty_sentinel = || 0u16);
impl_element_primitive!(u32, is_nan = |_: u32| false, empty_sentinel = || 0u32);
impl_element_primitive!(u64, is_nan = |_: u64| false, empty_sentinel = || 0u64);
impl_element_primitive!(u128, is_nan = |_: u128| false, empty_sentinel = || 0u128);
impl_element_primitive!(
    f32,
    is_nan = |v: f32| v.is_nan(),
    empty_sentinel = || f32::NAN
);
impl_element_primitive!(
    f64,
    is_nan = |v: f64| v.is_nan(),
    empty_sentinel = || f64::NAN
);

/// A signed 256-bit integer, stored as four little-endian `u64` limbs.
///
/// This is not a general-purpose wide-integer type: it implements only the
/// operations [`Element`] needs (ordering, little-endian transcoding, a
/// lossy widening to `f64`), nothing else. Arithmetic on samples is out of
/// scope for the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct I256 {
    /// Limbs in little-endian order: `limbs[0]` is the least significant.
    pub limbs: [u64; 4],
}

/// An unsigned 256-bit integer, stored as four little-endian `u64` limbs.
///
/// See [`I256`] for the scope of operations this type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct U256 {
    /// Limbs in little-endian order: `limbs[0]` is the least significant.
    pub limbs: [u64; 4],
}

impl U256 {
    fn cmp_unsigned(&self, other: &Self) -> core::cmp::Ordering {
        for i in (0..4).rev() {
            let ord = self.limbs[i].cmp(&other.limbs[i]);
            if ord != core::cmp::Ordering::Equal {
                return ord;
            }
        }
        core::cmp::Ordering::Equal
    }

    fn to_f64_lossy(&self) -> f64 {
        let mut acc = 0f64;
        for &limb in self.limbs.iter().rev() {
            acc = acc * 18_446_744_073_709_551_616.0 /* 2^64 */ + limb as f64;
        }
        acc
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp_unsigned(other))
    }
}
impl Ord for U256 {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.cmp_unsigned(other)
    }
}

impl I256 {
    fn is_negative(&self) -> bool {
        (self.limbs[3] >> 63) & 1 == 1
    }

    fn cmp_signed(&self, other: &Self) -> core::cmp::Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => core::cmp::Ordering::Less,
            (false, true) => core::cmp::Ordering::Greater,
            _ => {
                for i in (0..4).rev() {
                    let ord = self.limbs[i].cmp(&other.limbs[i]);
                    if ord != core::cmp::Ordering::Equal {
                        return ord;
                    }
                }
                core::cmp::Ordering::Equal
            }
        }
    }

    fn to_f64_lossy(&self) -> f64 {
        if self.is_negative() {
            // Two's complement negate: invert limbs and add one.
            let mut limbs = self.limbs;
            let mut carry = 1u64;
            for limb in limbs.iter_mut() {
                let (v, c1) = (!*limb).overflowing_add(carry);
                *limb = v;
                carry = c1 as u64;
            }
            -(U256 { limbs }.to_f64_lossy())
        } else {
            U256 { limbs: self.limbs }.to_f64_lossy()
        }
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp_signed(other))
    }
}
impl Ord for I256 {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.cmp_signed(other)
    }
}

impl Sealed for I256 {}
impl Element for I256 {
    const WIDTH: usize = 32;
    const INLINE_CAPACITY: usize = {
        let cap = INLINE_BUDGET_BYTES / 32;
        if cap == 0 {
            1
        } else {
            cap
        }
    };

    fn is_nan(&self) -> bool {
        false
    }

    fn to_f64_lossy(&self) -> f64 {
        I256::to_f64_lossy(self)
    }

    fn write_le(&self, out: &mut [u8]) {
        for (i, limb) in self.limbs.iter().enumerate() {
            out[i * 8..i * 8 + 8].copy_from_slice(&limb.to_le_bytes());
        }
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            *limb = u64::from_le_bytes(buf);
        }
        I256 { limbs }
    }
}

impl Sealed for U256 {}
impl Element for U256 {
    const WIDTH: usize = 32;
    const INLINE_CAPACITY: usize = {
        let cap = INLINE_BUDGET_BYTES / 32;
        if cap == 0 {
            1
        } else {
            cap
        }
    };

    fn is_nan(&self) -> bool {
        false
    }

    fn to_f64_lossy(&self) -> f64 {
        U256::to_f64_lossy(self)
    }

    fn write_le(&self, out: &mut [u8]) {
        for (i, limb) in self.limbs.iter().enumerate() {
            out[i * 8..i * 8 + 8].copy_from_slice(&limb.to_le_bytes());
        }
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            *limb = u64::from_le_bytes(buf);
        }
        U256 { limbs }
    }
}
