// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! The sample buffer: a small-vector with inline storage, as described in
//! the design's storage policy.

use core::marker::PhantomData;
use core::mem::{size_of, MaybeUninit};

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;
#[cfg(feature = "alloc")]
use alloc_crate::vec::Vec;

use crate::element::{Element, INLINE_BUDGET_BYTES};
use crate::errors::ResourceError;
use crate::internals::macros::{invariant, optionally_unsafe};

/// Fixed-size, aligned byte region backing the inline slots. The alignment
/// covers every supported element (the widest natural alignment among
/// `i8`..`i256`/`u8`..`u256`/`f32`/`f64` is 16, from `i128`/`u128`).
#[repr(align(16))]
#[derive(Clone, Copy)]
struct InlineBytes([MaybeUninit<u8>; INLINE_BUDGET_BYTES]);

impl InlineBytes {
    const fn uninit() -> Self {
        Self([MaybeUninit::uninit(); INLINE_BUDGET_BYTES])
    }
}

/// An ordered sequence of samples with small-object optimization.
///
/// Holds up to `T::INLINE_CAPACITY` elements inline (no allocation); beyond
/// that it spills permanently to a heap-backed `Vec<T>`. Element order is
/// not part of the buffer's semantic identity (invariant 3 in the data
/// model): any permutation is an equivalent buffer.
pub(crate) enum SampleBuffer<T: Element> {
    /// Fewer than or equal to `T::INLINE_CAPACITY` elements; no heap
    /// allocation has occurred.
    Inline {
        bytes: InlineBytes,
        len: usize,
        _marker: PhantomData<T>,
    },
    /// More than `T::INLINE_CAPACITY` elements have ever been present at
    /// once; storage is heap-backed and does not revert to inline even if
    /// elements are later removed (the buffer never removes elements other
    /// than by being dropped, so in practice this state is terminal).
    #[cfg(feature = "alloc")]
    Heap(Vec<T>),
}

impl<T: Element> SampleBuffer<T> {
    /// Creates an empty buffer; does not allocate.
    pub(crate) fn new() -> Self {
        SampleBuffer::Inline {
            bytes: InlineBytes::uninit(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Logical number of retained samples.
    pub(crate) fn len(&self) -> usize {
        match self {
            SampleBuffer::Inline { len, .. } => *len,
            #[cfg(feature = "alloc")]
            SampleBuffer::Heap(v) => v.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a single sample in amortized O(1).
    pub(crate) fn push(&mut self, x: T) -> Result<(), ResourceError> {
        match self {
            SampleBuffer::Inline { bytes, len, .. } if *len < T::INLINE_CAPACITY => {
                let offset = *len * size_of::<T>();
                // SAFETY: `offset + size_of::<T>() <= INLINE_CAPACITY * size_of::<T>()
                // <= INLINE_BUDGET_BYTES` by the guard above, and `InlineBytes` is
                // aligned for every supported `T`.
                unsafe {
                    let ptr = bytes.0.as_mut_ptr().add(offset).cast::<T>();
                    ptr.write(x);
                }
                *len += 1;
                Ok(())
            }
            SampleBuffer::Inline { .. } => {
                self.spill_to_heap()?;
                self.push(x)
            }
            #[cfg(feature = "alloc")]
            SampleBuffer::Heap(v) => {
                v.try_reserve(1)
                    .map_err(|_| ResourceError::MemoryLimitExceeded)?;
                v.push(x);
                Ok(())
            }
        }
    }

    /// Appends all elements of `other`, preserving it.
    pub(crate) fn extend(&mut self, other: &SampleBuffer<T>) -> Result<(), ResourceError> {
        self.reserve(other.len())?;
        for &x in other.as_slice() {
            self.push(x)?;
        }
        Ok(())
    }

    /// Ensures capacity for at least `additional` more elements without
    /// repeated reallocation.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), ResourceError> {
        match self {
            SampleBuffer::Inline { len, .. } => {
                if *len + additional > T::INLINE_CAPACITY {
                    self.spill_to_heap()?;
                    self.reserve(additional)?;
                }
                Ok(())
            }
            #[cfg(feature = "alloc")]
            SampleBuffer::Heap(v) => v
                .try_reserve(additional)
                .map_err(|_| ResourceError::MemoryLimitExceeded),
        }
    }

    /// Grows the logical length to `n`, filling newly added slots with
    /// `T::default()`. Used by `deserialize` to bulk-fill before reading
    /// raw bytes into the slice. Never shrinks; `n` must be `>= len()`.
    pub(crate) fn resize(&mut self, n: usize) -> Result<(), ResourceError> {
        optionally_unsafe! {
            invariant!(n >= self.len());
        }
        self.reserve(n - self.len())?;
        while self.len() < n {
            self.push(T::default())?;
        }
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn spill_to_heap(&mut self) -> Result<(), ResourceError> {
        if let SampleBuffer::Inline { bytes, len, .. } = self {
            let n = *len;
            let mut v: Vec<T> = Vec::new();
            v.try_reserve(n.max(T::INLINE_CAPACITY * 2))
                .map_err(|_| ResourceError::MemoryLimitExceeded)?;
            for i in 0..n {
                let offset = i * size_of::<T>();
                // SAFETY: slots `0..len` were written by `push`/`resize`.
                let value = unsafe { bytes.0.as_ptr().add(offset).cast::<T>().read() };
                v.push(value);
            }
            *self = SampleBuffer::Heap(v);
        }
        Ok(())
    }

    #[cfg(not(feature = "alloc"))]
    fn spill_to_heap(&mut self) -> Result<(), ResourceError> {
        Err(ResourceError::MemoryLimitExceeded)
    }

    /// Borrows the buffer's elements as a mutable slice, usable by the
    /// partial-selection primitive regardless of inline/heap storage.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            SampleBuffer::Inline { bytes, len, .. } => unsafe {
                // SAFETY: slots `0..len` were written by `push`/`resize`, and
                // `InlineBytes`'s alignment and stride match `T`'s layout.
                core::slice::from_raw_parts_mut(bytes.0.as_mut_ptr().cast::<T>(), *len)
            },
            #[cfg(feature = "alloc")]
            SampleBuffer::Heap(v) => v.as_mut_slice(),
        }
    }

    /// Borrows the buffer's elements as a slice.
    pub(crate) fn as_slice(&self) -> &[T] {
        match self {
            SampleBuffer::Inline { bytes, len, .. } => unsafe {
                // SAFETY: see `as_mut_slice`.
                core::slice::from_raw_parts(bytes.0.as_ptr().cast::<T>(), *len)
            },
            #[cfg(feature = "alloc")]
            SampleBuffer::Heap(v) => v.as_slice(),
        }
    }
}
