// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! Tests: [`crate::wire`].

#![cfg(test)]

use super::{read_varuint, write_varuint};

#[test]
fn varuint_roundtrip_small_and_large() {
    for &v in &[0u64, 1, 127, 128, 300, u32::MAX as u64, u64::MAX] {
        let mut buf = Vec::new();
        write_varuint(&mut buf, v);
        let mut source = buf.as_slice();
        assert_eq!(read_varuint(&mut source).unwrap(), v);
        assert!(source.is_empty());
    }
}

#[test]
fn varuint_single_byte_below_128() {
    let mut buf = Vec::new();
    write_varuint(&mut buf, 42);
    assert_eq!(buf, vec![42]);
}

#[test]
fn read_exact_short_source_errors() {
    use super::ByteSource;
    let mut source: &[u8] = &[1, 2];
    let mut out = [0u8; 3];
    let err = source.read_exact(&mut out).unwrap_err();
    assert_eq!(
        err,
        crate::errors::ResourceError::CannotReadAllData {
            expected: 3,
            available: 2,
        }
    );
}
