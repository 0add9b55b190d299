// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire format tests.

#![cfg(test)]

use quantile_exact::{Nearest, QuantileState, U256};

#[test]
fn golden_bytes_three_i32_samples() {
    let mut state: QuantileState<i32, Nearest> = QuantileState::new();
    for x in [1i32, -2, 300] {
        state.add(x).unwrap();
    }
    let mut bytes = Vec::new();
    state.serialize(&mut bytes);

    let mut expected = vec![3u8];
    expected.extend_from_slice(&1i32.to_le_bytes());
    expected.extend_from_slice(&(-2i32).to_le_bytes());
    expected.extend_from_slice(&300i32.to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn golden_bytes_varuint_count_above_127() {
    let mut state: QuantileState<u8, Nearest> = QuantileState::new();
    for i in 0..200u16 {
        state.add((i % 256) as u8).unwrap();
    }
    let mut bytes = Vec::new();
    state.serialize(&mut bytes);

    // 200 as LEB128: low 7 bits 0x48 with continuation, then 0x01.
    assert_eq!(&bytes[..2], &[0xc8, 0x01]);
    assert_eq!(bytes.len(), 2 + 200);
}

#[test]
fn round_trip_through_serialized_bytes_preserves_query_results() {
    let mut state: QuantileState<f64, Nearest> = QuantileState::new();
    for x in [3.0, 1.0, 4.0, 1.0, 5.0] {
        state.add(x).unwrap();
    }
    let before = state.get(0.5).unwrap();

    let mut bytes = Vec::new();
    state.serialize(&mut bytes);

    let mut source: &[u8] = &bytes;
    let mut restored: QuantileState<f64, Nearest> =
        QuantileState::deserialize(&mut source).unwrap();
    assert_eq!(restored.get(0.5).unwrap(), before);
}

#[test]
fn truncated_bytes_fail_to_deserialize() {
    let mut state: QuantileState<i64, Nearest> = QuantileState::new();
    state.add(42).unwrap();
    state.add(-7).unwrap();
    let mut bytes = Vec::new();
    state.serialize(&mut bytes);
    bytes.pop();

    let mut source: &[u8] = &bytes;
    let result: Result<QuantileState<i64, Nearest>, _> = QuantileState::deserialize(&mut source);
    assert!(result.is_err());
}

#[test]
fn wide_256_bit_elements_round_trip() {
    let mut state: QuantileState<U256, Nearest> = QuantileState::new();
    state.add(U256 { limbs: [1, 0, 0, 0] }).unwrap();
    state
        .add(U256 {
            limbs: [u64::MAX; 4],
        })
        .unwrap();
    state
        .add(U256 {
            limbs: [0, 0, 0, 0],
        })
        .unwrap();

    let mut bytes = Vec::new();
    state.serialize(&mut bytes);
    assert_eq!(bytes.len(), 1 + 3 * 32);

    let mut source: &[u8] = &bytes;
    let mut restored: QuantileState<U256, Nearest> =
        QuantileState::deserialize(&mut source).unwrap();
    assert_eq!(restored.get(0.0).unwrap().limbs, [0, 0, 0, 0]);
}
