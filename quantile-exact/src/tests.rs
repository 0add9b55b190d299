// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! Tests: [`crate`].

#![cfg(test)]

#[cfg(not(quantile_exact_tests_without_debug_assertions))]
#[test]
fn prerequisites() {
    assert!(
        cfg!(debug_assertions),
        "\
        The tests in this crate requires debug assertions to be enabled (by default).  \
        To test this crate without debug assertions, add rustc flags \"--cfg quantile_exact_tests_without_debug_assertions\".\
    "
    );
}

#[test]
fn prelude_exposes_every_policy() {
    use crate::prelude::*;

    let mut nearest: QuantileState<i32, Nearest> = QuantileState::new();
    nearest.add(1).unwrap();
    assert_eq!(nearest.get(0.0).unwrap(), 1);

    let mut inclusive: QuantileState<f64, Inclusive> = QuantileState::new();
    inclusive.add(1.0).unwrap();
    assert_eq!(inclusive.get_float(0.0).unwrap(), 1.0);

    let mut exclusive: QuantileState<f64, Exclusive> = QuantileState::new();
    exclusive.add(1.0).unwrap();
    exclusive.add(2.0).unwrap();
    exclusive.add(3.0).unwrap();
    assert!(exclusive.get_float(0.5).is_ok());
}
