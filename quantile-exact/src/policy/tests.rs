// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! Tests: [`crate::policy`].

#![cfg(test)]

use super::{Exclusive, Inclusive, Nearest, QuantilePolicy, Target};
use crate::errors::UsageError;

#[test]
fn nearest_odd_count_scenario() {
    // From the design's end-to-end scenario 1: len 11, level 0.5 -> index 5.
    assert_eq!(Nearest::target(0.5, 11), Target::Nearest { index: 5 });
}

#[test]
fn nearest_level_one_is_last_index() {
    assert_eq!(Nearest::target(1.0, 11), Target::Nearest { index: 10 });
}

#[test]
fn nearest_accepts_boundaries() {
    assert!(Nearest::validate_level(0.0).is_ok());
    assert!(Nearest::validate_level(1.0).is_ok());
    assert!(Nearest::validate_level(-0.1).is_err());
    assert!(Nearest::validate_level(1.1).is_err());
    assert!(Nearest::validate_level(f64::NAN).is_err());
}

#[test]
fn exclusive_rejects_closed_endpoints() {
    assert_eq!(
        Exclusive::validate_level(0.0),
        Err(UsageError::BadArguments { level: 0.0 })
    );
    assert_eq!(
        Exclusive::validate_level(1.0),
        Err(UsageError::BadArguments { level: 1.0 })
    );
    assert!(Exclusive::validate_level(0.25).is_ok());
}

#[test]
fn exclusive_scenario_quarter() {
    // From the design's scenario 4: len 3, level 0.25 -> h=1, n=1, frac=0.
    assert_eq!(
        Exclusive::target(0.25, 3),
        Target::Interpolate { n: 1, frac: 0.0 }
    );
}

#[test]
fn inclusive_accepts_closed_endpoints() {
    assert!(Inclusive::validate_level(0.0).is_ok());
    assert!(Inclusive::validate_level(1.0).is_ok());
}

#[test]
fn inclusive_even_count_scenario() {
    // From the design's scenario 3: len 4, level 0.5 -> h=2.5, n=2, frac=0.5.
    assert_eq!(
        Inclusive::target(0.5, 4),
        Target::Interpolate { n: 2, frac: 0.5 }
    );
}
