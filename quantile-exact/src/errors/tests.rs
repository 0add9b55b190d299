// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! Tests: [`crate::errors`].

#![cfg(test)]

use super::{QuantileError, ResourceError, UsageError};

#[test]
fn usage_error_impls() {
    assert_eq!(
        format!("{err}", err = UsageError::NotImplemented),
        "weighted samples are not supported by the exact quantile aggregator"
    );
    assert_eq!(
        format!("{err}", err = UsageError::BadArguments { level: 0.0 }),
        "quantile level 0 is out of the accepted range"
    );
}

#[test]
fn resource_error_impls() {
    assert_eq!(
        format!("{err}", err = ResourceError::MemoryLimitExceeded),
        "allocation failed while growing the sample buffer"
    );
    assert_eq!(
        format!(
            "{err}",
            err = ResourceError::CannotReadAllData {
                expected: 16,
                available: 4,
            }
        ),
        "expected 16 bytes of sample data but only 4 were available"
    );
}

#[test]
fn quantile_error_wraps_and_displays_inner() {
    let usage: QuantileError = UsageError::NotImplemented.into();
    assert_eq!(format!("{usage}"), format!("{}", UsageError::NotImplemented));

    let resource: QuantileError = ResourceError::MemoryLimitExceeded.into();
    assert_eq!(
        format!("{resource}"),
        format!("{}", ResourceError::MemoryLimitExceeded)
    );

    assert_eq!(
        usage,
        QuantileError::Usage(UsageError::NotImplemented)
    );
}

#[cfg(feature = "std")]
#[test]
fn quantile_error_source_chains_to_inner() {
    use std::error::Error as _;

    let err: QuantileError = ResourceError::MemoryLimitExceeded.into();
    let source = err.source().unwrap();
    assert_eq!(format!("{source}"), format!("{}", ResourceError::MemoryLimitExceeded));
}
