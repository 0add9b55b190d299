// SPDX-License-Identifier: Apache-2.0 OR MIT
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 Tsukasa OI <floss_ssdeep@irq.a4lg.com>.

//! Fuzz test cross-checking [`super::select_nth`] against a full sort on
//! random data, mirroring the teacher's naive-vs-optimized fuzz harness
//! (`a4lg-fast-tlsh/fast-tlsh/src/internals/generate/bucket_aggregation/fuzzer.rs`).

#![cfg(test)]

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::select_nth;

#[cfg(all(miri, quantile_exact_tests_reduce_on_miri))]
const ITER: usize = 200;
#[cfg(not(all(miri, quantile_exact_tests_reduce_on_miri)))]
const ITER: usize = 20_000;

#[test]
fn select_nth_matches_full_sort_on_random_data() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed_c0ff_eef0_0d);
    for _ in 0..ITER {
        let len = rng.random_range(1..64);
        let data: Vec<i64> = (0..len).map(|_| rng.random_range(-1000..1000)).collect();
        let k = rng.random_range(0..len);

        let mut sorted = data.clone();
        sorted.sort_unstable();
        let expected = sorted[k];

        let mut copy = data.clone();
        let got = select_nth(&mut copy, k);
        assert_eq!(got, expected, "len={len} k={k} data={data:?}");
        assert!(copy[..k].iter().all(|&x| x <= got));
        assert!(copy[k + 1..].iter().all(|&x| x >= got));
    }
}
