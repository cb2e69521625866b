// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::{
    fmt::Debug,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

/// Signed integer that can back a [SlidingAverage](crate::SlidingAverage).
pub trait SlidingInt:
    Copy
    + Ord
    + Debug
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;

    /// Fixed point scale factor (1.0).
    const FIXPT_SCALE: Self;

    /// Half of [Self::FIXPT_SCALE] (0.5).
    const FIXPT_HALF: Self;

    /// All samples must be strictly less than this.
    const SAMPLE_LIMIT: Self;

    /// Largest sample count that converts into `Self` without loss.
    const MAX_GAIN: u32;

    /// Convert a sample count. `count` is never larger than [Self::MAX_GAIN].
    fn from_count(count: u32) -> Self;

    fn abs(self) -> Self;
}

macro_rules! impl_sliding_int {
    ($($t:ty),*) => {
        $(
            impl SlidingInt for $t {
                const ZERO: Self = 0;
                const FIXPT_SCALE: Self = 1 << crate::fixpt::SHIFT;
                const FIXPT_HALF: Self = 1 << (crate::fixpt::SHIFT - 1);
                const SAMPLE_LIMIT: Self = <$t>::MAX / Self::FIXPT_SCALE;
                const MAX_GAIN: u32 = if (<$t>::MAX as u128) < (u32::MAX as u128) {
                    <$t>::MAX as u32
                } else {
                    u32::MAX
                };

                #[inline(always)]
                fn from_count(count: u32) -> Self {
                    count as Self
                }

                #[inline(always)]
                fn abs(self) -> Self {
                    <$t>::abs(self)
                }
            }
        )*
    };
}

impl_sliding_int!(i8, i16, i32, i64, i128, isize);


// vim: ts=4 sw=4 expandtab
