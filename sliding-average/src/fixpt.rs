// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::int::SlidingInt;

/// Number of fractional bits.
pub const SHIFT: u32 = 6;

/// Fixed point value with [SHIFT] fractional bits stored in a `T`.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
    derive_more::SubAssign,
)]
pub struct Fixpt<T>(T);

impl<T: SlidingInt> Fixpt<T> {
    pub const fn zero() -> Self {
        Self(T::ZERO)
    }

    /// The caller must keep `int` below [SlidingInt::SAMPLE_LIMIT].
    #[inline(always)]
    pub fn from_int(int: T) -> Self {
        Self(int * T::FIXPT_SCALE)
    }

    #[inline(always)]
    pub fn to_q(self) -> T {
        self.0
    }

    /// Round to nearest integer.
    ///
    /// The division truncates towards zero, so negative values
    /// with a remainder of exactly one half round towards zero.
    #[inline(always)]
    pub fn to_int(self) -> T {
        (self.0 + T::FIXPT_HALF) / T::FIXPT_SCALE
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Truncating division by a nonzero sample count.
    #[inline(always)]
    pub fn div_count(self, count: u32) -> Self {
        Self(self.0 / T::from_count(count))
    }
}


// vim: ts=4 sw=4 expandtab
