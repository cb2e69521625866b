// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer only exponential moving average.
//!
//! [SlidingAverage] tracks a smoothed mean and a smoothed mean absolute
//! deviation of a stream of integer samples. Both are kept as fixed point
//! values with a resolution of 1/64 and are rounded to integers on read.

#![no_std]

pub use crate::int::SlidingInt;
use crate::fixpt::Fixpt;

mod fixpt;
mod int;

/// Exponential moving average accumulator.
///
/// `INVERTED_GAIN` is the steady state window length in samples.
/// Until that many samples have been added, every sample gets the
/// weight `1 / num_samples`, which makes the accumulator a plain
/// cumulative average during warm-up.
///
/// ```
/// use sliding_average::SlidingAverage;
///
/// let mut rtt = SlidingAverage::<i32, 20>::new();
/// rtt.add_sample(100);
/// rtt.add_sample(120);
/// assert_eq!(rtt.mean(), 110);
/// assert_eq!(rtt.avg_deviation(), 20);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SlidingAverage<T, const INVERTED_GAIN: u32> {
    mean: Fixpt<T>,
    deviation: Fixpt<T>,
    // Saturates at INVERTED_GAIN.
    num_samples: u32,
}

impl<T: SlidingInt, const INVERTED_GAIN: u32> SlidingAverage<T, INVERTED_GAIN> {
    pub const fn new() -> Self {
        const {
            assert!(INVERTED_GAIN > 0, "inverted gain must be positive");
            assert!(
                INVERTED_GAIN <= T::MAX_GAIN,
                "inverted gain does not fit the integer type"
            );
        }
        Self {
            mean: Fixpt::zero(),
            deviation: Fixpt::zero(),
            num_samples: 0,
        }
    }

    pub const fn inverted_gain(&self) -> u32 {
        INVERTED_GAIN
    }

    /// Add one sample.
    ///
    /// `sample` must be less than [SlidingInt::SAMPLE_LIMIT].
    /// This is only checked in debug builds.
    pub fn add_sample(&mut self, sample: T) {
        debug_assert!(
            sample < T::SAMPLE_LIMIT,
            "sample {sample:?} exceeds the fixed point range"
        );
        let sample = Fixpt::from_int(sample);

        // Distance to the mean before this sample is accounted for.
        let deviation = if self.num_samples > 0 {
            (self.mean - sample).abs()
        } else {
            Fixpt::zero()
        };

        if self.num_samples < INVERTED_GAIN {
            self.num_samples += 1;
        }

        self.mean += (sample - self.mean).div_count(self.num_samples);

        // A deviation sample needs two value samples,
        // so its window lags behind by one.
        if self.num_samples > 1 {
            self.deviation += (deviation - self.deviation).div_count(self.num_samples - 1);
        }
    }

    pub fn mean(&self) -> T {
        if self.num_samples > 0 {
            self.mean.to_int()
        } else {
            T::ZERO
        }
    }

    pub fn avg_deviation(&self) -> T {
        if self.num_samples > 1 {
            self.deviation.to_int()
        } else {
            T::ZERO
        }
    }

    /// Raw mean in units of 1/64.
    pub fn mean_fixpt(&self) -> T {
        self.mean.to_q()
    }

    /// Raw average deviation in units of 1/64.
    pub fn avg_deviation_fixpt(&self) -> T {
        self.deviation.to_q()
    }

    pub const fn num_samples(&self) -> u32 {
        self.num_samples
    }
}

impl<T: SlidingInt, const INVERTED_GAIN: u32> Default for SlidingAverage<T, INVERTED_GAIN> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn feed<T: SlidingInt, const G: u32>(avg: &mut SlidingAverage<T, G>, samples: &[T]) {
        for s in samples {
            avg.add_sample(*s);
        }
    }

    #[test]
    fn test_cold_start() {
        let a = SlidingAverage::<i32, 5>::new();
        assert_eq!(a.num_samples(), 0);
        assert_eq!(a.mean(), 0);
        assert_eq!(a.avg_deviation(), 0);
        assert_eq!(a.mean_fixpt(), 0);
        assert_eq!(a.avg_deviation_fixpt(), 0);
        assert_eq!(a.inverted_gain(), 5);
        assert_eq!(a, SlidingAverage::default());
    }

    #[test]
    fn test_single_sample() {
        let mut a = SlidingAverage::<i32, 5>::new();
        a.add_sample(10);
        assert_eq!(a.num_samples(), 1);
        assert_eq!(a.mean(), 10);
        assert_eq!(a.mean_fixpt(), 640);
        assert_eq!(a.avg_deviation(), 0);
        assert_eq!(a.avg_deviation_fixpt(), 0);
    }

    #[test]
    fn test_ramp_up() {
        let mut a = SlidingAverage::<i32, 5>::new();

        a.add_sample(10);
        assert_eq!(a.mean(), 10);

        a.add_sample(20);
        assert_eq!(a.mean_fixpt(), 960);
        assert_eq!(a.mean(), 15);
        assert_eq!(a.avg_deviation_fixpt(), 640);
        assert_eq!(a.avg_deviation(), 10);

        a.add_sample(30);
        assert_eq!(a.mean_fixpt(), 1280);
        assert_eq!(a.mean(), 20);
        // 640 + (960 - 640) / 2
        assert_eq!(a.avg_deviation_fixpt(), 800);
        assert_eq!(a.avg_deviation(), 13);
        assert_eq!(a.num_samples(), 3);
    }

    #[test]
    fn test_steady_state() {
        let mut a = SlidingAverage::<i32, 2>::new();
        feed(&mut a, &[0, 0]);
        assert_eq!(a.num_samples(), 2);
        assert_eq!(a.mean_fixpt(), 0);

        // Fixed gain 1/2 from now on.
        a.add_sample(64);
        assert_eq!(a.mean_fixpt(), 2048);
        assert_eq!(a.avg_deviation_fixpt(), 4096);
        a.add_sample(64);
        assert_eq!(a.mean_fixpt(), 3072);
        assert_eq!(a.avg_deviation_fixpt(), 2048);
        assert_eq!(a.num_samples(), 2);
    }

    #[test]
    fn test_truncation() {
        let mut a = SlidingAverage::<i32, 4>::new();
        feed(&mut a, &[0, 1]);
        assert_eq!(a.mean_fixpt(), 32);
        assert_eq!(a.mean(), 1);
        assert_eq!(a.avg_deviation_fixpt(), 64);

        a.add_sample(0);
        // 32 + (-32 / 3), truncated towards zero
        assert_eq!(a.mean_fixpt(), 22);
        assert_eq!(a.mean(), 0);
        // 64 + (32 - 64) / 2
        assert_eq!(a.avg_deviation_fixpt(), 48);
        assert_eq!(a.avg_deviation(), 1);
    }

    #[test]
    fn test_saturation() {
        let mut a = SlidingAverage::<i64, 3>::new();
        let mut prev = a.num_samples();
        for i in 0..100 {
            a.add_sample(i * 7 % 13);
            let n = a.num_samples();
            assert!(n >= prev);
            assert!(n <= 3);
            prev = n;
        }
        assert_eq!(a.num_samples(), 3);
    }

    #[test]
    fn test_gain_one() {
        let mut a = SlidingAverage::<i32, 1>::new();
        feed(&mut a, &[5, 9, 3]);
        assert_eq!(a.num_samples(), 1);
        assert_eq!(a.mean(), 3);
        assert_eq!(a.avg_deviation(), 0);
        assert_eq!(a.avg_deviation_fixpt(), 0);
    }

    #[test]
    fn test_deviation_lag() {
        let mut a = SlidingAverage::<i32, 8>::new();
        a.add_sample(1000);
        assert_eq!(a.avg_deviation(), 0);
        a.add_sample(1001);
        assert_eq!(a.avg_deviation(), 1);
    }

    #[test]
    fn test_constant_input() {
        let mut a = SlidingAverage::<i16, 16>::new();
        for _ in 0..40 {
            a.add_sample(42);
        }
        assert_eq!(a.mean(), 42);
        assert_eq!(a.avg_deviation(), 0);
        assert_eq!(a.num_samples(), 16);
    }

    #[test]
    fn test_negative_rounding() {
        let mut a = SlidingAverage::<i16, 16>::new();
        for _ in 0..40 {
            a.add_sample(-42);
        }
        assert_eq!(a.mean_fixpt(), -42 * 64);
        // (-2688 + 32) / 64 truncates towards zero.
        assert_eq!(a.mean(), -41);
    }

    #[test]
    fn test_round_half_up() {
        let mut a = SlidingAverage::<i32, 8>::new();
        feed(&mut a, &[1, 2]);
        assert_eq!(a.mean_fixpt(), 96);
        assert_eq!(a.mean(), 2);

        let mut a = SlidingAverage::<i32, 8>::new();
        feed(&mut a, &[-1, -2]);
        assert_eq!(a.mean_fixpt(), -96);
        assert_eq!(a.mean(), -1);
    }

    #[test]
    fn test_deterministic() {
        let samples = [12_i64, -7, 300, 299, 5, 0, 0, 81, -1000, 44];
        let mut a = SlidingAverage::<i64, 6>::new();
        let mut b = SlidingAverage::<i64, 6>::new();
        feed(&mut a, &samples);
        feed(&mut b, &samples);
        assert_eq!(a, b);
        assert_eq!(a.mean(), b.mean());
        assert_eq!(a.avg_deviation(), b.avg_deviation());
    }

    #[test]
    fn test_widths() {
        let mut a = SlidingAverage::<i8, 4>::new();
        feed(&mut a, &[0, -1, 0]);
        assert_eq!(a.mean_fixpt(), -22);
        assert_eq!(a.mean(), 0);

        let mut a = SlidingAverage::<i128, 20>::new();
        feed(&mut a, &[1 << 100, 1 << 100]);
        assert_eq!(a.mean(), 1 << 100);
        assert_eq!(a.avg_deviation(), 0);

        let mut a = SlidingAverage::<isize, 20>::new();
        feed(&mut a, &[3, 5]);
        assert_eq!(a.mean(), 4);
        assert_eq!(a.avg_deviation(), 2);
    }

    #[test]
    fn test_sample_limit_ok() {
        let mut a = SlidingAverage::<i16, 4>::new();
        a.add_sample(i16::SAMPLE_LIMIT - 1);
        assert_eq!(a.mean(), 510);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceeds the fixed point range")]
    fn test_sample_limit_violation() {
        let mut a = SlidingAverage::<i32, 4>::new();
        a.add_sample(i32::MAX / 64);
    }
}

// vim: ts=4 sw=4 expandtab
