//! Injectable randomness.
//!
//! Every draw the engine makes (hit rolls, damage variance, status chances,
//! sleep length, AI move choice, catch attempts) goes through [`RandomSource`]
//! so callers can swap the seeded generator for a scripted one.

use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn unit(&mut self) -> f64;

    /// Uniform integer in [lo, hi]. Returns `lo` when the range is empty.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform value in [0, 100).
    fn accuracy_roll(&mut self) -> f64 {
        self.unit() * 100.0
    }

    /// Damage variance as a whole percent in [85, 100].
    fn damage_roll(&mut self) -> u32 {
        self.range_inclusive(85, 100)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.range_inclusive(0, (len - 1) as u32) as usize
    }
}

impl RandomSource for SmallRng {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        self.gen_range(lo..=hi)
    }
}

impl RandomSource for StdRng {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        self.gen_range(lo..=hi)
    }
}

pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Replays queued values in order.
///
/// Once a queue runs dry, `unit` returns the fallback (0.0 unless changed,
/// so every roll hits and every positive chance succeeds) and
/// `range_inclusive` returns the top of the requested range.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    ranges: VecDeque<u32>,
    fallback_unit: f64,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_ranges(mut self, ranges: impl IntoIterator<Item = u32>) -> Self {
        self.ranges.extend(ranges);
        self
    }

    pub fn with_fallback_unit(mut self, unit: f64) -> Self {
        self.fallback_unit = unit.clamp(0.0, 0.999_999);
        self
    }

    pub fn push_unit(&mut self, unit: f64) {
        self.units.push_back(unit);
    }

    pub fn push_range(&mut self, value: u32) {
        self.ranges.push_back(value);
    }

    pub fn remaining_units(&self) -> usize {
        self.units.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.fallback_unit)
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        self.ranges
            .pop_front()
            .map(|value| value.clamp(lo, hi))
            .unwrap_or(hi)
    }
}
