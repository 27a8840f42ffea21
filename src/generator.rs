//! Seeded random instance generation.
//!
//! Produces synthetic workloads for policy sweeps. Windows start in the
//! first half of the horizon and stay inside it.
//!
//! # Distributions (defaults)
//!
//! | Field | Draw |
//! |-------|------|
//! | release `r` | U[1, max(1, T/2)] |
//! | processing `p` | U[1, 5] |
//! | deadline `d` | min(T, r + U[5, 15]) |
//! | reward `w` | U[1, 100] |
//! | penalty `l` | U[5, 50] |

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ScheduleError;
use crate::models::{Instance, Job, JobId};

/// Value ranges used by [`InstanceGenerator`]. All bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRanges {
    /// Processing time.
    pub processing: RangeInclusive<u32>,
    /// Window length beyond the release slot, before clipping to the horizon.
    pub deadline_offset: RangeInclusive<u32>,
    /// Completion reward.
    pub reward: RangeInclusive<i64>,
    /// Miss penalty.
    pub penalty: RangeInclusive<i64>,
}

impl Default for GeneratorRanges {
    fn default() -> Self {
        Self {
            processing: 1..=5,
            deadline_offset: 5..=15,
            reward: 1..=100,
            penalty: 5..=50,
        }
    }
}

/// Random instance generator.
///
/// # Example
/// ```
/// use u_deadline::generator::InstanceGenerator;
///
/// let generator = InstanceGenerator::new(50);
/// let a = generator.generate_seeded(20, 7).unwrap();
/// let b = generator.generate_seeded(20, 7).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.job_count(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    horizon: u32,
    ranges: GeneratorRanges,
}

impl InstanceGenerator {
    /// Creates a generator over slots `1..=horizon` with default ranges.
    pub fn new(horizon: u32) -> Self {
        Self {
            horizon,
            ranges: GeneratorRanges::default(),
        }
    }

    /// Replaces the value ranges.
    pub fn with_ranges(mut self, ranges: GeneratorRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// The horizon of generated instances.
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Generates `n` jobs with ids `1..=n` from the given RNG.
    ///
    /// Fails for a zero horizon, for empty ranges, and for ranges that
    /// produce invalid jobs (e.g. a processing time of 0).
    pub fn generate<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Instance, ScheduleError> {
        if self.horizon == 0 {
            return Err(ScheduleError::Config("generator horizon must be at least 1".into()));
        }
        self.check_ranges()?;

        let release_max = (self.horizon / 2).max(1);
        let jobs: Vec<Job> = (1..=n)
            .map(|i| {
                let r = rng.random_range(1..=release_max);
                let p = rng.random_range(self.ranges.processing.clone());
                let d = self
                    .horizon
                    .min(r + rng.random_range(self.ranges.deadline_offset.clone()));
                let w = rng.random_range(self.ranges.reward.clone());
                let l = rng.random_range(self.ranges.penalty.clone());
                Job::new(i as JobId, p, r, d).with_reward(w).with_penalty(l)
            })
            .collect();

        Instance::new(format!("random-n{}-t{}", n, self.horizon), jobs, self.horizon)
    }

    /// Generates `n` jobs from a `SmallRng` seeded with `seed`.
    pub fn generate_seeded(&self, n: usize, seed: u64) -> Result<Instance, ScheduleError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.generate(n, &mut rng)
    }

    fn check_ranges(&self) -> Result<(), ScheduleError> {
        let r = &self.ranges;
        let empty = [
            ("processing", r.processing.is_empty()),
            ("deadline_offset", r.deadline_offset.is_empty()),
            ("reward", r.reward.is_empty()),
            ("penalty", r.penalty.is_empty()),
        ];
        match empty.iter().find(|(_, is_empty)| *is_empty) {
            Some((name, _)) => Err(ScheduleError::Config(format!(
                "generator range `{name}` is empty"
            ))),
            None => Ok(()),
        }
    }
}
