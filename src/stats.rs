//! Trip statistics over an ordered speed-sample sequence.
//!
//! The trim buffer discards the acceleration and deceleration tails at each
//! end of the trip so travel speed reflects cruising behavior; the adjusted
//! figure further drops low-speed mid-section samples (stops, slow traffic)
//! to approximate sustained highway-type speed.

use std::collections::HashMap;

use thiserror::Error;

/// Default minimum speed (mph) for a mid-section sample to count toward the
/// adjusted travel speed.
pub const DEFAULT_MIN_ADJUSTED_SPEED: f64 = 20.0;

/// Tunables for the statistics pass.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Mid-section samples below this speed (mph) are excluded from the
    /// adjusted travel speed.
    pub min_adjusted_speed: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            min_adjusted_speed: DEFAULT_MIN_ADJUSTED_SPEED,
        }
    }
}

/// A statistic that could not be computed from the given sample set.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("average speed undefined: file contains no speed samples")]
    NoSamples,

    #[error("travel speed undefined: {count} samples is too few for a trim buffer of {buffer}")]
    TooFewSamples { count: usize, buffer: usize },

    #[error("adjusted travel speed undefined: no mid-section sample at or above {threshold} mph")]
    NoAdjustedSamples { threshold: f64 },
}

/// Summary statistics for one trip. Immutable once built; every field is
/// derived from the same sample sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TripStats {
    pub average_speed: f64,
    pub travel_speed: f64,
    pub adjusted_travel_speed: f64,
    pub max_speed: f64,
    pub mode_speed: f64,
}

impl TripStats {
    /// Reduces an ordered sample sequence to the five summary statistics.
    ///
    /// The trim buffer is `trunc(n * 0.1) + 1` samples; the mid-section is
    /// the sequence with that many samples removed from each end, so `n`
    /// must exceed twice the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] naming the statistic that could not be
    /// computed: the sample set is empty, too small for the trim buffer, or
    /// the threshold filter leaves nothing to average.
    pub fn compute(samples: &[f64], config: &AnalysisConfig) -> Result<Self, StatsError> {
        if samples.is_empty() {
            return Err(StatsError::NoSamples);
        }

        let average_speed = samples.iter().sum::<f64>() / samples.len() as f64;
        let max_speed = samples.iter().fold(0.0_f64, |acc, s| acc.max(*s));
        let mode_speed = mode(samples);

        let buffer = (samples.len() as f64 * 0.1) as usize + 1;
        if samples.len() <= 2 * buffer {
            return Err(StatsError::TooFewSamples {
                count: samples.len(),
                buffer,
            });
        }
        let mid_section = &samples[buffer..samples.len() - buffer];

        let travel_speed = mid_section.iter().sum::<f64>() / mid_section.len() as f64;

        let adjusted: Vec<f64> = mid_section
            .iter()
            .copied()
            .filter(|s| *s >= config.min_adjusted_speed)
            .collect();
        if adjusted.is_empty() {
            return Err(StatsError::NoAdjustedSamples {
                threshold: config.min_adjusted_speed,
            });
        }
        let adjusted_travel_speed = adjusted.iter().sum::<f64>() / adjusted.len() as f64;

        Ok(TripStats {
            average_speed,
            travel_speed,
            adjusted_travel_speed,
            max_speed,
            mode_speed,
        })
    }
}

/// Most frequent truncated-toward-zero integer sample value. Ties break to
/// the smallest tied value so the result does not depend on map iteration
/// order.
fn mode(samples: &[f64]) -> f64 {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for s in samples {
        *counts.entry(*s as i64).or_default() += 1;
    }

    let mut mode_value = 0i64;
    let mut mode_count = 0usize;
    for (value, count) in counts {
        if count > mode_count || (count == mode_count && value < mode_value) {
            mode_value = value;
            mode_count = count;
        }
    }
    mode_value as f64
}
