//! Per-glyph interval shaping.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the per-glyph delay is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Every glyph waits exactly the configured delay.
    #[default]
    Constant,
    /// Each wait varies between half and one and a half times the delay.
    Natural,
}

impl Pacing {
    /// Interval before the `step`th glyph of a run seeded with `seed`.
    pub fn interval(self, base: Duration, seed: u64, step: u64) -> Duration {
        match self {
            Pacing::Constant => base,
            Pacing::Natural => {
                // Cheap integer hash; only needs to look irregular.
                let mixed = step
                    .wrapping_mul(2_654_435_761)
                    .wrapping_add(seed.wrapping_mul(31))
                    .wrapping_add(7);
                let factor = 0.5 + (mixed % 1000) as f64 / 1000.0;
                base.mul_f64(factor)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_is_exact() {
        let base = Duration::from_millis(75);
        for step in 0..10 {
            assert_eq!(Pacing::Constant.interval(base, 42, step), base);
        }
    }

    #[test]
    fn test_natural_stays_in_range() {
        let base = Duration::from_millis(100);
        let intervals: Vec<Duration> = (0..50)
            .map(|step| Pacing::Natural.interval(base, 42, step))
            .collect();

        for interval in &intervals {
            assert!(*interval >= Duration::from_millis(50));
            assert!(*interval < Duration::from_millis(150));
        }
        // Not all identical.
        assert!(intervals.iter().any(|i| *i != intervals[0]));
    }

    #[test]
    fn test_natural_is_deterministic() {
        let base = Duration::from_millis(60);
        assert_eq!(
            Pacing::Natural.interval(base, 7, 3),
            Pacing::Natural.interval(base, 7, 3)
        );
    }

    #[test]
    fn test_zero_base_stays_zero() {
        assert_eq!(
            Pacing::Natural.interval(Duration::ZERO, 1, 1),
            Duration::ZERO
        );
    }
}
