use crate::domain::model::DelayRange;
use crate::domain::ports::Pacer;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Production pacer: draws uniformly from the closed millisecond interval of
/// the range and suspends on the tokio timer. Seedable for tests.
pub struct RandomPacer {
    rng: StdRng,
}

impl RandomPacer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPacer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    fn draw(&mut self, range: &DelayRange) -> Duration {
        let min_ms = range.min().as_millis() as u64;
        let max_ms = range.max().as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(min_ms..=max_ms))
    }

    async fn pause(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_stays_inside_closed_interval() {
        let mut pacer = RandomPacer::seeded(42);
        let range = DelayRange::from_secs(15, 35).unwrap();

        for _ in 0..1000 {
            let delay = pacer.draw(&range);
            assert!(delay >= range.min());
            assert!(delay <= range.max());
        }
    }

    #[test]
    fn test_draw_with_equal_bounds_is_that_value() {
        let mut pacer = RandomPacer::seeded(7);
        let range = DelayRange::from_secs(20, 20).unwrap();

        for _ in 0..100 {
            assert_eq!(pacer.draw(&range), Duration::from_secs(20));
        }
    }

    #[test]
    fn test_draw_covers_both_endpoints() {
        let mut pacer = RandomPacer::seeded(1);
        let range = DelayRange::new(Duration::from_millis(0), Duration::from_millis(1)).unwrap();

        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..1000 {
            match pacer.draw(&range).as_millis() {
                0 => saw_min = true,
                1 => saw_max = true,
                other => panic!("draw outside interval: {}ms", other),
            }
        }

        assert!(saw_min);
        assert!(saw_max);
    }
}
