use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Politeness pause between requests.
pub trait RateLimiter {
    fn wait(&mut self);
}

/// Sleeps for a fresh uniformly random duration on every call.
pub struct RandomDelay {
    secs: RangeInclusive<f64>,
}

impl RandomDelay {
    pub fn new(secs: RangeInclusive<f64>) -> Self {
        RandomDelay { secs }
    }

    fn next_delay(&self) -> Duration {
        let (lo, hi) = (*self.secs.start(), *self.secs.end());
        if hi <= lo {
            return Duration::from_secs_f64(lo.max(0.0));
        }
        Duration::from_secs_f64(rand::thread_rng().gen_range(lo..=hi))
    }
}

impl RateLimiter for RandomDelay {
    fn wait(&mut self) {
        let delay = self.next_delay();
        debug!("Sleeping {:.2}s", delay.as_secs_f64());
        thread::sleep(delay);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_stays_in_range() {
        let limiter = RandomDelay::new(1.0..=3.0);
        for _ in 0..200 {
            let d = limiter.next_delay().as_secs_f64();
            assert!((1.0..=3.0).contains(&d), "{d} out of range");
        }
    }

    #[test]
    fn degenerate_range_is_fixed() {
        let limiter = RandomDelay::new(0.0..=0.0);
        assert_eq!(limiter.next_delay(), Duration::ZERO);
    }
}
