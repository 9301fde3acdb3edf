//! Randomized pacing between consecutive live fetches.
//!
//! Keeps the request rhythm irregular and gentle on the source site.

use rand::Rng;
use std::time::Duration;

/// Bounds of the inter-fetch pause, in milliseconds.
const FETCH_PAUSE_MIN_MS: u64 = 1_000;
const FETCH_PAUSE_MAX_MS: u64 = 3_000;

/// Random delay between `min_ms` and `max_ms`, inclusive.
pub fn random_delay(min_ms: u64, max_ms: u64) -> Duration {
    let mut rng = rand::thread_rng();
    let ms = rng.gen_range(min_ms..=max_ms);
    Duration::from_millis(ms)
}

/// Pause applied between successful live fetches (1-3s).
pub fn fetch_pause() -> Duration {
    random_delay(FETCH_PAUSE_MIN_MS, FETCH_PAUSE_MAX_MS)
}

/// Sleep for a random inter-fetch pause.
pub async fn sleep_fetch_pause() {
    tokio::time::sleep(fetch_pause()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_pause_stays_in_bounds() {
        for _ in 0..50 {
            let pause = fetch_pause();
            assert!(pause >= Duration::from_millis(FETCH_PAUSE_MIN_MS));
            assert!(pause <= Duration::from_millis(FETCH_PAUSE_MAX_MS));
        }
    }
}
