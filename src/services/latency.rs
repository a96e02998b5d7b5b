use rand::Rng;
use std::time::Duration;

/// Simulated network latency for the mocked REST surface.
///
/// The original frontend mock paused 400-1200 ms before answering so
/// loading states could be exercised; this reproduces that behavior.
/// Disabled entirely in tests.
#[derive(Debug, Clone, Copy)]
pub struct LatencySimulator {
    enabled: bool,
    min_ms: u64,
    max_ms: u64,
}

impl LatencySimulator {
    pub fn new(enabled: bool, min_ms: u64, max_ms: u64) -> Self {
        Self {
            enabled,
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_ms: 0,
            max_ms: 0,
        }
    }

    /// Sleep for a uniformly random duration inside the configured window.
    pub async fn pause(&self) {
        if !self.enabled {
            return;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_simulator_returns_immediately() {
        let simulator = LatencySimulator::disabled();
        let start = std::time::Instant::now();
        simulator.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_window_is_normalized() {
        // min > max gets swapped instead of panicking in gen_range
        let simulator = LatencySimulator::new(true, 2, 1);
        simulator.pause().await;
    }
}
