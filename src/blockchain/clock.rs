use chrono::Utc;

use super::ChainConfig;

/// Source of the current wall-clock time in Unix seconds.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> i64;
}

/// Reads the system clock (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Always reports the same instant. Used to pin the chain head.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// Block index live at `epoch_secs`; `0` before genesis.
pub fn index_at_time(cfg: &ChainConfig, epoch_secs: i64) -> u64 {
    if epoch_secs < cfg.genesis_timestamp {
        return 0;
    }
    let delta = i128::from(epoch_secs) - i128::from(cfg.genesis_timestamp);
    let idx = delta / i128::from(cfg.block_interval_secs) + 1;
    u64::try_from(idx).unwrap_or(u64::MAX)
}

/// Timestamp of block `index` (`index >= 1`). Index 0 maps to genesis.
pub fn time_for_index(cfg: &ChainConfig, index: u64) -> i64 {
    let offset = i128::from(index.saturating_sub(1)) * i128::from(cfg.block_interval_secs);
    let ts = i128::from(cfg.genesis_timestamp) + offset;
    i64::try_from(ts).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_751_414_400;

    fn cfg() -> ChainConfig {
        ChainConfig::default()
    }

    #[test]
    fn genesis_boundaries() {
        let cfg = cfg();
        assert_eq!(index_at_time(&cfg, T0), 1);
        assert_eq!(index_at_time(&cfg, T0 - 1), 0);
        assert_eq!(index_at_time(&cfg, T0 + 14), 1);
        assert_eq!(index_at_time(&cfg, T0 + 15), 2);
        assert_eq!(index_at_time(&cfg, i64::MIN), 0);
    }

    #[test]
    fn same_interval_same_index() {
        let cfg = cfg();
        for base in [T0, T0 + 15 * 1_000, T0 + 15 * 777_777] {
            let first = index_at_time(&cfg, base);
            for t in base..base + 15 {
                assert_eq!(index_at_time(&cfg, t), first);
            }
        }
    }

    #[test]
    fn round_trip_is_stable() {
        let cfg = cfg();
        for index in [1u64, 2, 3, 17_281, 506_241, 10_000_000] {
            let ts = time_for_index(&cfg, index);
            assert_eq!(index_at_time(&cfg, ts), index);
            assert_eq!(time_for_index(&cfg, index_at_time(&cfg, ts)), ts);
        }
    }

    #[test]
    fn seeded_dates_line_up() {
        let cfg = cfg();
        // 2025-07-05T00:00:00Z
        assert_eq!(time_for_index(&cfg, 17_281), 1_751_673_600);
        assert_eq!(time_for_index(&cfg, 1), T0);
    }

    #[test]
    fn monotonic_over_time() {
        let cfg = cfg();
        let mut last = 0;
        for t in (T0 - 100..T0 + 1_000).step_by(7) {
            let idx = index_at_time(&cfg, t);
            assert!(idx >= last);
            last = idx;
        }
    }

    #[test]
    fn fixed_clock_reports_its_instant() {
        assert_eq!(FixedClock(T0).now_secs(), T0);
        assert!(SystemClock.now_secs() > T0);
    }
}
