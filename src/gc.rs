use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::GcPolicy;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Snapshot of garbage-volume history for one range, as kept by the GC
/// scheduler. Read-only here: estimates are computed, never written back.
///
/// `byte_counts` is a histogram with a fixed number of buckets, each
/// `ttl_seconds / byte_counts.len()` wide. `byte_counts[i]` is the non-live
/// volume that becomes reclaimable once `len - i` buckets have elapsed
/// since the last pass:
///
/// ```text
///  elapsed buckets:   10    9    8   ...   2    1
///  byte_counts:     [ b0 , b1 , b2 , ... , b8 , b9 ]
///                     ^ whole TTL window        ^ first bucket
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcMetadata {
    pub last_gc_nanos: i64,
    pub ttl_seconds: i32,
    pub byte_counts: Vec<i64>,
}

impl GcMetadata {
    pub fn new(last_gc_nanos: i64, ttl_seconds: i32, byte_counts: Vec<i64>) -> Self {
        GcMetadata {
            last_gc_nanos,
            ttl_seconds,
            byte_counts,
        }
    }

    /// Estimated reclaimable bytes at `now_nanos` under the default policy.
    pub fn estimated_bytes(&self, now_nanos: i64, current_non_live_bytes: i64) -> i64 {
        self.estimated_bytes_with(now_nanos, current_non_live_bytes, &GcPolicy::default())
    }

    /// Estimated reclaimable bytes at `now_nanos`.
    ///
    /// The histogram bucket for the number of fully elapsed buckets gives the
    /// base. Past one TTL, data that is non-live now but not in the histogram
    /// has also started to age out; `(elapsed - ttl) / elapsed` of it is
    /// added, scaled by `policy.non_live_weight`. That share is 0 at one TTL,
    /// 90% at ten.
    ///
    /// Total: an empty histogram, a non-positive TTL or `now` at or before
    /// the last pass all estimate 0 bytes.
    ///
    /// `policy` must already be validated (see [`GcPolicy::validate`]);
    /// debug builds assert it.
    pub fn estimated_bytes_with(
        &self,
        now_nanos: i64,
        current_non_live_bytes: i64,
        policy: &GcPolicy,
    ) -> i64 {
        debug_assert!(
            policy.validate().is_ok(),
            "unvalidated gc policy: {policy:?}"
        );
        let buckets = self.byte_counts.len();
        let elapsed = now_nanos.saturating_sub(self.last_gc_nanos);
        if buckets == 0 || self.ttl_seconds <= 0 || elapsed <= 0 {
            return 0;
        }

        let ttl_nanos = i64::from(self.ttl_seconds) * NANOS_PER_SECOND;
        let bucket_nanos = (ttl_nanos / buckets as i64).max(1);
        let expired = (elapsed / bucket_nanos).min(buckets as i64) as usize;

        let mut estimate = match expired {
            0 => 0,
            n => self.byte_counts[buckets - n],
        };

        if elapsed > ttl_nanos {
            let ratio = elapsed as f64 / ttl_nanos as f64;
            let fraction = (ratio - 1.0) / ratio;
            let unaccounted = current_non_live_bytes.saturating_sub(self.byte_counts[0]);
            estimate = estimate
                .saturating_add((unaccounted as f64 * fraction * policy.non_live_weight) as i64);
        }

        trace!(
            elapsed_nanos = elapsed,
            expired_buckets = expired,
            estimate,
            "estimated gc bytes"
        );
        estimate
    }
}
