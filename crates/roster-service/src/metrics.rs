//! Prometheus metrics for the user listing pipeline.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names for the user listing.
pub mod names {
    /// Listing requests answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "roster_user_list_cache_hits_total";
    /// Listing requests that found no cached entry.
    pub const CACHE_MISSES_TOTAL: &str = "roster_user_list_cache_misses_total";
    /// Cache reads or writes that failed and were skipped.
    pub const CACHE_ERRORS_TOTAL: &str = "roster_user_list_cache_errors_total";
    /// Reads issued against user storage.
    pub const STORE_READS_TOTAL: &str = "roster_user_list_store_reads_total";
    /// Storage read duration in seconds.
    pub const STORE_READ_SECONDS: &str = "roster_user_list_store_read_seconds";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Number of user listings served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Number of user listings that missed the cache"
    );
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Number of cache operations that failed during listing"
    );
    describe_counter!(
        names::STORE_READS_TOTAL,
        "Number of user storage reads"
    );
    describe_histogram!(
        names::STORE_READ_SECONDS,
        "User storage read duration in seconds"
    );
}

/// User listing metrics recorder.
#[derive(Clone, Copy, Debug)]
pub struct ListingMetrics;

impl ListingMetrics {
    /// Record a cache hit.
    pub fn cache_hit() {
        counter!(names::CACHE_HITS_TOTAL).increment(1);
    }

    /// Record a cache miss.
    pub fn cache_miss() {
        counter!(names::CACHE_MISSES_TOTAL).increment(1);
    }

    /// Record a failed cache operation.
    pub fn cache_error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a storage read and how long it took.
    pub fn store_read(duration: Duration, success: bool) {
        let outcome = if success { "success" } else { "error" };
        counter!(names::STORE_READS_TOTAL, "outcome" => outcome).increment(1);
        histogram!(names::STORE_READ_SECONDS, "outcome" => outcome).record(duration.as_secs_f64());
    }
}
