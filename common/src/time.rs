//! Time utilities and constants for ratewatch.

use chrono::{DateTime, Local, Utc};

/// Timing constants.
pub mod constants {
    use std::time::Duration;

    /// Interval between scheduled rate refreshes (5 minutes).
    pub const RATE_REFRESH_INTERVAL: Duration = Duration::from_millis(300_000);

    /// Timeout for a single rate request.
    pub const RATE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}

/// A timestamp (always UTC internally).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp in the local timezone for display.
pub fn display_local(timestamp: Timestamp) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
