//! Sink configuration.
//!
//! Thresholds above which a recorded measurement is logged as a warning.
//! Every field has a default, so a partial JSON document is enough.

use serde::{Deserialize, Serialize};

const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Warn when a measured mutable state exceeds this many bytes.
    pub warn_mutable_state_size_bytes: usize,

    /// Warn when a loaded state holds more buffered events than this.
    pub warn_buffered_events_count: usize,

    /// Warn when buffered events of a state or write exceed this many bytes.
    pub warn_buffered_events_size_bytes: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            warn_mutable_state_size_bytes: 16 * MIB,
            warn_buffered_events_count: 100,
            warn_buffered_events_size_bytes: 4 * MIB,
        }
    }
}
