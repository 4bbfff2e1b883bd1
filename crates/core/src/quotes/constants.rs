//! Quote cache constants.

/// Minimum time that must elapse since the most recent successful cache
/// write before another provider fetch may be attempted.
pub const COOLDOWN_WINDOW_SECS: i64 = 60;
