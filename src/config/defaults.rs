// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Timing**: Analysis delay, step reveal offsets, drop settle window
//! - **Interaction log**: Ring buffer capacity
//! - **Logging**: Default log level

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default length of the simulated analysis, in milliseconds.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 4000;

/// Longest analysis delay a config file may request, in milliseconds.
pub const MAX_ANALYSIS_DELAY_MS: u64 = 60_000;

/// Default reveal offsets of the four analysis steps, in milliseconds.
pub const DEFAULT_STEP_OFFSETS_MS: [u64; 4] = [0, 1500, 3000, 4500];

/// Default window during which natively dropped files are grouped into
/// one offer, in milliseconds.
pub const DEFAULT_DROP_SETTLE_MS: u64 = 150;

/// Longest drop settle window, in milliseconds.
pub const MAX_DROP_SETTLE_MS: u64 = 2000;

/// Tick period used while something on screen animates or waits.
pub const ANIMATION_TICK_MS: u64 = 50;

// ==========================================================================
// Interaction Log Defaults
// ==========================================================================

/// Number of interaction events kept in memory.
pub const DEFAULT_INTERACTION_LOG_CAPACITY: usize = 256;

/// Minimum interaction log capacity.
pub const MIN_INTERACTION_LOG_CAPACITY: usize = 16;

/// Maximum interaction log capacity.
pub const MAX_INTERACTION_LOG_CAPACITY: usize = 10_000;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default `tracing` level when neither config nor `RUST_LOG` set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================================================
// Media Defaults
// ==========================================================================

/// Directory name (below the data dir) holding the episode media.
pub const DEFAULT_MEDIA_DIR_NAME: &str = "sample-videos";

/// Offset into each episode used for its poster frame, in seconds.
pub const POSTER_FRAME_OFFSET_SECS: f64 = 0.1;

const _: () = {
    assert!(DEFAULT_ANALYSIS_DELAY_MS <= MAX_ANALYSIS_DELAY_MS);
    assert!(DEFAULT_DROP_SETTLE_MS <= MAX_DROP_SETTLE_MS);
    assert!(DEFAULT_INTERACTION_LOG_CAPACITY >= MIN_INTERACTION_LOG_CAPACITY);
    assert!(DEFAULT_INTERACTION_LOG_CAPACITY <= MAX_INTERACTION_LOG_CAPACITY);
};
