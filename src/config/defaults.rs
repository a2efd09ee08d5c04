// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration and file locations.
//!
//! # Categories
//!
//! - **Files**: Where the mapping file and media directory live
//! - **Display**: Welcome image and inactivity timeout
//! - **Video**: Frame pacing fallback

// ==========================================================================
// File Defaults
// ==========================================================================

/// Default mapping file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default flat media directory, relative to the working directory.
pub const DEFAULT_MEDIA_DIR: &str = "data/images";

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Seconds without a new tag before the welcome image comes back.
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 30;

/// Image shown at startup, for unknown tags and after inactivity.
pub const DEFAULT_WELCOME_IMAGE: &str = "welcome.jpg";

/// Screen size assumed until the window reports its real size.
pub const FALLBACK_SCREEN_SIZE: (u32, u32) = (1920, 1080);

// ==========================================================================
// Video Defaults
// ==========================================================================

/// Frame rate used when a stream reports neither timestamps nor a rate.
pub const DEFAULT_VIDEO_FPS: f64 = 30.0;
