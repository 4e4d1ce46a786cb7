//! Hand gesture visualization library.
//!
//! `fingerpaint` classifies static finger gestures from MediaPipe-style hand
//! landmarks, one frame at a time, and maintains an "ink trail" of fingertip
//! positions that is drawn while the [`Pointer`] gesture is held and cleared
//! after two seconds of inactivity.
//!
//! The crate only implements the per-frame logic. Video capture, the landmark
//! estimator, and the display surface are pluggable collaborators, expressed
//! as the [`FrameSource`], [`HandDetector`] and [`Display`] traits in the
//! [`visualizer`] module. Scripted implementations of all three live in the
//! demo binary and the integration tests, so the whole loop runs without any
//! camera hardware.
//!
//! # Coordinates
//!
//! Landmark positions are normalized to `[0, 1]` in both axes, with Y growing
//! *downwards* (image convention). Overlay and trail positions are in pixels
//! of the source [`Resolution`].
//!
//! [`Pointer`]: hand::gesture::Gesture::Pointer
//! [`FrameSource`]: visualizer::FrameSource
//! [`HandDetector`]: visualizer::HandDetector
//! [`Display`]: visualizer::Display
//! [`Resolution`]: resolution::Resolution

use log::LevelFilter;

pub mod filter;
pub mod hand;
pub mod overlay;
pub mod resolution;
pub mod timer;
pub mod trail;
pub mod visualizer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and `fingerpaint` will log at *debug* level; everything
/// else follows `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
