//! Hand gesture recognition from hand landmarks.
//!
//! `handsign` consumes the 21-point hand skeletons produced by hand landmark networks (like the
//! MediaPipe hand landmark model) and maps each of them to a [`Gesture`] label using an ordered
//! list of rules.
//!
//! Capturing frames, running the landmark network and drawing the result are left to the caller.
//!
//! # Coordinates
//!
//! Landmark coordinates are expected to be *normalized image coordinates*: X and Y are in range
//! 0.0 to 1.0, X points to the right, and Y points *down*. Z is a relative depth estimate and is
//! not used by any of the built-in rules.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log filter installed by [`init_logger!`].
//!
//! [`Gesture`]: gesture::Gesture

pub mod config;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod hand;
pub mod landmark;
pub mod record;
pub mod termination;
pub mod timer;

use log::LevelFilter;

pub use error::Error;
pub use handsign_macros::main;
pub use termination::run;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = crate_log_level();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Level used for the calling crate and handsign itself: *trace* in debug builds, *debug*
/// otherwise.
fn crate_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    }
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and handsign will log at *trace*
/// level. Otherwise, they will log at *debug* level. Everything else logs at *info* level.
///
/// The `RUST_LOG` environment variable can be used to override these defaults.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        };
        assert_eq!(crate_log_level(), expected);
        assert!(crate_log_level() >= LevelFilter::Debug);
    }

    #[test]
    fn init_logger_twice() {
        init_logger!();
        init_logger!();
        log::debug!("logger initialized");
    }
}
