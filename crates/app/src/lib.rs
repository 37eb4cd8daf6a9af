//! Milight bridge macros
//!
//! The crate turns high level lighting intents into timed sequences of bridge commands.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::{
    fmt::Display,
    net::SocketAddr,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

pub use milight_core as core;
pub use milight_core::{Error as MilightError, Result as MilightResult};
use milight_core::{
    ease::EaseKind,
    proto::types::{Group, Percent, Rgb},
    time::Delay,
};
use milight_network::DEFAULT_BRIDGE_ADDRESS;

pub use crate::{animation::AnimationPlan, app::App};

mod animation;
mod app;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Minimal pause between two consecutive commands, the bridge drops commands sent faster.
pub const DEFAULT_COMMAND_DELAY: Duration = Duration::from_millis(100);
/// Default white sunrise duration.
pub const DEFAULT_SUNRISE_DURATION: Duration = Duration::from_secs(5 * 60);
/// White sunrise duration in the debug mode.
pub const DEBUG_SUNRISE_DURATION: Duration = Duration::from_secs(10);
/// Default white sunrise easing curve.
pub const DEFAULT_SUNRISE_EASE: EaseKind = EaseKind::Sin;

/// A global application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// Bridge socket address.
    pub bridge_address: SocketAddr,
    /// Group used by macros invoked without an explicit group.
    pub default_group: Group,
    /// Pause between two consecutive commands.
    pub command_delay: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            bridge_address: DEFAULT_BRIDGE_ADDRESS,
            default_group: Group::All,
            command_delay: DEFAULT_COMMAND_DELAY,
        }
    }
}

/// Torch wind strength, the stronger wind makes flame flicker faster.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct WindStrength(f32);

impl WindStrength {
    /// Creates a new wind strength, it must be a positive finite number.
    pub fn new(value: f32) -> MilightResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(MilightError::OutOfRange)
        }
    }

    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for WindStrength {
    fn default() -> Self {
        Self(5.0)
    }
}

impl FromStr for WindStrength {
    type Err = MilightError;

    fn from_str(s: &str) -> MilightResult<Self> {
        let value = f32::from_str(s.trim()).map_err(MilightError::invalid_parameter)?;
        Self::new(value)
    }
}

impl Display for WindStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lighting macro with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Macro {
    /// Switch lamps on.
    On,
    /// Switch lamps off.
    Off,
    /// Set lamps brightness.
    Brightness(Percent),
    /// Switch lamps into the white mode with an optional brightness.
    SetWhite(Option<Percent>),
    /// Show the closest color the bridge can render.
    SetColor(Rgb),
    /// Flicker like a torch until cancelled.
    Torch(WindStrength),
    /// Gradually brighten white light.
    WhiteSunrise { duration: Duration, ease: EaseKind },
    /// Start the bridge built-in color cycling.
    DiscoOn,
    /// Speed up the color cycling.
    DiscoFaster,
    /// Slow down the color cycling.
    DiscoSlower,
}

impl Macro {
    /// Checks macro parameters before any command is sent.
    pub fn validate(&self) -> MilightResult<()> {
        if let Self::WhiteSunrise { ease, .. } = self {
            ease.ensure_supported()?;
        }
        Ok(())
    }
}

/// Cooperative cancellation flag shared between a running macro and a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the running macro to stop at the next pause.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Delay provider based on the [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
