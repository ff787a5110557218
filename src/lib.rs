//! # hairzone
//!
//! Scroll, reveal and booking controller for the Hair Zone Lilleng landing page.
//!
//! The controller is a host-driven state machine: the page binding
//! (`hairzone_web`) pushes browser events in and applies the DOM commands that
//! come back. Nothing here touches the DOM, so every timing rule can be tested
//! on the host.
//!
//! ```
//! use hairzone::prelude::*;
//!
//! let mut controller = Controller::default();
//! let wiring = controller
//!     .bootstrap(&PageInventory::complete(4, 3, 2))
//!     .expect("root container present");
//! assert!(wiring.contains(&Command::ListenScroll));
//!
//! // Scroll samples are debounced; the host runs the returned timer.
//! let cmds = controller.handle(Event::Scroll { offset: 420.0 });
//! assert!(matches!(cmds.last(), Some(Command::ScheduleTimer { delay_ms: 10, .. })));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): JSON configuration overrides via [`config::ControllerConfig::from_json`]
//!
//! ## Modules
//!
//! - [`controller`]: Event → command state machine
//! - [`config`]: Timings, thresholds and DOM hooks
//! - [`debounce`]: Trailing-edge debounce primitive
//! - [`reveal`]: One-way reveal markers
//! - [`state`]: Scroll-derived UI state

#[path = "core/config.rs"]
pub mod config;

#[path = "core/controller.rs"]
pub mod controller;

#[path = "core/debounce.rs"]
pub mod debounce;

#[path = "core/navigation.rs"]
pub mod navigation;

#[path = "core/page.rs"]
pub mod page;

#[path = "core/reveal.rs"]
pub mod reveal;

#[path = "core/state.rs"]
pub mod state;

#[path = "core/timers.rs"]
pub mod timers;

#[cfg(test)]
#[path = "core/harness.rs"]
mod harness;

/// Prelude module for convenient imports.
///
/// ```
/// use hairzone::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ControllerConfig, Selectors, BOOKING_URL};
    pub use crate::controller::{BootstrapError, Controller};
    pub use crate::page::{Command, Event, PageInventory, ScrollOrigin};
    pub use crate::reveal::{RevealKind, RevealOptions, RevealTarget};
    pub use crate::timers::{TimerId, TimerKind};
}
