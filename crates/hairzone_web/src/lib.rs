//! DOM wiring for the Hair Zone landing page.
//!
//! [`hairzone::controller::Controller`] decides what happens; this crate turns
//! its commands into `classList`/`style` changes, `setTimeout` calls and
//! listeners. Everything browser-facing sits behind the `web` feature on
//! `wasm32`; other builds only see the page contract below.

/// Attribute on the `.app-container` element carrying a JSON config override.
///
/// Missing fields keep their defaults; an unparsable value is reported on the
/// console and ignored.
pub const CONFIG_ATTR: &str = "data-hairzone-config";

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
