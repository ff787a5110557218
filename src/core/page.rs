//! Messages exchanged between the controller and the page binding.

use super::reveal::{RevealOptions, RevealTarget};
use super::timers::{TimerId, TimerKind};

/// Where scroll offsets are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrigin {
    /// The root container, whenever it exists. Whether it overflows is a
    /// layout question that may change after stylesheets load.
    Container,
    Window,
}

impl ScrollOrigin {
    pub fn for_container(has_app_container: bool) -> Self {
        if has_app_container {
            Self::Container
        } else {
            Self::Window
        }
    }
}

/// What the binding found in the document at bootstrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInventory {
    pub has_app_container: bool,
    pub has_preloader: bool,
    pub has_floating_button: bool,
    pub has_hero_background: bool,
    pub reveal_on_scroll_count: usize,
    pub service_card_count: usize,
    pub hero_fade_in_count: usize,
}

impl PageInventory {
    /// A page with the root container and every optional element present.
    pub fn complete(reveal_on_scroll: usize, service_cards: usize, hero_fade_ins: usize) -> Self {
        Self {
            has_app_container: true,
            has_preloader: true,
            has_floating_button: true,
            has_hero_background: true,
            reveal_on_scroll_count: reveal_on_scroll,
            service_card_count: service_cards,
            hero_fade_in_count: hero_fade_ins,
        }
    }
}

/// Input pushed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw scroll sample from the scroll container.
    Scroll { offset: f64 },
    /// Viewport resized; carries the current scroll offset.
    Resize { offset: f64 },
    TimerFired(TimerId),
    /// Entry from the reveal intersection watcher.
    Intersection { index: usize, is_intersecting: bool },
    /// Click on a same-page anchor. `target_found` is whether an element with
    /// that id exists.
    AnchorActivated { fragment: String, target_found: bool },
    KeyDown { key: String, on_booking_control: bool },
    BookingClicked,
    Focus { on_booking_control: bool, focused: bool },
    /// Window-level resource load failure.
    ResourceError { is_image: bool },
}

/// DOM work requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ScheduleTimer {
        id: TimerId,
        delay_ms: u32,
        kind: TimerKind,
    },
    CancelTimer(TimerId),

    /// Attach the passive scroll and resize listeners.
    ListenScroll,
    /// Start the intersection watcher over the `reveal-on-scroll` collection.
    ObserveReveals(RevealOptions),
    /// Intercept clicks on same-page anchors.
    InterceptAnchors,
    /// Attach keydown, focus and blur handling for booking controls.
    ListenKeyboard,
    /// Attach the window-level resource error handler.
    ListenResourceErrors,

    /// Opacity `0`, visibility `hidden`.
    HidePreloader,
    /// Display `flex` when visible, `none` otherwise.
    SetFloatingButton { visible: bool },
    /// Hero background `transform: translateY({translate_y}px)`.
    SetParallax { translate_y: f64 },
    /// Add the reveal class to a card or `reveal-on-scroll` element.
    AddRevealed(RevealTarget),
    /// Opacity `1`, `transform: translateY(0)` on a hero element.
    ShowHero(usize),
    /// Smooth `scrollIntoView` on the element with this id.
    ScrollIntoView { id: String },
    /// Open the booking page in a new browsing context.
    OpenBooking { url: String },
    /// Toggle the focus class on the event target.
    SetFocusRing { focused: bool },
    /// Hide the image whose load failed.
    HideFailedImage,
}

impl PageInventory {
    pub fn scroll_origin(&self) -> ScrollOrigin {
        ScrollOrigin::for_container(self.has_app_container)
    }
}

impl Command {
    /// Commands that attach a DOM listener or observer.
    pub fn is_listener(&self) -> bool {
        matches!(
            self,
            Command::ListenScroll
                | Command::ObserveReveals(_)
                | Command::InterceptAnchors
                | Command::ListenKeyboard
                | Command::ListenResourceErrors
        )
    }
}
