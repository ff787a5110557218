/// `true` when the floating booking button should be shown at `offset`.
pub fn floating_button_visible(offset: f64, threshold_px: f64) -> bool {
    offset > threshold_px
}

/// Vertical translation of the hero background at `offset`.
pub fn parallax_translate(offset: f64, factor: f64) -> f64 {
    offset * factor
}

/// CSS `transform` value for a vertical translation in pixels.
pub fn translate_y_css(px: f64) -> String {
    format!("translateY({px}px)")
}

/// Scroll offsets reported by the browser can be negative (elastic overscroll)
/// or NaN on detached nodes; both collapse to 0.
pub fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_finite() && offset > 0.0 {
        offset
    } else {
        0.0
    }
}

/// Guard against overlapping animated anchor scrolls.
///
/// Held from the moment a scroll is requested until its release timer fires,
/// whether or not the animation has visually finished.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollLock {
    in_flight: bool,
}

impl ScrollLock {
    /// Take the lock. Returns `false` if a scroll is already in flight.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn release(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Transient page state owned by the controller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppState {
    scroll_position: f64,
    floating_button_visible: bool,
    pub(crate) programmatic_scroll: ScrollLock,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a settled scroll sample; keeps the visibility flag in sync.
    pub fn apply_scroll(&mut self, offset: f64, threshold_px: f64) {
        self.scroll_position = sanitize_offset(offset);
        self.floating_button_visible = floating_button_visible(self.scroll_position, threshold_px);
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    pub fn floating_button_visible(&self) -> bool {
        self.floating_button_visible
    }

    pub fn is_programmatic_scroll_in_flight(&self) -> bool {
        self.programmatic_scroll.is_in_flight()
    }
}
