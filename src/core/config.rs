#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// External booking page opened by every booking control.
pub const BOOKING_URL: &str = "https://bestill.timma.no/hairzonelilleng";

/// DOM hooks the controller binds to.
///
/// Ids are bare (no leading `#`); everything else is a CSS selector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Selectors {
    pub app_container: String,
    pub preloader_id: String,
    pub floating_button_id: String,
    pub hero_background_id: String,
    pub reveal_on_scroll: String,
    pub service_card: String,
    pub hero_fade_in: String,
    pub same_page_anchor: String,
    pub booking_control: String,
    /// Class toggled on the reveal targets once their entrance has played.
    pub revealed_class: String,
    /// Class toggled on a focused booking control.
    pub focus_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            app_container: ".app-container".to_string(),
            preloader_id: "preloader".to_string(),
            floating_button_id: "floatingBookingBtn".to_string(),
            hero_background_id: "heroBackground".to_string(),
            reveal_on_scroll: ".reveal-on-scroll".to_string(),
            service_card: ".service-card".to_string(),
            hero_fade_in: ".hero-fade-in".to_string(),
            same_page_anchor: "a[href^=\"#\"]".to_string(),
            booking_control: "button.btn-primary, .floating-booking-btn".to_string(),
            revealed_class: "revealed".to_string(),
            focus_class: "keyboard-focus".to_string(),
        }
    }
}

/// Timing and geometry knobs for the page controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Delay before the preloader fades out.
    pub preloader_delay_ms: u32,

    /// Trailing-edge debounce window for scroll/resize samples.
    pub scroll_debounce_ms: u32,

    /// The floating booking button shows once the offset is strictly above this.
    pub floating_button_threshold_px: f64,

    /// Fraction of the scroll offset applied to the hero background.
    pub parallax_factor: f64,

    /// Intersection ratio at which a `reveal-on-scroll` element counts as visible.
    pub reveal_threshold: f64,

    /// Root margin handed to the intersection observer (CSS margin syntax).
    pub reveal_root_margin: String,

    pub card_stagger_ms: u32,

    pub hero_base_delay_ms: u32,
    pub hero_stagger_ms: u32,

    /// How long an animated anchor scroll blocks further anchor scrolls.
    ///
    /// Released by timer, not by scroll completion.
    pub scroll_lock_ms: u32,

    pub booking_url: String,

    pub selectors: Selectors,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            preloader_delay_ms: 1500,
            scroll_debounce_ms: 10,
            floating_button_threshold_px: 300.0,
            parallax_factor: 0.3,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            card_stagger_ms: 200,
            hero_base_delay_ms: 800,
            hero_stagger_ms: 200,
            scroll_lock_ms: 1000,
            booking_url: BOOKING_URL.to_string(),
            selectors: Selectors::default(),
        }
    }
}

impl ControllerConfig {
    /// Upper bound for any single configured delay (one minute).
    pub const MAX_DELAY_MS: u32 = 60_000;

    pub fn validate(&self) -> Result<(), &'static str> {
        let delays = [
            self.preloader_delay_ms,
            self.scroll_debounce_ms,
            self.card_stagger_ms,
            self.hero_base_delay_ms,
            self.hero_stagger_ms,
            self.scroll_lock_ms,
        ];
        if delays.iter().any(|&d| d > Self::MAX_DELAY_MS) {
            return Err("delays must be <= 60000 ms");
        }
        if !self.floating_button_threshold_px.is_finite() || self.floating_button_threshold_px < 0.0
        {
            return Err("floating_button_threshold_px must be finite and >= 0");
        }
        if !self.parallax_factor.is_finite() {
            return Err("parallax_factor must be finite");
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err("reveal_threshold must be in [0, 1]");
        }
        if !self.booking_url.starts_with("https://") && !self.booking_url.starts_with("http://") {
            return Err("booking_url must be an http(s) URL");
        }
        if self.selectors.app_container.trim().is_empty() {
            return Err("selectors.app_container must not be empty");
        }
        if self.selectors.revealed_class.trim().is_empty() {
            return Err("selectors.revealed_class must not be empty");
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override; missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| format!("config: {e}"))?;
        cfg.validate().map_err(|e| format!("config: {e}"))?;
        Ok(cfg)
    }

    pub fn with_booking_url(mut self, url: impl Into<String>) -> Self {
        self.booking_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.preloader_delay_ms, 1500);
        assert_eq!(cfg.scroll_debounce_ms, 10);
        assert_eq!(cfg.floating_button_threshold_px, 300.0);
        assert_eq!(cfg.scroll_lock_ms, 1000);
        assert_eq!(cfg.booking_url, BOOKING_URL);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = ControllerConfig::default();
        cfg.reveal_threshold = 1.5;
        assert!(cfg.validate().is_err());

        let cfg = ControllerConfig::default().with_booking_url("javascript:alert(1)");
        assert_eq!(cfg.validate(), Err("booking_url must be an http(s) URL"));

        let mut cfg = ControllerConfig::default();
        cfg.preloader_delay_ms = ControllerConfig::MAX_DELAY_MS + 1;
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ControllerConfig::from_json(
            r#"{"scroll_debounce_ms": 25, "selectors": {"preloader_id": "loader"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.scroll_debounce_ms, 25);
        assert_eq!(cfg.selectors.preloader_id, "loader");
        assert_eq!(cfg.selectors.floating_button_id, "floatingBookingBtn");
        assert_eq!(cfg.parallax_factor, 0.3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn invalid_json_is_an_error() {
        assert!(ControllerConfig::from_json("{not json").is_err());
        assert!(ControllerConfig::from_json(r#"{"reveal_threshold": -1.0}"#).is_err());
    }
}
